//! HTTP API for the practice service
//!
//! A thin JSON layer over [`SessionManager`]; all behavior lives in the core.

mod handlers;
mod types;

pub use handlers::create_router;

use crate::session::SessionManager;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionManager,
}

impl AppState {
    pub fn new(sessions: SessionManager) -> Self {
        Self { sessions }
    }
}

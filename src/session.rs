//! Practice conversation sessions
//!
//! A session moves `Created -> Active -> Closed`: it is seeded with the system
//! instruction, receives a greeting, accumulates turns, and finally stores
//! coaching feedback. State lives only in memory.

mod manager;
mod state;
mod store;

#[cfg(test)]
mod proptests;

pub use manager::SessionManager;
pub use state::SessionView;
pub use store::{spawn_eviction_sweeper, TranscriptStore};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Conversation not found: {0}")]
    NotFound(String),
}

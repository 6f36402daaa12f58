//! In-memory transcript store
//!
//! Maps conversation ids to their state. Each conversation sits behind its own
//! async mutex so that operations on one conversation run one at a time, while
//! the outer map lock is only held for lookups, inserts and evictions.

use super::state::ConversationState;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Shared handle to one conversation
pub type ConversationHandle = Arc<Mutex<ConversationState>>;

struct Entry {
    created_at: DateTime<Utc>,
    state: ConversationHandle,
}

#[derive(Default)]
pub struct TranscriptStore {
    conversations: RwLock<HashMap<String, Entry>>,
}

impl TranscriptStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new conversation and return its handle
    pub async fn insert(&self, state: ConversationState) -> ConversationHandle {
        let id = state.id().to_string();
        let created_at = state.created_at();
        let handle = Arc::new(Mutex::new(state));

        self.conversations.write().await.insert(
            id,
            Entry {
                created_at,
                state: Arc::clone(&handle),
            },
        );
        handle
    }

    pub async fn get(&self, id: &str) -> Option<ConversationHandle> {
        self.conversations
            .read()
            .await
            .get(id)
            .map(|entry| Arc::clone(&entry.state))
    }

    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Drop conversations created at least `ttl` before `now`
    pub async fn evict_expired(&self, now: DateTime<Utc>, ttl: chrono::Duration) -> usize {
        let mut conversations = self.conversations.write().await;
        let before = conversations.len();
        conversations.retain(|_, entry| now - entry.created_at < ttl);
        before - conversations.len()
    }
}

/// Periodically evict expired conversations until `cancel` fires
pub fn spawn_eviction_sweeper(
    store: Arc<TranscriptStore>,
    ttl: chrono::Duration,
    every: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let evicted = store.evict_expired(Utc::now(), ttl).await;
                    if evicted > 0 {
                        let remaining = store.len().await;
                        tracing::info!(evicted, remaining, "Evicted expired conversations");
                    }
                }
            }
        }
        tracing::info!("Eviction sweeper stopped");
    })
}

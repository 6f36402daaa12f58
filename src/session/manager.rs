//! Conversation lifecycle: create, advance, close

use super::state::{ConversationState, SessionPhase, SessionView};
use super::store::{ConversationHandle, TranscriptStore};
use super::SessionError;
use crate::analysis::AnalysisEngine;
use crate::backend::Backend;
use crate::llm::{Message, SamplingConfig};
use crate::prompts::{OPENING_UTTERANCE, SYSTEM_PROMPT, TURN_FALLBACK};
use chrono::Utc;
use std::sync::Arc;

/// Result of starting a conversation
#[derive(Debug, Clone)]
pub struct Created {
    pub id: String,
    pub greeting: String,
}

/// Result of one user turn
#[derive(Debug, Clone)]
pub struct Turn {
    pub reply: String,
    pub turn_count: u32,
}

/// Result of closing a conversation
#[derive(Debug, Clone)]
pub struct Closed {
    pub feedback: String,
    pub turn_count: u32,
}

#[derive(Clone)]
pub struct SessionManager {
    store: Arc<TranscriptStore>,
    backend: Backend,
    analysis: AnalysisEngine,
}

impl SessionManager {
    pub fn new(store: Arc<TranscriptStore>, backend: Backend) -> Self {
        let analysis = AnalysisEngine::new(backend.clone());
        Self {
            store,
            backend,
            analysis,
        }
    }

    #[cfg(test)]
    pub fn store(&self) -> &Arc<TranscriptStore> {
        &self.store
    }

    /// Start a conversation and fetch the opening greeting
    pub async fn create(&self) -> Created {
        let id = uuid::Uuid::new_v4().to_string();
        let handle = self
            .store
            .insert(ConversationState::new(&id, SYSTEM_PROMPT, Utc::now()))
            .await;
        let mut state = handle.lock().await;

        // The opening utterance primes the greeting but is not part of the transcript
        let mut priming = state.messages().to_vec();
        priming.push(Message::user(OPENING_UTTERANCE));

        let greeting = self
            .backend
            .complete(priming, SamplingConfig::CONVERSATION, TURN_FALLBACK)
            .await;
        state.activate(greeting.clone());

        tracing::info!(conversation_id = %id, "Conversation started");
        Created { id, greeting }
    }

    /// Record a user message and the assistant's reply
    pub async fn advance(&self, id: &str, user_text: String) -> Result<Turn, SessionError> {
        let handle = self.lookup(id).await?;
        let mut state = handle.lock().await;

        if state.phase() == SessionPhase::Closed {
            tracing::warn!(conversation_id = %id, "Turn submitted after conversation was closed");
        }

        // Transcript is mutated only after the reply arrives
        let mut request = state.messages().to_vec();
        request.push(Message::user(&user_text));
        let reply = self
            .backend
            .complete(request, SamplingConfig::CONVERSATION, TURN_FALLBACK)
            .await;
        let turn_count = state.record_turn(user_text, reply.clone());

        tracing::info!(conversation_id = %id, turn_count, "Turn completed");
        Ok(Turn { reply, turn_count })
    }

    /// Analyze the transcript and store the feedback
    pub async fn close(&self, id: &str) -> Result<Closed, SessionError> {
        let handle = self.lookup(id).await?;
        let mut state = handle.lock().await;

        if state.phase() == SessionPhase::Closed {
            tracing::warn!(conversation_id = %id, "Conversation closed again, re-running analysis");
        }

        let feedback = self.analysis.analyze(state.messages()).await;
        state.close(feedback.clone());

        let turn_count = state.turn_count();
        tracing::info!(conversation_id = %id, turn_count, "Conversation closed");
        Ok(Closed {
            feedback,
            turn_count,
        })
    }

    /// The first assistant message of a conversation
    pub async fn greeting(&self, id: &str) -> Result<String, SessionError> {
        let handle = self.lookup(id).await?;
        let state = handle.lock().await;
        state
            .greeting()
            .map(str::to_string)
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }

    pub async fn view(&self, id: &str) -> Result<SessionView, SessionError> {
        let handle = self.lookup(id).await?;
        let state = handle.lock().await;
        Ok(state.view())
    }

    async fn lookup(&self, id: &str) -> Result<ConversationHandle, SessionError> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| SessionError::NotFound(id.to_string()))
    }
}

//! Conversation state types

use crate::llm::{Message, Role};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Lifecycle phase of a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Seeded with the system instruction, greeting not yet stored
    Created,
    /// Greeting stored, accepting turns
    Active,
    /// Analysis stored
    Closed,
}

/// Everything the process knows about one practice conversation
#[derive(Debug, Clone)]
pub struct ConversationState {
    id: String,
    messages: Vec<Message>,
    turn_count: u32,
    created_at: DateTime<Utc>,
    analysis: Option<String>,
    phase: SessionPhase,
}

impl ConversationState {
    pub fn new(id: impl Into<String>, system_prompt: &str, created_at: DateTime<Utc>) -> Self {
        Self {
            id: id.into(),
            messages: vec![Message::system(system_prompt)],
            turn_count: 0,
            created_at,
            analysis: None,
            phase: SessionPhase::Created,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Store the opening greeting and start accepting turns
    pub fn activate(&mut self, greeting: String) {
        self.messages.push(Message::assistant(greeting));
        self.phase = SessionPhase::Active;
    }

    /// Append a user message and its reply as one turn
    pub fn record_turn(&mut self, user_text: String, reply: String) -> u32 {
        self.messages.push(Message::user(user_text));
        self.messages.push(Message::assistant(reply));
        self.turn_count += 1;
        self.turn_count
    }

    pub fn close(&mut self, analysis: String) {
        self.analysis = Some(analysis);
        self.phase = SessionPhase::Closed;
    }

    /// First assistant message, if one has been stored
    pub fn greeting(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }

    pub fn view(&self) -> SessionView {
        SessionView {
            conversation_id: self.id.clone(),
            phase: self.phase,
            turn_count: self.turn_count,
            created_at: self.created_at,
            analysis: self.analysis.clone(),
            messages: self
                .messages
                .iter()
                .filter(|m| m.role != Role::System)
                .cloned()
                .collect(),
        }
    }
}

/// Read-only snapshot handed to callers
#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub conversation_id: String,
    pub phase: SessionPhase,
    pub turn_count: u32,
    pub created_at: DateTime<Utc>,
    pub analysis: Option<String>,
    pub messages: Vec<Message>,
}

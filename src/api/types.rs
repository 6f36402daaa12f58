//! API request and response types

use crate::analysis::FeedbackSections;
use serde::{Deserialize, Serialize};

/// Response for a newly started conversation
#[derive(Debug, Serialize)]
pub struct CreateConversationResponse {
    pub conversation_id: String,
    pub greeting: String,
}

/// Request to send a chat message
#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    #[serde(default)]
    pub message: String,
}

/// Response for one conversational turn
#[derive(Debug, Serialize)]
pub struct SendMessageResponse {
    pub response: String,
    pub turn_count: u32,
}

/// Response for ending a conversation
#[derive(Debug, Serialize)]
pub struct EndConversationResponse {
    pub analysis: String,
    pub turn_count: u32,
    /// Lenient structured reading of `analysis`
    pub sections: FeedbackSections,
    /// Whether `sections` has all five sections with three bullets each
    pub well_formed: bool,
}

/// Response with the opening greeting
#[derive(Debug, Serialize)]
pub struct GreetingResponse {
    pub greeting: String,
    pub conversation_id: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

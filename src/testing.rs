//! Mock implementations for testing
//!
//! These mocks enable testing the session lifecycle without real I/O.

use crate::llm::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// Mock LLM Service
// ============================================================================

/// Mock LLM service that returns queued responses
pub struct MockLlmService {
    responses: Mutex<VecDeque<Result<LlmResponse, LlmError>>>,
    model_id: String,
    delay: Option<Duration>,
    /// Record of all requests made
    requests: Mutex<Vec<LlmRequest>>,
}

impl MockLlmService {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            model_id: model_id.into(),
            delay: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Sleep before answering each request (for interleaving tests)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Queue a successful response
    pub fn queue_response(&self, response: LlmResponse) {
        self.responses.lock().unwrap().push_back(Ok(response));
    }

    /// Queue a successful response per text, in order
    pub fn queue_texts(&self, texts: &[&str]) {
        for text in texts {
            self.queue_response(LlmResponse::from_text(*text));
        }
    }

    /// Queue an error response
    pub fn queue_error(&self, error: LlmError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Get recorded requests
    pub fn recorded_requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmService for MockLlmService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::network("No mock response queued")))
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}

/// A well-formed coaching reply with all five sections
pub const WELL_FORMED_FEEDBACK: &str = "**STRENGTHS:**
- You opened warmly
- You asked follow-up questions
- You kept answers concise

**AREAS FOR IMPROVEMENT:**
- Share a personal example
- Vary your sentence openings
- Pause before changing topic

**CONVERSATION FLOW:**
- The talk moved from greetings to hobbies
- Transitions were mostly smooth
- Engagement stayed high

**KEY TAKEAWAYS:**
- Curiosity keeps a conversation alive
- Short answers invite replies
- Listening matters as much as talking

**NEXT STEPS:**
- Practice telling a two-minute story
- Ask one open question per turn
- Summarize what you heard before responding";

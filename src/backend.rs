//! Fail-soft model backend
//!
//! Wraps an [`LlmService`] so that callers always get text back. Any provider
//! error is logged and replaced by the call site's fixed fallback string. No
//! retries happen here. Every call is logged with its timing and token usage.

use crate::llm::{LlmRequest, LlmService, Message, SamplingConfig};
use std::sync::Arc;

#[derive(Clone)]
pub struct Backend {
    service: Arc<dyn LlmService>,
}

impl Backend {
    pub fn new(service: Arc<dyn LlmService>) -> Self {
        Self { service }
    }

    pub fn model_id(&self) -> &str {
        self.service.model_id()
    }

    /// Complete `messages`, returning `fallback` if the provider fails
    pub async fn complete(
        &self,
        messages: Vec<Message>,
        sampling: SamplingConfig,
        fallback: &str,
    ) -> String {
        let request = LlmRequest { messages, sampling };
        let start = std::time::Instant::now();
        let result = self.service.complete(&request).await;
        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id(),
                    elapsed_ms = %elapsed.as_millis(),
                    transcript_len = request.messages.len(),
                    max_tokens = sampling.max_tokens,
                    input_tokens = response.usage.input_tokens,
                    output_tokens = response.usage.output_tokens,
                    "Model replied"
                );
                if response.text.trim().is_empty() {
                    tracing::warn!(model = %self.model_id(), "Model reply is empty");
                }
                response.text
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.model_id(),
                    elapsed_ms = %elapsed.as_millis(),
                    kind = ?e.kind,
                    retryable = e.kind.is_retryable(),
                    error = %e.message,
                    "Backend unavailable, using fallback text"
                );
                fallback.to_string()
            }
        }
    }
}

//! LLM provider abstraction
//!
//! Provides a common interface for chat-completion providers.

mod error;
mod openai;
mod provider;
mod types;

pub use error::LlmError;
pub use openai::OpenAiCompatService;
pub use provider::{Provider, ProviderKind, ProviderSettings};
pub use types::*;

use async_trait::async_trait;

/// Common interface for LLM providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Make a completion request
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

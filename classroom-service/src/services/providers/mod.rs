//! Text-generation provider abstraction.

pub mod anthropic;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("network error: {0}")]
    Network(String),

    /// The upstream API completed the exchange but reported a non-success
    /// status. Status and body are kept so callers can relay them untouched.
    #[error("API error {status}")]
    Api { status: u16, body: Value },

    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

/// A brief-analysis request: one system prompt plus one user message.
#[derive(Debug, Clone)]
pub struct AnalysisPrompt {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Trait for chat-completion providers.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Run one buffered completion and return the raw upstream response
    /// body. No streaming: the reply is relayed whole.
    async fn analyze(&self, prompt: &AnalysisPrompt) -> Result<Value, ProviderError>;
}

//! Completion service interface.

use async_trait::async_trait;
use thiserror::Error;

use crate::signals::prompt::ChatMessage;

#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("completion service returned an empty response")]
    EmptyResponse,

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("completion service is not configured")]
    NotConfigured,
}

/// One request/response exchange with an external completion service.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Returns the body text of the first completion. Blank bodies are errors.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, CompletionError>;
}

/// Stand-in used when no provider is configured; every call fails.
pub struct UnavailableCompletionService;

#[async_trait]
impl CompletionService for UnavailableCompletionService {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, CompletionError> {
        Err(CompletionError::NotConfigured)
    }
}

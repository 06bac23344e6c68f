//! Chat error types.

use thiserror::Error;

/// Errors from the chat layer.
#[derive(Debug, Error)]
pub enum AiError {
    /// Invalid input or request.
    #[error("{0}")]
    InvalidInput(String),

    /// Missing API key for a provider.
    #[error("Missing API key for provider {0}")]
    MissingApiKey(String),

    /// Provider error (from rig-core or the API).
    #[error("Provider error: {0}")]
    Provider(String),

    /// Chat session not found.
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }
}

/// Error code for programmatic handling in API responses.
impl AiError {
    pub fn code(&self) -> &'static str {
        match self {
            AiError::InvalidInput(_) => "INVALID_INPUT",
            AiError::MissingApiKey(_) => "MISSING_API_KEY",
            AiError::Provider(_) => "PROVIDER_ERROR",
            AiError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            AiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

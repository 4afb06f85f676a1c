//! Error types for clip selection.

use thiserror::Error;

/// Result type for clip selection operations.
pub type SelectResult<T> = Result<T, SelectError>;

/// Errors that can occur while selecting clips.
///
/// Every variant is recoverable at the `ClipSelector` level: selection
/// routes failures into the deterministic fallback rather than
/// surfacing them to the caller.
#[derive(Debug, Error)]
pub enum SelectError {
    #[error("generation backend failed: {0}")]
    Backend(String),

    #[error("invalid backend response: {0}")]
    InvalidResponse(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SelectError {
    /// Create a backend failure error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Create an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

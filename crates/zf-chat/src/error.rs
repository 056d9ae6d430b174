//! Error types for the chat-completion client.

use thiserror::Error;

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// Errors surfaced by the chat-completion client, one variant per failure
/// stage so the caller can tell transport trouble from API rejections.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The HTTP request itself failed (network, timeout, TLS).
    #[error("request failed: {0}")]
    Request(String),

    /// The endpoint answered with a non-success status.
    #[error("endpoint returned {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body, as returned.
        body: String,
    },

    /// The API reported an error in its response payload.
    #[error("API error: {0}")]
    Api(String),

    /// The response decoded, but not into the expected shape.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

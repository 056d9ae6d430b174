//! Error types for the transcript and progress stores.

use thiserror::Error;

/// Result type for persistence operations.
pub type TranscriptResult<T> = Result<T, TranscriptError>;

/// Errors surfaced by the persistence layer.
///
/// Never retried here; the caller decides whether to degrade (keep the
/// message in memory only) or report.
#[derive(Debug, Error)]
pub enum TranscriptError {
    /// The underlying embedded store failed.
    #[error("store error: {0}")]
    Store(#[from] sled::Error),

    /// A stored record could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

//! Error types for solgrid-jito.

use thiserror::Error;

/// Bundle assembly and submission errors.
#[derive(Debug, Error)]
pub enum JitoError {
    #[error("bundle must contain at least one non-tip transaction")]
    EmptyBundle,

    #[error("bundle rejected by block engine: {0}")]
    Rejected(String),

    #[error("malformed block engine response: {0}")]
    MalformedResponse(String),
}

/// Result type alias for bundle operations.
pub type JitoResult<T> = std::result::Result<T, JitoError>;

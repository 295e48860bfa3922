//! Error types for solgrid-persistence.

use thiserror::Error;

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("corrupt state under key '{key}': {detail}")]
    Corrupt { key: String, detail: String },
}

/// Result type alias for persistence operations.
pub type PersistenceResult<T> = std::result::Result<T, PersistenceError>;

//! Error types for solgrid-mm.

use thiserror::Error;

/// Grid construction errors.
#[derive(Debug, Error)]
pub enum GridError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Grid would produce a non-positive price at level {level}: {detail}")]
    NonPositivePrice { level: u32, detail: String },

    #[error("Grid would produce a non-positive size at level {level}: {detail}")]
    NonPositiveSize { level: u32, detail: String },
}

/// Result type alias for grid operations.
pub type GridResult<T> = std::result::Result<T, GridError>;

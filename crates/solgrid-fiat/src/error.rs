//! Error types for solgrid-fiat.

use thiserror::Error;

/// Fiat management errors.
#[derive(Debug, Error)]
pub enum FiatError {
    #[error("quote transport failure: {0}")]
    Transport(String),

    #[error("quote unavailable for {pair}: {reason}")]
    QuoteUnavailable { pair: String, reason: String },
}

/// Result type alias for fiat operations.
pub type FiatResult<T> = std::result::Result<T, FiatError>;

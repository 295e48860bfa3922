//! Error types for solgrid-analytics.

use thiserror::Error;

/// Analytics error types.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for analytics operations.
pub type AnalyticsResult<T> = std::result::Result<T, AnalyticsError>;

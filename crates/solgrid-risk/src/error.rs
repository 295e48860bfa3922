//! Error types for solgrid-risk.

use rust_decimal::Decimal;
use thiserror::Error;

/// Risk violations raised by the order validator.
#[derive(Debug, Error)]
pub enum RiskError {
    #[error("order size {size} exceeds max_order_size {limit}")]
    OrderSizeExceeded { size: Decimal, limit: Decimal },

    #[error("projected position {projected} exceeds max_position {limit}")]
    PositionExceeded { projected: Decimal, limit: Decimal },

    #[error("order notional {notional} exceeds max_notional {limit}")]
    NotionalExceeded { notional: Decimal, limit: Decimal },
}

/// Result type alias for risk operations.
pub type RiskResult<T> = std::result::Result<T, RiskError>;

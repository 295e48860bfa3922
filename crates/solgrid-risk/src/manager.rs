//! Risk limit enforcement.

use crate::error::{RiskError, RiskResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solgrid_core::{Price, Size};
use tracing::{debug, warn};

/// Per-session risk limits, supplied by configuration and never
/// mutated by the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskLimits {
    /// Maximum absolute size of a single order.
    #[serde(default = "default_max_order_size")]
    pub max_order_size: Decimal,

    /// Maximum absolute position after an order is applied.
    #[serde(default = "default_max_position")]
    pub max_position: Decimal,

    /// Maximum notional in USD, both per order and portfolio-wide.
    #[serde(default = "default_max_notional_usd")]
    pub max_notional_usd: Decimal,
}

fn default_max_order_size() -> Decimal {
    Decimal::from(10)
}
fn default_max_position() -> Decimal {
    Decimal::from(100)
}
fn default_max_notional_usd() -> Decimal {
    Decimal::from(1000)
}

impl Default for RiskLimits {
    fn default() -> Self {
        Self {
            max_order_size: default_max_order_size(),
            max_position: default_max_position(),
            max_notional_usd: default_max_notional_usd(),
        }
    }
}

/// Gate consulted before any order-size or portfolio-notional change
/// is accepted.
#[derive(Debug, Clone)]
pub struct RiskManager {
    limits: RiskLimits,
}

impl RiskManager {
    pub fn new(limits: RiskLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &RiskLimits {
        &self.limits
    }

    /// Non-throwing portfolio gate: passes iff
    /// `|total_notional| <= max_notional_usd`.
    pub fn check_notional(&self, total_notional: Decimal) -> bool {
        let within = total_notional.abs() <= self.limits.max_notional_usd;
        if within {
            debug!(%total_notional, limit = %self.limits.max_notional_usd, "notional gate passed");
        } else {
            warn!(%total_notional, limit = %self.limits.max_notional_usd, "notional gate blocked");
        }
        within
    }

    /// Throwing per-order validator, applied immediately before
    /// submission. Never bypassed.
    pub fn validate_order(
        &self,
        order_size: Size,
        current_position: Size,
        price: Price,
    ) -> RiskResult<()> {
        let size = order_size.inner();
        if size.abs() > self.limits.max_order_size {
            return Err(RiskError::OrderSizeExceeded {
                size,
                limit: self.limits.max_order_size,
            });
        }

        let projected = current_position.inner() + size;
        if projected.abs() > self.limits.max_position {
            return Err(RiskError::PositionExceeded {
                projected,
                limit: self.limits.max_position,
            });
        }

        let notional = size.abs() * price.inner();
        if notional > self.limits.max_notional_usd {
            return Err(RiskError::NotionalExceeded {
                notional,
                limit: self.limits.max_notional_usd,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn manager() -> RiskManager {
        RiskManager::new(RiskLimits {
            max_order_size: dec!(5),
            max_position: dec!(20),
            max_notional_usd: dec!(1000),
        })
    }

    #[test]
    fn test_check_notional_boundary() {
        let m = manager();
        assert!(m.check_notional(dec!(1000)));
        assert!(!m.check_notional(dec!(1000.01)));
        // Symmetric in sign
        assert!(m.check_notional(dec!(-1000)));
        assert!(!m.check_notional(dec!(-1000.01)));
    }

    #[test]
    fn test_validate_order_passes_within_limits() {
        let m = manager();
        m.validate_order(Size::new(dec!(2)), Size::new(dec!(1)), Price::new(dec!(100)))
            .unwrap();
    }

    #[test]
    fn test_validate_order_size_exceeded() {
        let m = manager();
        let err = m
            .validate_order(Size::new(dec!(-6)), Size::ZERO, Price::new(dec!(1)))
            .unwrap_err();
        assert!(matches!(err, RiskError::OrderSizeExceeded { .. }));
    }

    #[test]
    fn test_validate_order_projected_position_exceeded() {
        let m = manager();
        let err = m
            .validate_order(
                Size::new(dec!(5)),
                Size::new(dec!(16)),
                Price::new(dec!(1)),
            )
            .unwrap_err();
        assert!(matches!(err, RiskError::PositionExceeded { .. }));
    }

    #[test]
    fn test_validate_order_notional_exceeded() {
        let m = manager();
        // |3| * 400 = 1200 > 1000
        let err = m
            .validate_order(Size::new(dec!(3)), Size::ZERO, Price::new(dec!(400)))
            .unwrap_err();
        assert!(matches!(err, RiskError::NotionalExceeded { .. }));
    }

    #[test]
    fn test_limits_serde_defaults() {
        let limits: RiskLimits = toml::from_str("max_notional_usd = 5000").unwrap();
        assert_eq!(limits.max_notional_usd, dec!(5000));
        assert_eq!(limits.max_order_size, dec!(10));
        assert_eq!(limits.max_position, dec!(100));
    }

    #[test]
    fn test_short_position_reduction_allowed() {
        let m = manager();
        // Reducing a short: -18 + 5 = -13, within max_position
        m.validate_order(
            Size::new(dec!(5)),
            Size::new(dec!(-18)),
            Price::new(dec!(10)),
        )
        .unwrap();
    }
}

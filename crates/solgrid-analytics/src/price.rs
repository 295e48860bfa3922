//! Deterministic price analytics.
//!
//! No side effects, no I/O. Fees and fixed costs are applied to the
//! computed price at read time via `CostModel`.

use crate::error::{AnalyticsError, AnalyticsResult};
use rust_decimal::Decimal;
use solgrid_core::{Price, Trade};

/// Fee/fixed-cost model applied on top of a computed price.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    /// Taker/maker fee in basis points.
    pub fee_bps: Decimal,
    /// Fixed cost added after the fee (same unit as the price).
    pub fixed_cost: Decimal,
}

impl CostModel {
    pub const FREE: Self = Self {
        fee_bps: Decimal::ZERO,
        fixed_cost: Decimal::ZERO,
    };

    pub fn new(fee_bps: Decimal, fixed_cost: Decimal) -> Self {
        Self {
            fee_bps,
            fixed_cost,
        }
    }

    /// `price * (1 + fee_bps/10000) + fixed_cost`
    pub fn apply(&self, price: Decimal) -> Decimal {
        price * (Decimal::ONE + self.fee_bps / Decimal::from(10000)) + self.fixed_cost
    }
}

/// Volume-weighted average price over a trade history.
///
/// Fails with `InvalidInput` if `trades` is empty or total size is zero.
pub fn vwap(trades: &[Trade], costs: CostModel) -> AnalyticsResult<Price> {
    if trades.is_empty() {
        return Err(AnalyticsError::InvalidInput("trades cannot be empty".into()));
    }

    let mut total_notional = Decimal::ZERO;
    let mut total_size = Decimal::ZERO;
    for trade in trades {
        total_notional += trade.price.inner() * trade.size.inner();
        total_size += trade.size.inner();
    }

    if total_size.is_zero() {
        return Err(AnalyticsError::InvalidInput(
            "total trade size cannot be zero".into(),
        ));
    }

    Ok(Price::new(costs.apply(total_notional / total_size)))
}

/// Classic high/low/close pivot: `(high + low + close) / 3`.
pub fn hlc_pivot(high: Price, low: Price, close: Price, costs: CostModel) -> Price {
    let base = (high.inner() + low.inner() + close.inner()) / Decimal::from(3);
    Price::new(costs.apply(base))
}

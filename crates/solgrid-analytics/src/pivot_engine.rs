//! Fade-in pivot engine.
//!
//! Produces the strategy's single reference price. During the first
//! `fade_in_days` the pivot moves linearly from the current market price
//! toward the VWAP; after that the pivot is exactly the VWAP.

use crate::error::{AnalyticsError, AnalyticsResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solgrid_core::{AssetPosition, Price, PricePoint};
use tracing::{debug, warn};

/// Immutable per-session pivot policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PivotConfig {
    /// Reference price returned when no market data is available.
    pub target_allocation_usd: Decimal,
    /// History window in days fed into the VWAP.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,
    /// Length of the fade-in window in days. Zero disables fade-in.
    #[serde(default = "default_fade_in_days")]
    pub fade_in_days: u32,
}

fn default_lookback_days() -> u32 {
    365
}

fn default_fade_in_days() -> u32 {
    30
}

impl Default for PivotConfig {
    fn default() -> Self {
        Self {
            target_allocation_usd: Decimal::from(1000),
            lookback_days: default_lookback_days(),
            fade_in_days: default_fade_in_days(),
        }
    }
}

/// Computes the grid's reference price from recent trade history.
#[derive(Debug, Clone)]
pub struct PivotEngine {
    config: PivotConfig,
}

impl PivotEngine {
    /// Create an engine, validating the policy.
    pub fn new(config: PivotConfig) -> AnalyticsResult<Self> {
        if config.lookback_days == 0 {
            return Err(AnalyticsError::InvalidInput(
                "lookback_days must be positive".into(),
            ));
        }
        Ok(Self { config })
    }

    pub fn config(&self) -> &PivotConfig {
        &self.config
    }

    /// Compute the pivot for the current cycle.
    ///
    /// Degrades gracefully: empty market data returns the configured
    /// target unchanged; zero total volume falls back to the most
    /// recent price as the VWAP.
    pub fn compute_pivot(
        &self,
        _positions: &[AssetPosition],
        market_data: &[PricePoint],
        days_since_start: u32,
    ) -> Price {
        let last = match market_data.last() {
            Some(point) => point.price,
            None => {
                warn!(
                    target = %self.config.target_allocation_usd,
                    "no market data for pivot, returning configured target"
                );
                return Price::new(self.config.target_allocation_usd);
            }
        };

        let mut total_value = Decimal::ZERO;
        let mut total_volume = Decimal::ZERO;
        for point in market_data {
            total_value += point.price.inner() * point.volume.inner();
            total_volume += point.volume.inner();
        }

        let vwap = if total_volume.is_zero() {
            warn!("total volume is zero, falling back to last price as VWAP");
            last
        } else {
            Price::new(total_value / total_volume)
        };

        let pivot = if days_since_start < self.config.fade_in_days {
            // Linear interpolation from current price toward VWAP,
            // ratio clamped to [0, 1].
            let ratio = (Decimal::from(days_since_start) / Decimal::from(self.config.fade_in_days))
                .clamp(Decimal::ZERO, Decimal::ONE);
            let blended = last.inner() * (Decimal::ONE - ratio) + vwap.inner() * ratio;
            debug!(%ratio, vwap = %vwap, current = %last, "fade-in active");
            Price::new(blended)
        } else {
            vwap
        };

        debug!(%vwap, current = %last, %pivot, days_since_start, "pivot computed");
        pivot
    }
}

//! Grid builder.
//!
//! Consumes the pivot (mid) price and produces the ladder of resting
//! levels. Buy prices strictly decrease with level index, sell prices
//! strictly increase, and no emitted level has a non-positive price
//! or size.

use rust_decimal::Decimal;
use tracing::info;

use crate::config::{GridConfig, GridMode};
use crate::error::{GridError, GridResult};
use solgrid_core::{GridLevel, OrderSide, Price, Size};

/// Builds the order ladder around a mid price.
#[derive(Debug, Clone)]
pub struct GridBuilder {
    config: GridConfig,
}

impl GridBuilder {
    pub fn new(config: GridConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Build the grid for the configured mode.
    ///
    /// A zero level count yields an empty grid, not an error.
    /// Non-positive `mid_price` or `total_size` is a caller contract
    /// violation and fails with `InvalidInput`.
    pub fn build(&self, mid_price: Price, total_size: Size) -> GridResult<Vec<GridLevel>> {
        if !mid_price.is_positive() {
            return Err(GridError::InvalidInput(format!(
                "mid_price must be positive, got {mid_price}"
            )));
        }
        if !total_size.is_positive() {
            return Err(GridError::InvalidInput(format!(
                "total_size must be positive, got {total_size}"
            )));
        }

        let mut grid = match self.config.mode {
            GridMode::ChannelWidth => self.build_channel(mid_price, total_size)?,
            GridMode::FixedSpacing => self.build_fixed(mid_price, total_size)?,
        };

        let tick = Price::new(self.config.price_tick);
        let lot = Size::new(self.config.size_lot);
        for level in &mut grid {
            level.price = level.price.round_to_tick(tick);
            level.size = level.size.round_to_lot(lot);
        }

        // Unconditional guarantee, whatever the configuration: no
        // emitted level carries a non-positive price or size.
        for level in &grid {
            level.validate().map_err(|e| match e {
                solgrid_core::CoreError::InvalidSize(detail) => GridError::NonPositiveSize {
                    level: level.level_index,
                    detail,
                },
                other => GridError::NonPositivePrice {
                    level: level.level_index,
                    detail: other.to_string(),
                },
            })?;
        }

        info!(
            mode = ?self.config.mode,
            %mid_price,
            levels = grid.len(),
            "grid built"
        );
        Ok(grid)
    }

    /// Channel-width shape: each side spans `mid * width`, split into
    /// equal price steps; sizes split across all levels, optionally
    /// weighted geometrically per side.
    fn build_channel(&self, mid: Price, total_size: Size) -> GridResult<Vec<GridLevel>> {
        let c = &self.config.channel;
        if c.orders_per_side == 0 {
            return Ok(Vec::new());
        }

        if c.buy_channel_width <= Decimal::ZERO || c.sell_channel_width <= Decimal::ZERO {
            return Err(GridError::InvalidInput(format!(
                "channel widths must be positive, got buy {} sell {}",
                c.buy_channel_width, c.sell_channel_width
            )));
        }
        if c.buy_volume_multiplier <= Decimal::ZERO || c.sell_volume_multiplier <= Decimal::ZERO {
            return Err(GridError::InvalidInput(format!(
                "volume multipliers must be positive, got buy {} sell {}",
                c.buy_volume_multiplier, c.sell_volume_multiplier
            )));
        }

        // The deepest buy sits at mid * (1 - buy_width); a width >= 1
        // would drive it non-positive.
        if c.buy_channel_width >= Decimal::ONE {
            return Err(GridError::NonPositivePrice {
                level: c.orders_per_side,
                detail: format!("buy_channel_width {} >= 1", c.buy_channel_width),
            });
        }

        let per_side = Decimal::from(c.orders_per_side);
        let side_total = total_size.inner() / Decimal::from(2);
        let buy_step = mid.inner() * c.buy_channel_width / per_side;
        let sell_step = mid.inner() * c.sell_channel_width / per_side;

        let buy_sizes = geometric_split(side_total, c.orders_per_side, c.buy_volume_multiplier);
        let sell_sizes = geometric_split(side_total, c.orders_per_side, c.sell_volume_multiplier);

        let mut grid = Vec::with_capacity((c.orders_per_side * 2) as usize);
        for (idx, size) in buy_sizes.into_iter().enumerate() {
            let i = (idx + 1) as u32;
            let price = mid.inner() - buy_step * Decimal::from(i);
            grid.push(GridLevel::new(
                Price::new(price),
                Size::new(size),
                OrderSide::Buy,
                i,
            ));
        }
        for (idx, size) in sell_sizes.into_iter().enumerate() {
            let i = (idx + 1) as u32;
            let price = mid.inner() + sell_step * Decimal::from(i);
            grid.push(GridLevel::new(
                Price::new(price),
                Size::new(size),
                OrderSide::Sell,
                i,
            ));
        }
        Ok(grid)
    }

    /// Fixed-spacing shape: `spacing = spacing_bps / 10000`; level i sits
    /// at `mid * (1 ± spacing * i)`, size passed through per level.
    /// Emits levels interleaved buy/sell per index, matching the
    /// historical ladder order.
    fn build_fixed(&self, mid: Price, total_size: Size) -> GridResult<Vec<GridLevel>> {
        let c = &self.config.fixed;
        if c.levels == 0 {
            return Ok(Vec::new());
        }

        if c.spacing_bps <= Decimal::ZERO {
            return Err(GridError::InvalidInput(format!(
                "spacing_bps must be positive, got {}",
                c.spacing_bps
            )));
        }

        let spacing = c.spacing_bps / Decimal::from(10000);

        // Mandatory pre-check: the deepest buy must stay positive
        // before any level is emitted.
        let deepest = mid.inner() * (Decimal::ONE - spacing * Decimal::from(c.levels));
        if deepest <= Decimal::ZERO {
            return Err(GridError::NonPositivePrice {
                level: c.levels,
                detail: format!(
                    "spacing {} bps over {} levels drives price to {deepest}",
                    c.spacing_bps, c.levels
                ),
            });
        }

        let mut grid = Vec::with_capacity((c.levels * 2) as usize);
        for i in 1..=c.levels {
            let offset = spacing * Decimal::from(i);
            grid.push(GridLevel::new(
                Price::new(mid.inner() * (Decimal::ONE - offset)),
                total_size,
                OrderSide::Buy,
                i,
            ));
            grid.push(GridLevel::new(
                Price::new(mid.inner() * (Decimal::ONE + offset)),
                total_size,
                OrderSide::Sell,
                i,
            ));
        }
        Ok(grid)
    }
}

/// Split `side_total` across `count` levels with geometric weights
/// `multiplier^(i-1)`. A multiplier of 1 gives an even split.
fn geometric_split(side_total: Decimal, count: u32, multiplier: Decimal) -> Vec<Decimal> {
    let mut weights = Vec::with_capacity(count as usize);
    let mut weight = Decimal::ONE;
    let mut total_weight = Decimal::ZERO;
    for _ in 0..count {
        weights.push(weight);
        total_weight += weight;
        weight *= multiplier;
    }

    weights
        .into_iter()
        .map(|w| {
            if total_weight.is_zero() {
                Decimal::ZERO
            } else {
                side_total / total_weight * w
            }
        })
        .collect()
}

//! Grid configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Grid shape selection.
///
/// Two incompatible shapes exist in the strategy's history; neither is
/// silently merged into the other. The canonical default is
/// `ChannelWidth`; `FixedSpacing` remains selectable for the legacy
/// bps-ladder behavior.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum GridMode {
    /// Asymmetric channel: each side spans a configured width fraction,
    /// split evenly into `orders_per_side` steps.
    #[default]
    ChannelWidth,
    /// Symmetric ladder with a fixed per-level spacing in basis points.
    FixedSpacing,
}

/// Channel-width shape parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelWidthConfig {
    /// Number of levels on each side.
    #[serde(default = "default_orders_per_side")]
    pub orders_per_side: u32,

    /// Fraction of the mid price covered by the buy side (e.g. 0.15).
    #[serde(default = "default_buy_channel_width")]
    pub buy_channel_width: Decimal,

    /// Fraction of the mid price covered by the sell side (e.g. 0.30).
    #[serde(default = "default_sell_channel_width")]
    pub sell_channel_width: Decimal,

    /// Geometric size weight per deeper buy level. 1.0 = even split.
    #[serde(default = "default_volume_multiplier")]
    pub buy_volume_multiplier: Decimal,

    /// Geometric size weight per deeper sell level. 1.0 = even split.
    #[serde(default = "default_volume_multiplier")]
    pub sell_volume_multiplier: Decimal,
}

impl Default for ChannelWidthConfig {
    fn default() -> Self {
        Self {
            orders_per_side: default_orders_per_side(),
            buy_channel_width: default_buy_channel_width(),
            sell_channel_width: default_sell_channel_width(),
            buy_volume_multiplier: default_volume_multiplier(),
            sell_volume_multiplier: default_volume_multiplier(),
        }
    }
}

/// Fixed-spacing shape parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedSpacingConfig {
    /// Per-level spacing in basis points.
    #[serde(default = "default_spacing_bps")]
    pub spacing_bps: Decimal,

    /// Number of levels on each side.
    #[serde(default = "default_levels")]
    pub levels: u32,
}

impl Default for FixedSpacingConfig {
    fn default() -> Self {
        Self {
            spacing_bps: default_spacing_bps(),
            levels: default_levels(),
        }
    }
}

/// Grid builder configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GridConfig {
    /// Selected grid shape.
    #[serde(default)]
    pub mode: GridMode,

    #[serde(default)]
    pub channel: ChannelWidthConfig,

    #[serde(default)]
    pub fixed: FixedSpacingConfig,

    /// Venue price increment; zero disables rounding.
    #[serde(default)]
    pub price_tick: Decimal,

    /// Venue size increment; zero disables rounding.
    #[serde(default)]
    pub size_lot: Decimal,
}

fn default_orders_per_side() -> u32 {
    16
}
fn default_buy_channel_width() -> Decimal {
    Decimal::new(15, 2) // 0.15
}
fn default_sell_channel_width() -> Decimal {
    Decimal::new(30, 2) // 0.30
}
fn default_volume_multiplier() -> Decimal {
    Decimal::ONE
}
fn default_spacing_bps() -> Decimal {
    Decimal::new(25, 0) // 25 bps
}
fn default_levels() -> u32 {
    16
}

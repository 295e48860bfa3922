//! Price analytics and the fade-in pivot engine.
//!
//! Pure functions (`vwap`, `hlc_pivot`) plus `PivotEngine`, which blends
//! the latest market price toward the VWAP over a bounded fade-in window
//! to produce the strategy's single reference price.

pub mod error;
pub mod pivot_engine;
pub mod price;

pub use error::{AnalyticsError, AnalyticsResult};
pub use pivot_engine::{PivotConfig, PivotEngine};
pub use price::{hlc_pivot, vwap, CostModel};

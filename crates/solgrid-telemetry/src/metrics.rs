//! Prometheus metrics for the grid strategy.
//!
//! Covers the rebalance loop (cycles, pivot, notional), bundle
//! submission, and risk gate blocks.
//!
//! # Panics
//!
//! Metric registration uses `unwrap()` intentionally. If registration
//! fails, it indicates a fatal configuration error (e.g., duplicate
//! metric names) that should cause an immediate crash at startup
//! rather than silent failure. These panics only occur during static
//! initialization, never at runtime.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_gauge, register_int_counter, register_int_gauge, CounterVec,
    Gauge, IntCounter, IntGauge,
};

/// Total strategy cycles executed.
pub static CYCLES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!("solgrid_cycles_total", "Total strategy cycles executed").unwrap()
});

/// Total grid rebalances performed.
pub static REBALANCES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "solgrid_rebalances_total",
        "Total grid rebalances performed"
    )
    .unwrap()
});

/// Total bundles submitted to the block engine.
pub static BUNDLES_SUBMITTED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    register_int_counter!(
        "solgrid_bundles_submitted_total",
        "Total bundles submitted to the block engine"
    )
    .unwrap()
});

/// Risk gate block count.
pub static GATE_BLOCKED_TOTAL: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "solgrid_gate_blocked_total",
        "Total risk gate blocks",
        &["gate"]
    )
    .unwrap()
});

/// Current pivot anchor in USD.
pub static PIVOT_USD: Lazy<Gauge> =
    Lazy::new(|| register_gauge!("solgrid_pivot_usd", "Current pivot anchor in USD").unwrap());

/// Current portfolio notional in USD.
pub static PORTFOLIO_NOTIONAL_USD: Lazy<Gauge> = Lazy::new(|| {
    register_gauge!(
        "solgrid_portfolio_notional_usd",
        "Current portfolio notional in USD"
    )
    .unwrap()
});

/// Last computed bundle tip in lamports.
pub static JITO_TIP_LAMPORTS: Lazy<IntGauge> = Lazy::new(|| {
    register_int_gauge!(
        "solgrid_jito_tip_lamports",
        "Last computed bundle tip in lamports"
    )
    .unwrap()
});

/// Metrics facade for easy access.
pub struct Metrics;

impl Metrics {
    /// Record a completed strategy cycle.
    pub fn cycle_completed() {
        CYCLES_TOTAL.inc();
    }

    /// Record a grid rebalance.
    pub fn rebalanced() {
        REBALANCES_TOTAL.inc();
    }

    /// Record a bundle submission.
    pub fn bundle_submitted() {
        BUNDLES_SUBMITTED_TOTAL.inc();
    }

    /// Record a risk gate block.
    pub fn gate_blocked(gate: &str) {
        GATE_BLOCKED_TOTAL.with_label_values(&[gate]).inc();
    }

    /// Update the pivot gauge.
    pub fn pivot(pivot_usd: f64) {
        PIVOT_USD.set(pivot_usd);
    }

    /// Update the portfolio notional gauge.
    pub fn portfolio_notional(notional_usd: f64) {
        PORTFOLIO_NOTIONAL_USD.set(notional_usd);
    }

    /// Update the tip gauge.
    pub fn jito_tip(lamports: u64) {
        JITO_TIP_LAMPORTS.set(lamports as i64);
    }
}

//! Rebalance decision.
//!
//! Two gates stand between a cycle and an actual grid rebuild. The
//! risk gate comes first and vetoes a rebalance regardless of how far
//! the portfolio has drifted; the drift check only runs once the gate
//! has passed. `should_rebuild` then decides whether the resting grid
//! is replaced: mandatory on the resync interval, otherwise only when
//! the pivot has moved far enough.

use std::time::{Duration, Instant};

use parking_lot::Mutex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use solgrid_core::{total_notional, AssetPosition, Price};
use solgrid_fiat::{FiatManager, QuoteSource};
use solgrid_risk::RiskManager;
use solgrid_telemetry::Metrics;
use tracing::{debug, info, warn};

use crate::error::AppResult;

#[derive(Debug, Clone, Copy)]
struct GridState {
    rebuilt_at: Instant,
    pivot: Price,
}

/// Decides when the strategy acts.
pub struct RebalanceOrchestrator {
    risk: RiskManager,
    fiat: FiatManager,
    rebalance_threshold_bps: Decimal,
    rebuild_threshold_bps: Decimal,
    max_grid_age: Duration,
    last_grid: Mutex<Option<GridState>>,
}

impl RebalanceOrchestrator {
    pub fn new(
        risk: RiskManager,
        fiat: FiatManager,
        rebalance_threshold_bps: Decimal,
        rebuild_threshold_bps: Decimal,
        max_grid_age: Duration,
    ) -> Self {
        Self {
            risk,
            fiat,
            rebalance_threshold_bps,
            rebuild_threshold_bps,
            max_grid_age,
            last_grid: Mutex::new(None),
        }
    }

    pub fn risk(&self) -> &RiskManager {
        &self.risk
    }

    pub fn fiat(&self) -> &FiatManager {
        &self.fiat
    }

    /// Whether the portfolio needs rebalancing.
    ///
    /// The notional gate runs first and its veto is absolute: a
    /// blocked portfolio is never rebalanced, whatever the drift.
    /// The quote is fallback-aware per the fiat policy.
    pub async fn evaluate(
        &self,
        positions: &[AssetPosition],
        source: &dyn QuoteSource,
        pair: &str,
    ) -> AppResult<bool> {
        let notional = total_notional(positions);
        Metrics::portfolio_notional(notional.to_f64().unwrap_or(0.0));

        if !self.risk.check_notional(notional) {
            Metrics::gate_blocked("notional");
            warn!(%notional, "rebalance vetoed by notional gate");
            return Ok(false);
        }

        let quote = self.fiat.fetch_quote(source, pair).await?;
        if quote.is_fallback() {
            warn!(%pair, price = %quote.price, "rebalance evaluation using fallback quote");
        }

        let denominator = quote.price.inner().max(Decimal::ONE);
        let drift_bps = notional.abs() / denominator * Decimal::from(10000);
        let needed = drift_bps >= self.rebalance_threshold_bps;
        debug!(
            %notional,
            %drift_bps,
            threshold = %self.rebalance_threshold_bps,
            needed,
            "rebalance evaluated"
        );
        Ok(needed)
    }

    /// Whether the resting grid should be torn down and rebuilt.
    ///
    /// A grid older than `max_grid_age` is always rebuilt; inside the
    /// window a rebuild happens only when the pivot has moved by at
    /// least `rebuild_threshold_bps`.
    pub fn should_rebuild(&self, current_pivot: Price) -> bool {
        let last = self.last_grid.lock();
        let Some(state) = *last else {
            return true;
        };

        if state.rebuilt_at.elapsed() >= self.max_grid_age {
            info!("grid past mandatory resync age, rebuilding");
            return true;
        }

        match current_pivot.bps_from(state.pivot) {
            Some(move_bps) => {
                let rebuild = move_bps.abs() >= self.rebuild_threshold_bps;
                debug!(
                    %move_bps,
                    threshold = %self.rebuild_threshold_bps,
                    rebuild,
                    "pivot move checked"
                );
                rebuild
            }
            // A zero previous pivot cannot anchor a move check
            None => true,
        }
    }

    /// Record a completed rebuild at the given pivot.
    pub fn mark_rebuilt(&self, pivot: Price) {
        *self.last_grid.lock() = Some(GridState {
            rebuilt_at: Instant::now(),
            pivot,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use solgrid_fiat::{FiatPolicy, MockQuoteSource};
    use solgrid_risk::RiskLimits;

    fn positions(notional: Decimal) -> Vec<AssetPosition> {
        vec![AssetPosition::new(
            "SOL",
            solgrid_core::Size::new(dec!(1)),
            notional,
        )]
    }

    fn orchestrator(max_notional: Decimal) -> RebalanceOrchestrator {
        RebalanceOrchestrator::new(
            RiskManager::new(RiskLimits {
                max_notional_usd: max_notional,
                ..RiskLimits::default()
            }),
            FiatManager::new(FiatPolicy::default()),
            dec!(50),
            dec!(25),
            Duration::from_secs(3600),
        )
    }

    #[tokio::test]
    async fn test_gate_veto_overrides_drift() {
        let orch = orchestrator(dec!(100));
        let source = MockQuoteSource::returning(Price::new(dec!(150)));

        // Notional far above the limit AND far above the drift
        // threshold; the veto must still win.
        let needed = orch
            .evaluate(&positions(dec!(5000)), &source, "USD/SOL")
            .await
            .unwrap();
        assert!(!needed);
    }

    #[tokio::test]
    async fn test_drift_above_threshold_triggers() {
        let orch = orchestrator(dec!(100000));
        let source = MockQuoteSource::returning(Price::new(dec!(150)));

        // drift = 5000 / 150 * 10000 bps, way past 50
        let needed = orch
            .evaluate(&positions(dec!(5000)), &source, "USD/SOL")
            .await
            .unwrap();
        assert!(needed);
    }

    #[tokio::test]
    async fn test_small_drift_does_not_trigger() {
        let orch = orchestrator(dec!(100000));
        let source = MockQuoteSource::returning(Price::new(dec!(150)));

        // drift = 0.5 / 150 * 10000 = ~33 bps < 50
        let needed = orch
            .evaluate(&positions(dec!(0.5)), &source, "USD/SOL")
            .await
            .unwrap();
        assert!(!needed);
    }

    #[tokio::test]
    async fn test_evaluate_uses_fallback_quote() {
        let orch = orchestrator(dec!(100000));
        let source = MockQuoteSource::returning(Price::new(dec!(150)));
        orch.evaluate(&positions(dec!(5000)), &source, "USD/SOL")
            .await
            .unwrap();

        source.set_next(Err(solgrid_fiat::FiatError::Transport("down".into())));
        let needed = orch
            .evaluate(&positions(dec!(5000)), &source, "USD/SOL")
            .await
            .unwrap();
        assert!(needed);
    }

    #[test]
    fn test_first_cycle_always_rebuilds() {
        let orch = orchestrator(dec!(1000));
        assert!(orch.should_rebuild(Price::new(dec!(150))));
    }

    #[test]
    fn test_small_pivot_move_keeps_grid() {
        let orch = orchestrator(dec!(1000));
        orch.mark_rebuilt(Price::new(dec!(150)));

        // 10 bps move, threshold is 25
        assert!(!orch.should_rebuild(Price::new(dec!(150.15))));
        assert!(orch.should_rebuild(Price::new(dec!(151))));
    }

    #[test]
    fn test_mandatory_resync_ignores_pivot() {
        let orch = RebalanceOrchestrator::new(
            RiskManager::new(RiskLimits::default()),
            FiatManager::new(FiatPolicy::default()),
            dec!(50),
            dec!(25),
            Duration::ZERO,
        );
        orch.mark_rebuilt(Price::new(dec!(150)));
        assert!(orch.should_rebuild(Price::new(dec!(150))));
    }
}

//! Main application orchestration.
//!
//! Runs the strategy cycle on a fixed interval: pivot computation,
//! rebalance decision, grid rebuild, ledger apply, bundle submission.
//! There is no partial-state rollback; a cycle that fails midway is
//! logged and the next cycle's full rebuild restores consistency.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use solgrid_analytics::{PivotConfig, PivotEngine};
use solgrid_core::{AssetPosition, OrderTicket, Price, PricePoint, Size};
use solgrid_fiat::{FiatManager, QuoteSource};
use solgrid_jito::{build_bundle, calculate_tip, BundleSender};
use solgrid_mm::GridBuilder;
use solgrid_persistence::{MemoryStore, PivotCheckpoint, StateStore};
use solgrid_risk::RiskManager;
use solgrid_telemetry::Metrics;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::chain::{ChainClient, PaperVenue};
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::ledger::OrderLedger;
use crate::orchestrator::RebalanceOrchestrator;
use crate::rent::{should_sweep, TOKEN_ACCOUNT_RENT_LAMPORTS};
use crate::wallets::WalletPool;

const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Main application.
pub struct App {
    config: AppConfig,
    pivot_engine: PivotEngine,
    grid_builder: GridBuilder,
    orchestrator: RebalanceOrchestrator,
    ledger: OrderLedger,
    wallets: WalletPool,
    checkpoint: PivotCheckpoint,
    chain: Arc<dyn ChainClient>,
    quotes: Arc<dyn QuoteSource>,
    sender: Arc<dyn BundleSender>,
    /// One timestamped price sample per cycle; samples older than the
    /// lookback window are pruned on insert.
    history: Mutex<Vec<(DateTime<Utc>, PricePoint)>>,
    /// Serializes grid teardown/apply within a cycle.
    cycle_guard: Mutex<()>,
    cancel: CancellationToken,
    started_at: DateTime<Utc>,
}

impl App {
    /// Wire the application from configuration and collaborators.
    pub fn new(
        config: AppConfig,
        chain: Arc<dyn ChainClient>,
        quotes: Arc<dyn QuoteSource>,
        sender: Arc<dyn BundleSender>,
        store: Arc<dyn StateStore>,
    ) -> AppResult<Self> {
        let pivot_engine = PivotEngine::new(PivotConfig {
            target_allocation_usd: config.strategy.target_allocation_usd,
            lookback_days: config.strategy.lookback_days,
            fade_in_days: config.strategy.fade_in_days,
        })?;
        let grid_builder = GridBuilder::new(config.grid.clone());
        let orchestrator = RebalanceOrchestrator::new(
            RiskManager::new(config.risk.clone()),
            FiatManager::new(config.fiat.clone()),
            config.strategy.rebalance_threshold_bps,
            config.strategy.rebuild_threshold_bps,
            Duration::from_secs(config.strategy.max_grid_age_secs),
        );
        let wallets = WalletPool::new(config.wallets.identities.clone(), config.wallets.seed)?;
        let checkpoint = PivotCheckpoint::new(store);

        Ok(Self {
            config,
            pivot_engine,
            grid_builder,
            orchestrator,
            ledger: OrderLedger::new(),
            wallets,
            checkpoint,
            chain,
            quotes,
            sender,
            history: Mutex::new(Vec::new()),
            cycle_guard: Mutex::new(()),
            cancel: CancellationToken::new(),
            started_at: Utc::now(),
        })
    }

    /// Wire a paper-mode application with an in-process venue.
    pub fn paper(config: AppConfig) -> AppResult<Self> {
        let venue = Arc::new(PaperVenue::new(
            config.strategy.paper_price,
            config.strategy.paper_balance_lamports,
        ));
        Self::new(
            config,
            venue.clone(),
            venue.clone(),
            venue,
            Arc::new(MemoryStore::new()),
        )
    }

    /// Token observed by external shutdown handlers.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn ledger(&self) -> &OrderLedger {
        &self.ledger
    }

    /// Run the strategy loop until cancelled.
    pub async fn run(&self) -> AppResult<()> {
        if self.config.persistence.checkpoint_enabled {
            if let Some(pivot) = self.checkpoint.load().await? {
                // Restored pivot anchors the history until live samples
                // accumulate.
                self.record_price_at(pivot, Utc::now());
            }
        }

        let mut interval =
            tokio::time::interval(Duration::from_secs(self.config.strategy.cycle_interval_secs));
        info!(
            pair = %self.config.strategy.pair,
            interval_secs = self.config.strategy.cycle_interval_secs,
            mode = ?self.config.run_mode,
            "strategy loop started"
        );

        loop {
            tokio::select! {
                _ = self.cancel.cancelled() => {
                    info!("shutdown requested, stopping strategy loop");
                    break;
                }
                _ = interval.tick() => {
                    if let Err(e) = self.run_cycle().await {
                        error!(error = %e, "cycle failed");
                    }
                }
            }
        }

        self.ledger.cancel_all();
        Ok(())
    }

    /// One full strategy cycle.
    async fn run_cycle(&self) -> AppResult<()> {
        let pair = self.config.strategy.pair.as_str();

        let price = match self.chain.get_price(pair).await {
            Ok(price) => price,
            Err(e) => {
                warn!(error = %e, "price fetch failed, skipping cycle");
                return Ok(());
            }
        };
        self.record_price(Price::new(price));

        let wallet = self.wallets.next_wallet().to_string();
        let balance = match self.chain.get_balance(&wallet).await {
            Ok(balance) => balance,
            Err(e) => {
                warn!(error = %e, %wallet, "balance fetch failed, skipping cycle");
                return Ok(());
            }
        };
        let quantity = Size::new(Decimal::from(balance) / Decimal::from(LAMPORTS_PER_SOL));
        let positions = vec![AssetPosition::new(
            pair.to_string(),
            quantity,
            quantity.notional(Price::new(price)),
        )];

        let history: Vec<PricePoint> = self.history.lock().iter().map(|(_, p)| *p).collect();
        let pivot =
            self.pivot_engine
                .compute_pivot(&positions, &history, self.days_since_start());
        Metrics::pivot(pivot.inner().to_f64().unwrap_or(0.0));
        if self.config.persistence.checkpoint_enabled {
            self.checkpoint.save(pivot).await?;
        }

        if !self
            .orchestrator
            .evaluate(&positions, self.quotes.as_ref(), pair)
            .await?
        {
            debug!("no rebalance needed");
            Metrics::cycle_completed();
            return Ok(());
        }

        if !self.orchestrator.should_rebuild(pivot) {
            debug!("grid still valid, skipping rebuild");
            Metrics::cycle_completed();
            return Ok(());
        }

        let tickets = self.rebuild_grid(pivot, quantity)?;
        self.orchestrator.mark_rebuilt(pivot);
        Metrics::rebalanced();

        if self.config.jito.enabled && !tickets.is_empty() {
            self.submit_bundle(&tickets).await?;
        }

        Metrics::cycle_completed();
        Ok(())
    }

    /// Tear down the resting grid and place the new one.
    ///
    /// Fully synchronous under the cycle guard; ledger mutation never
    /// interleaves with another rebuild.
    fn rebuild_grid(&self, pivot: Price, current_position: Size) -> AppResult<Vec<OrderTicket>> {
        let _guard = self.cycle_guard.lock();

        let canceled = self.ledger.cancel_all();
        let reclaimable = canceled as u64 * TOKEN_ACCOUNT_RENT_LAMPORTS;
        if should_sweep(
            reclaimable,
            self.ledger.live_count(),
            TOKEN_ACCOUNT_RENT_LAMPORTS,
        ) {
            info!(reclaimable, "rent sweep due");
        }

        let grid = self
            .grid_builder
            .build(pivot, Size::new(self.config.strategy.total_grid_size))?;

        let risk = self.orchestrator.risk();
        let mut admitted = Vec::with_capacity(grid.len());
        for level in grid {
            let signed_size = match level.side {
                solgrid_core::OrderSide::Buy => level.size.inner(),
                solgrid_core::OrderSide::Sell => -level.size.inner(),
            };
            match risk.validate_order(Size::new(signed_size), current_position, level.price) {
                Ok(()) => admitted.push(level),
                Err(e) => {
                    Metrics::gate_blocked("order");
                    warn!(error = %e, level = level.level_index, side = %level.side, "level rejected");
                }
            }
        }

        let tickets = self.ledger.place_grid(&admitted);
        for ticket in &tickets {
            self.ledger.acknowledge(&ticket.id)?;
        }
        Ok(tickets)
    }

    /// Assemble and submit the cycle's bundle, tip last.
    async fn submit_bundle(&self, tickets: &[OrderTicket]) -> AppResult<()> {
        let tip = calculate_tip(self.config.jito.congestion, self.config.jito.base_tip_lamports);
        Metrics::jito_tip(tip);

        let transactions: Vec<String> = tickets
            .iter()
            .map(|t| format!("order:{}", t.id))
            .collect();
        let bundle = build_bundle(&transactions, format!("tip:{tip}"))?;

        let id = self.sender.submit(bundle).await?;
        Metrics::bundle_submitted();
        info!(bundle_id = %id, orders = tickets.len(), tip, "bundle submitted");
        Ok(())
    }

    fn record_price(&self, price: Price) {
        self.record_price_at(price, Utc::now());
    }

    /// Record a sample and drop everything older than the lookback
    /// window. The window is measured in time, not sample count; cycle
    /// frequency does not change how much history the VWAP sees.
    fn record_price_at(&self, price: Price, now: DateTime<Utc>) {
        let cutoff = now - chrono::Duration::days(i64::from(self.config.strategy.lookback_days));
        let mut history = self.history.lock();
        history.push((now, PricePoint::new(price, Size::new(Decimal::ONE))));
        history.retain(|(at, _)| *at >= cutoff);
    }

    fn days_since_start(&self) -> u32 {
        (Utc::now() - self.started_at).num_days().max(0) as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, RunMode};
    use rust_decimal_macros::dec;
    use solgrid_persistence::PIVOT_STATE_KEY;

    fn test_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.run_mode = RunMode::Paper;
        config.strategy.paper_price = dec!(150);
        config.strategy.paper_balance_lamports = 10 * LAMPORTS_PER_SOL;
        config.strategy.rebalance_threshold_bps = dec!(50);
        config.grid.channel.orders_per_side = 2;
        config.risk.max_notional_usd = dec!(100000);
        config.risk.max_position = dec!(100);
        config
    }

    fn paper_parts(
        config: &AppConfig,
    ) -> (Arc<PaperVenue>, Arc<MemoryStore>) {
        (
            Arc::new(PaperVenue::new(
                config.strategy.paper_price,
                config.strategy.paper_balance_lamports,
            )),
            Arc::new(MemoryStore::new()),
        )
    }

    fn app_with(config: AppConfig) -> (App, Arc<PaperVenue>, Arc<MemoryStore>) {
        let (venue, store) = paper_parts(&config);
        let app = App::new(
            config,
            venue.clone(),
            venue.clone(),
            venue.clone(),
            store.clone(),
        )
        .unwrap();
        (app, venue, store)
    }

    #[tokio::test]
    async fn test_cycle_places_grid() {
        let (app, _venue, _store) = app_with(test_config());

        app.run_cycle().await.unwrap();
        // 2 levels per side
        assert_eq!(app.ledger().open_orders().len(), 4);
    }

    #[test]
    fn test_history_window_is_time_based() {
        // lookback_days = 365 by default
        let (app, _venue, _store) = app_with(test_config());
        let now = Utc::now();

        app.record_price_at(Price::new(dec!(100)), now - chrono::Duration::days(400));
        app.record_price_at(Price::new(dec!(110)), now - chrono::Duration::days(10));
        app.record_price_at(Price::new(dec!(120)), now);

        // The 400-day-old sample falls outside the window; sample
        // count alone never evicts anything.
        let history = app.history.lock();
        assert_eq!(history.len(), 2);
        assert!(history
            .iter()
            .all(|(_, p)| p.price.inner() >= dec!(110)));
    }

    #[tokio::test]
    async fn test_cycle_persists_pivot() {
        let (app, _venue, store) = app_with(test_config());

        app.run_cycle().await.unwrap();
        // Day-zero pivot is the current paper price
        assert_eq!(
            store.get_state(PIVOT_STATE_KEY).await.unwrap().as_deref(),
            Some("150")
        );
    }

    #[tokio::test]
    async fn test_notional_veto_blocks_grid() {
        let mut config = test_config();
        // 10 SOL * 150 = 1500 notional, above the limit
        config.risk.max_notional_usd = dec!(1000);
        let (app, _venue, _store) = app_with(config);

        app.run_cycle().await.unwrap();
        assert!(app.ledger().open_orders().is_empty());
    }

    #[tokio::test]
    async fn test_jito_bundle_submitted_when_enabled() {
        let mut config = test_config();
        config.jito.enabled = true;
        let (app, venue, _store) = app_with(config);

        app.run_cycle().await.unwrap();
        assert_eq!(venue.bundles_accepted(), 1);
    }

    #[tokio::test]
    async fn test_unmoved_pivot_skips_rebuild() {
        let (app, venue, _store) = {
            let mut config = test_config();
            config.jito.enabled = true;
            app_with(config)
        };

        app.run_cycle().await.unwrap();
        app.run_cycle().await.unwrap();
        // Paper price never moves, so the second cycle keeps the grid
        assert_eq!(venue.bundles_accepted(), 1);
        assert_eq!(app.ledger().open_orders().len(), 4);
    }

    #[tokio::test]
    async fn test_paper_wiring() {
        let app = App::paper(test_config()).unwrap();
        app.run_cycle().await.unwrap();
        assert_eq!(app.ledger().open_orders().len(), 4);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancellation() {
        let mut config = test_config();
        config.strategy.cycle_interval_secs = 3600;
        let (app, _venue, _store) = app_with(config);

        let token = app.cancellation_token();
        token.cancel();
        app.run().await.unwrap();
    }
}

//! Application configuration.

use crate::error::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solgrid_fiat::FiatPolicy;
use solgrid_jito::Congestion;
use solgrid_mm::GridConfig;
use solgrid_risk::RiskLimits;
use std::path::Path;

/// Operating mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Paper trading: orders are acknowledged in-process, nothing
    /// leaves the machine.
    #[default]
    Paper,
    /// Live trading against a real chain transport.
    Live,
}

/// Strategy parameters for the grid loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Trading pair, quote over base (e.g. "SOL/USDC").
    #[serde(default = "default_pair")]
    pub pair: String,

    /// Seconds between strategy cycles.
    #[serde(default = "default_cycle_interval_secs")]
    pub cycle_interval_secs: u64,

    /// Portfolio drift (bps) at which a rebalance is needed.
    #[serde(default = "default_rebalance_threshold_bps")]
    pub rebalance_threshold_bps: Decimal,

    /// Pivot move (bps) at which the resting grid is rebuilt.
    #[serde(default = "default_rebuild_threshold_bps")]
    pub rebuild_threshold_bps: Decimal,

    /// Mandatory grid resync interval regardless of pivot movement.
    #[serde(default = "default_max_grid_age_secs")]
    pub max_grid_age_secs: u64,

    /// Total base size spread across the whole grid.
    #[serde(default = "default_total_grid_size")]
    pub total_grid_size: Decimal,

    /// Target exposure in USD; also the pivot fallback when no market
    /// data exists yet.
    #[serde(default = "default_target_allocation_usd")]
    pub target_allocation_usd: Decimal,

    /// History window in days fed into the VWAP.
    #[serde(default = "default_lookback_days")]
    pub lookback_days: u32,

    /// Pivot fade-in window in days. Zero disables fade-in.
    #[serde(default = "default_fade_in_days")]
    pub fade_in_days: u32,

    /// Fixed price used by the paper venue.
    #[serde(default = "default_paper_price")]
    pub paper_price: Decimal,

    /// Fixed wallet balance in lamports used by the paper venue.
    #[serde(default = "default_paper_balance_lamports")]
    pub paper_balance_lamports: u64,
}

fn default_pair() -> String {
    "SOL/USDC".to_string()
}
fn default_cycle_interval_secs() -> u64 {
    60
}
fn default_rebalance_threshold_bps() -> Decimal {
    Decimal::from(50)
}
fn default_rebuild_threshold_bps() -> Decimal {
    Decimal::from(25)
}
fn default_max_grid_age_secs() -> u64 {
    3600
}
fn default_total_grid_size() -> Decimal {
    Decimal::from(4)
}
fn default_target_allocation_usd() -> Decimal {
    Decimal::from(1000)
}
fn default_lookback_days() -> u32 {
    365
}
fn default_fade_in_days() -> u32 {
    30
}
fn default_paper_price() -> Decimal {
    Decimal::from(150)
}
fn default_paper_balance_lamports() -> u64 {
    10_000_000_000
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            pair: default_pair(),
            cycle_interval_secs: default_cycle_interval_secs(),
            rebalance_threshold_bps: default_rebalance_threshold_bps(),
            rebuild_threshold_bps: default_rebuild_threshold_bps(),
            max_grid_age_secs: default_max_grid_age_secs(),
            total_grid_size: default_total_grid_size(),
            target_allocation_usd: default_target_allocation_usd(),
            lookback_days: default_lookback_days(),
            fade_in_days: default_fade_in_days(),
            paper_price: default_paper_price(),
            paper_balance_lamports: default_paper_balance_lamports(),
        }
    }
}

/// Bundle submission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JitoConfig {
    /// Whether bundles are assembled and submitted at all.
    #[serde(default)]
    pub enabled: bool,

    /// Base tip in lamports before congestion multipliers.
    #[serde(default = "default_base_tip_lamports")]
    pub base_tip_lamports: u64,

    /// Congestion level assumed when no live signal is wired.
    #[serde(default)]
    pub congestion: Congestion,

    /// Block-engine endpoint.
    #[serde(default = "default_block_engine_url")]
    pub block_engine_url: String,
}

fn default_base_tip_lamports() -> u64 {
    5_000_000
}
fn default_block_engine_url() -> String {
    "https://mainnet.block-engine.jito.wtf".to_string()
}

impl Default for JitoConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            base_tip_lamports: default_base_tip_lamports(),
            congestion: Congestion::default(),
            block_engine_url: default_block_engine_url(),
        }
    }
}

/// State persistence configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistenceConfig {
    /// Whether the pivot checkpoint is saved and restored.
    #[serde(default = "default_checkpoint_enabled")]
    pub checkpoint_enabled: bool,
}

fn default_checkpoint_enabled() -> bool {
    true
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            checkpoint_enabled: default_checkpoint_enabled(),
        }
    }
}

/// Wallet pool configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletsConfig {
    /// Wallet identities eligible for order submission.
    #[serde(default = "default_identities")]
    pub identities: Vec<String>,

    /// Seed for deterministic wallet rotation.
    #[serde(default = "default_wallet_seed")]
    pub seed: u64,
}

fn default_identities() -> Vec<String> {
    vec!["paper-wallet".to_string()]
}
fn default_wallet_seed() -> u64 {
    42
}

impl Default for WalletsConfig {
    fn default() -> Self {
        Self {
            identities: default_identities(),
            seed: default_wallet_seed(),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub run_mode: RunMode,

    #[serde(default)]
    pub strategy: StrategyConfig,

    #[serde(default)]
    pub grid: GridConfig,

    #[serde(default)]
    pub risk: RiskLimits,

    #[serde(default)]
    pub fiat: FiatPolicy,

    #[serde(default)]
    pub jito: JitoConfig,

    #[serde(default)]
    pub persistence: PersistenceConfig,

    #[serde(default)]
    pub wallets: WalletsConfig,
}

impl AppConfig {
    /// Load from the given path, falling back to defaults when the
    /// file does not exist.
    pub fn from_file_or_default(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::warn!(path = %path.display(), "Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load from a specific file.
    pub fn from_file(path: impl AsRef<Path>) -> AppResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| AppError::Config(format!("Failed to read config: {e}")))?;

        toml::from_str(&content)
            .map_err(|e| AppError::Config(format!("Failed to parse config: {e}")))
    }

    /// Check if in paper mode.
    pub fn is_paper_mode(&self) -> bool {
        self.run_mode == RunMode::Paper
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use solgrid_mm::GridMode;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.run_mode, RunMode::Paper);
        assert_eq!(config.strategy.cycle_interval_secs, 60);
        assert_eq!(config.strategy.rebalance_threshold_bps, dec!(50));
        assert_eq!(config.jito.base_tip_lamports, 5_000_000);
        assert!(!config.jito.enabled);
        assert!(config.persistence.checkpoint_enabled);
        assert_eq!(config.wallets.identities, vec!["paper-wallet"]);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.run_mode, RunMode::Paper);
        assert_eq!(config.grid.mode, GridMode::ChannelWidth);
        assert_eq!(config.risk.max_notional_usd, dec!(1000));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let toml_str = r#"
run_mode = "live"

[strategy]
pair = "BONK/USDC"
rebalance_threshold_bps = 100

[jito]
enabled = true
congestion = "high"

[grid]
mode = "fixed-spacing"
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.run_mode, RunMode::Live);
        assert_eq!(config.strategy.pair, "BONK/USDC");
        assert_eq!(config.strategy.rebalance_threshold_bps, dec!(100));
        assert!(config.jito.enabled);
        assert_eq!(config.jito.congestion, solgrid_jito::Congestion::High);
        assert_eq!(config.grid.mode, GridMode::FixedSpacing);
        // Untouched sections keep their defaults
        assert_eq!(config.strategy.cycle_interval_secs, 60);
        assert_eq!(config.fiat.injection_amount, dec!(250));
    }

    #[test]
    fn test_round_trip() {
        let config = AppConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.strategy.total_grid_size, config.strategy.total_grid_size);
        assert_eq!(parsed.jito.base_tip_lamports, config.jito.base_tip_lamports);
    }
}

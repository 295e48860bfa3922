//! Grid market-making bot for a token on a Solana DEX.
//!
//! Main application that orchestrates all components:
//! - Pivot computation from trade history
//! - Grid ladder construction around the pivot
//! - Risk gating and per-order validation
//! - Fiat buffer policy
//! - Bundle assembly and submission
//! - Pivot checkpointing across restarts

pub mod app;
pub mod chain;
pub mod config;
pub mod error;
pub mod ledger;
pub mod orchestrator;
pub mod rent;
pub mod wallets;

pub use app::App;
pub use config::{AppConfig, RunMode};
pub use error::{AppError, AppResult};

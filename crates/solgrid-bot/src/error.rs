//! Application error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Core error: {0}")]
    Core(#[from] solgrid_core::CoreError),

    #[error("Analytics error: {0}")]
    Analytics(#[from] solgrid_analytics::AnalyticsError),

    #[error("Grid error: {0}")]
    Grid(#[from] solgrid_mm::GridError),

    #[error("Risk error: {0}")]
    Risk(#[from] solgrid_risk::RiskError),

    #[error("Fiat error: {0}")]
    Fiat(#[from] solgrid_fiat::FiatError),

    #[error("Bundle error: {0}")]
    Jito(#[from] solgrid_jito::JitoError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] solgrid_persistence::PersistenceError),

    #[error("Telemetry error: {0}")]
    Telemetry(#[from] solgrid_telemetry::TelemetryError),

    #[error("Chain error: {0}")]
    Chain(#[from] crate::chain::ChainError),

    #[error("Unknown order: {0}")]
    UnknownOrder(String),
}

pub type AppResult<T> = Result<T, AppError>;

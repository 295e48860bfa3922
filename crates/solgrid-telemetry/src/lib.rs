//! Prometheus metrics and structured logging for solgrid.
//!
//! - Prometheus metrics for rebalance cycles, bundle submission, risk
//! - Structured JSON logging with tracing

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::{TelemetryError, TelemetryResult};
pub use logging::init_logging;
pub use metrics::Metrics;

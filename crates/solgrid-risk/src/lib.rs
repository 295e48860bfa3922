//! Hard risk limits.
//!
//! Two distinct admission surfaces, both required:
//! - `check_notional`: a non-throwing boolean gate used by the
//!   rebalance orchestrator.
//! - `validate_order`: a throwing validator applied to each order
//!   immediately before submission.
//!
//! They are not interchangeable; the gate protects the portfolio-level
//! decision, the validator protects individual orders.

pub mod error;
pub mod manager;

pub use error::{RiskError, RiskResult};
pub use manager::{RiskLimits, RiskManager};

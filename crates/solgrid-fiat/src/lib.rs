//! Fiat buffer management for the quote-currency reserve.
//!
//! Policy math lives in `manager`; live quote fetching with an explicit
//! fallback outcome lives in `quote`, so callers can always tell
//! "used fallback" apart from a genuine live quote.

pub mod error;
pub mod manager;
pub mod quote;

pub use error::{FiatError, FiatResult};
pub use manager::{FiatManager, FiatPolicy, QuoteFailurePolicy};
pub use quote::{MockQuoteSource, QuoteOutcome, QuoteProvenance, QuoteSource};

//! Quote source seam with explicit fallback provenance.
//!
//! A failed live fetch never propagates when the fallback policy is
//! active; instead the outcome carries `Fallback` provenance so tests
//! and callers can distinguish it from a genuine quote.

use std::pin::Pin;
use std::sync::Arc;

use crate::error::FiatResult;
use solgrid_core::Price;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Where a quoted price came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteProvenance {
    /// Fetched live from the source.
    Live,
    /// Last-known price substituted after a fetch failure.
    Fallback { reason: String },
}

/// A quoted price together with its provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteOutcome {
    pub price: Price,
    pub provenance: QuoteProvenance,
}

impl QuoteOutcome {
    pub fn live(price: Price) -> Self {
        Self {
            price,
            provenance: QuoteProvenance::Live,
        }
    }

    pub fn fallback(price: Price, reason: impl Into<String>) -> Self {
        Self {
            price,
            provenance: QuoteProvenance::Fallback {
                reason: reason.into(),
            },
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.provenance, QuoteProvenance::Fallback { .. })
    }
}

/// External price feed for a fiat pair (e.g. "USD/SOL").
pub trait QuoteSource: Send + Sync {
    /// Fetch the current price for a pair. Transport failures surface
    /// as `FiatError::Transport`.
    fn quote(&self, pair: &str) -> BoxFuture<'_, FiatResult<Price>>;
}

/// Arc wrapper for QuoteSource trait objects.
pub type DynQuoteSource = Arc<dyn QuoteSource>;

/// Mock quote source for tests.
#[derive(Debug)]
pub struct MockQuoteSource {
    next: parking_lot::Mutex<FiatResult<Price>>,
    calls: parking_lot::Mutex<Vec<String>>,
}

impl MockQuoteSource {
    pub fn returning(price: Price) -> Self {
        Self {
            next: parking_lot::Mutex::new(Ok(price)),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            next: parking_lot::Mutex::new(Err(crate::error::FiatError::Transport(reason.into()))),
            calls: parking_lot::Mutex::new(Vec::new()),
        }
    }

    /// Set the next fetch result.
    pub fn set_next(&self, result: FiatResult<Price>) {
        *self.next.lock() = result;
    }

    /// Pairs requested so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }
}

impl QuoteSource for MockQuoteSource {
    fn quote(&self, pair: &str) -> BoxFuture<'_, FiatResult<Price>> {
        let pair = pair.to_string();
        Box::pin(async move {
            self.calls.lock().push(pair);
            match &*self.next.lock() {
                Ok(price) => Ok(*price),
                Err(crate::error::FiatError::Transport(reason)) => {
                    Err(crate::error::FiatError::Transport(reason.clone()))
                }
                Err(crate::error::FiatError::QuoteUnavailable { pair, reason }) => {
                    Err(crate::error::FiatError::QuoteUnavailable {
                        pair: pair.clone(),
                        reason: reason.clone(),
                    })
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_mock_source_records_calls() {
        let source = MockQuoteSource::returning(Price::new(dec!(150)));
        let price = source.quote("USD/SOL").await.unwrap();
        assert_eq!(price.inner(), dec!(150));
        assert_eq!(source.calls(), vec!["USD/SOL".to_string()]);
    }

    #[test]
    fn test_outcome_provenance() {
        let live = QuoteOutcome::live(Price::new(dec!(150)));
        assert!(!live.is_fallback());

        let fb = QuoteOutcome::fallback(Price::new(dec!(149)), "timeout");
        assert!(fb.is_fallback());
    }
}

//! Chain read seam and the paper venue.
//!
//! `ChainClient` abstracts the RPC reads the strategy needs. Transport
//! failures are recoverable: the cycle skips or falls back rather than
//! aborting the loop.

use std::pin::Pin;
use std::sync::Arc;

use rust_decimal::Decimal;
use solgrid_core::Price;
use solgrid_fiat::{FiatResult, QuoteSource};
use solgrid_jito::{Bundle, BundleSender, JitoResult};
use thiserror::Error;
use tracing::info;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

#[derive(Debug, Error)]
pub enum ChainError {
    #[error("transport failure: {0}")]
    Transport(String),

    #[error("account not found: {0}")]
    NotFound(String),
}

pub type ChainResult<T> = Result<T, ChainError>;

/// Read-only chain access needed by the strategy loop.
///
/// Returned futures are `'static` so implementations snapshot what
/// they need up front; this also keeps the trait mockable.
#[cfg_attr(test, mockall::automock)]
pub trait ChainClient: Send + Sync {
    /// Lamport balance of the given owner.
    fn get_balance(&self, owner: &str) -> BoxFuture<'static, ChainResult<u64>>;

    /// Current pair price in quote currency.
    fn get_price(&self, pair: &str) -> BoxFuture<'static, ChainResult<Decimal>>;
}

/// Arc wrapper for ChainClient trait objects.
pub type DynChainClient = Arc<dyn ChainClient>;

/// In-process venue for paper mode.
///
/// Serves a fixed price and balance, quotes at the same price, and
/// acknowledges bundle submissions without any network.
#[derive(Debug)]
pub struct PaperVenue {
    price: Decimal,
    balance_lamports: u64,
    submitted: parking_lot::Mutex<u64>,
}

impl PaperVenue {
    pub fn new(price: Decimal, balance_lamports: u64) -> Self {
        Self {
            price,
            balance_lamports,
            submitted: parking_lot::Mutex::new(0),
        }
    }

    /// Number of bundles accepted so far.
    pub fn bundles_accepted(&self) -> u64 {
        *self.submitted.lock()
    }
}

impl ChainClient for PaperVenue {
    fn get_balance(&self, _owner: &str) -> BoxFuture<'static, ChainResult<u64>> {
        let balance = self.balance_lamports;
        Box::pin(async move { Ok(balance) })
    }

    fn get_price(&self, _pair: &str) -> BoxFuture<'static, ChainResult<Decimal>> {
        let price = self.price;
        Box::pin(async move { Ok(price) })
    }
}

impl QuoteSource for PaperVenue {
    fn quote(&self, _pair: &str) -> BoxFuture<'_, FiatResult<Price>> {
        Box::pin(async move { Ok(Price::new(self.price)) })
    }
}

impl BundleSender for PaperVenue {
    fn submit(&self, bundle: Bundle) -> BoxFuture<'_, JitoResult<String>> {
        Box::pin(async move {
            let mut count = self.submitted.lock();
            *count += 1;
            let id = format!("paper-bundle-{count}");
            info!(%id, size = bundle.len(), "paper venue accepted bundle");
            Ok(id)
        })
    }
}

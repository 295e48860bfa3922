//! Fiat buffer policy.
//!
//! Keeps the strategy solvent in quote currency: a required buffer is
//! derived from target exposure, injections are fixed-size (not
//! proportional top-ups), and a reserve-ratio check can trigger an
//! automatic conversion.

use crate::error::{FiatError, FiatResult};
use crate::quote::{QuoteOutcome, QuoteSource};
use parking_lot::Mutex;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use solgrid_core::Price;
use tracing::{debug, warn};

/// Behavior when a live quote fetch fails.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteFailurePolicy {
    /// Log and substitute the last-known price.
    #[default]
    Fallback,
    /// Propagate the failure to the caller.
    Fail,
}

/// Immutable fiat policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiatPolicy {
    /// Fraction of target exposure that must be held in reserve.
    #[serde(default = "default_buffer_ratio")]
    pub buffer_ratio: Decimal,

    /// Floor for the required buffer, in USD.
    #[serde(default = "default_min_buffer")]
    pub min_buffer: Decimal,

    /// Fixed injection amount in USD when the buffer is short.
    #[serde(default = "default_injection_amount")]
    pub injection_amount: Decimal,

    /// Reserve/total ratio below which auto-injection triggers.
    #[serde(default = "default_min_reserve_ratio")]
    pub min_reserve_ratio: Decimal,

    /// Fraction of realized profit eligible for conversion to reserve.
    #[serde(default = "default_max_fiat_allocation")]
    pub max_fiat_allocation: Decimal,

    /// What to do when a live quote fetch fails.
    #[serde(default)]
    pub on_quote_failure: QuoteFailurePolicy,
}

fn default_buffer_ratio() -> Decimal {
    Decimal::new(10, 2) // 0.10
}
fn default_min_buffer() -> Decimal {
    Decimal::from(100)
}
fn default_injection_amount() -> Decimal {
    Decimal::from(250)
}
fn default_min_reserve_ratio() -> Decimal {
    Decimal::new(30, 2) // 0.30
}
fn default_max_fiat_allocation() -> Decimal {
    Decimal::new(30, 2) // 0.30
}

impl Default for FiatPolicy {
    fn default() -> Self {
        Self {
            buffer_ratio: default_buffer_ratio(),
            min_buffer: default_min_buffer(),
            injection_amount: default_injection_amount(),
            min_reserve_ratio: default_min_reserve_ratio(),
            max_fiat_allocation: default_max_fiat_allocation(),
            on_quote_failure: QuoteFailurePolicy::default(),
        }
    }
}

/// Buffer-ratio policy over the quote-currency reserve.
pub struct FiatManager {
    policy: FiatPolicy,
    /// Last successfully fetched quote, used as the fallback.
    last_known: Mutex<Option<Price>>,
}

impl FiatManager {
    pub fn new(policy: FiatPolicy) -> Self {
        Self {
            policy,
            last_known: Mutex::new(None),
        }
    }

    pub fn policy(&self) -> &FiatPolicy {
        &self.policy
    }

    /// `max(min_buffer, target_exposure * buffer_ratio)`
    pub fn required_buffer(&self, target_exposure: Decimal) -> Decimal {
        (target_exposure * self.policy.buffer_ratio).max(self.policy.min_buffer)
    }

    /// Whether available reserve falls short of the required buffer.
    pub fn needs_injection(&self, available: Decimal, target_exposure: Decimal) -> bool {
        available < self.required_buffer(target_exposure)
    }

    /// The fixed configured injection amount if needed, else zero.
    /// Deliberately not a proportional top-up.
    pub fn injection_amount(&self, available: Decimal, target_exposure: Decimal) -> Decimal {
        if self.needs_injection(available, target_exposure) {
            self.policy.injection_amount
        } else {
            Decimal::ZERO
        }
    }

    /// Reserve-ratio trigger: `reserve/total < min_reserve_ratio`.
    /// Returns false for a zero total balance.
    pub fn check_auto_injection(&self, reserve_balance: Decimal, total_balance: Decimal) -> bool {
        if total_balance.is_zero() {
            return false;
        }
        reserve_balance / total_balance < self.policy.min_reserve_ratio
    }

    /// Fraction of realized profit eligible for conversion to the
    /// reserve currency. Non-positive profit yields zero.
    pub fn calculate_dividend(&self, profit: Decimal) -> Decimal {
        if profit <= Decimal::ZERO {
            return Decimal::ZERO;
        }
        profit * self.policy.max_fiat_allocation
    }

    /// Seed the fallback price, e.g. from a persisted checkpoint.
    pub fn seed_last_known(&self, price: Price) {
        *self.last_known.lock() = Some(price);
    }

    /// Fetch a live quote, degrading per policy.
    ///
    /// With `Fallback`, a transport failure substitutes the last-known
    /// price and the outcome carries `Fallback` provenance; if no
    /// last-known price exists the failure propagates. With `Fail`,
    /// failures always propagate.
    pub async fn fetch_quote(
        &self,
        source: &dyn QuoteSource,
        pair: &str,
    ) -> FiatResult<QuoteOutcome> {
        match source.quote(pair).await {
            Ok(price) => {
                *self.last_known.lock() = Some(price);
                debug!(%pair, %price, "live quote fetched");
                Ok(QuoteOutcome::live(price))
            }
            Err(err) => match self.policy.on_quote_failure {
                QuoteFailurePolicy::Fail => Err(err),
                QuoteFailurePolicy::Fallback => {
                    let last = *self.last_known.lock();
                    match last {
                        Some(price) => {
                            warn!(%pair, %price, error = %err, "quote fetch failed, using last-known price");
                            Ok(QuoteOutcome::fallback(price, err.to_string()))
                        }
                        None => Err(FiatError::QuoteUnavailable {
                            pair: pair.to_string(),
                            reason: format!("no last-known price to fall back to: {err}"),
                        }),
                    }
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::MockQuoteSource;
    use rust_decimal_macros::dec;

    fn manager() -> FiatManager {
        FiatManager::new(FiatPolicy {
            buffer_ratio: dec!(0.1),
            min_buffer: dec!(100),
            injection_amount: dec!(250),
            min_reserve_ratio: dec!(0.3),
            max_fiat_allocation: dec!(0.3),
            on_quote_failure: QuoteFailurePolicy::Fallback,
        })
    }

    #[test]
    fn test_required_buffer() {
        let m = manager();
        assert_eq!(m.required_buffer(dec!(2000)), dec!(200));
        // Floor applies below min_buffer
        assert_eq!(m.required_buffer(dec!(500)), dec!(100));
    }

    #[test]
    fn test_needs_injection() {
        let m = manager();
        assert!(m.needs_injection(dec!(150), dec!(2000)));
        assert!(!m.needs_injection(dec!(200), dec!(2000)));
    }

    #[test]
    fn test_injection_is_fixed_not_proportional() {
        let m = manager();
        assert_eq!(m.injection_amount(dec!(150), dec!(2000)), dec!(250));
        assert_eq!(m.injection_amount(dec!(10), dec!(2000)), dec!(250));
        assert_eq!(m.injection_amount(dec!(500), dec!(2000)), dec!(0));
    }

    #[test]
    fn test_check_auto_injection() {
        let m = manager();
        assert!(m.check_auto_injection(dec!(20), dec!(100)));
        assert!(!m.check_auto_injection(dec!(40), dec!(100)));
        // Zero total never divides
        assert!(!m.check_auto_injection(dec!(0), dec!(0)));
    }

    #[test]
    fn test_calculate_dividend() {
        let m = manager();
        assert_eq!(m.calculate_dividend(dec!(100)), dec!(30.0));
        assert_eq!(m.calculate_dividend(dec!(-50)), dec!(0));
    }

    #[tokio::test]
    async fn test_fetch_quote_live() {
        let m = manager();
        let source = MockQuoteSource::returning(Price::new(dec!(150)));
        let outcome = m.fetch_quote(&source, "USD/SOL").await.unwrap();
        assert_eq!(outcome.price.inner(), dec!(150));
        assert!(!outcome.is_fallback());
    }

    #[tokio::test]
    async fn test_fetch_quote_falls_back_to_last_known() {
        let m = manager();
        let source = MockQuoteSource::returning(Price::new(dec!(150)));
        m.fetch_quote(&source, "USD/SOL").await.unwrap();

        source.set_next(Err(FiatError::Transport("rpc timeout".into())));
        let outcome = m.fetch_quote(&source, "USD/SOL").await.unwrap();
        assert_eq!(outcome.price.inner(), dec!(150));
        assert!(outcome.is_fallback());
    }

    #[tokio::test]
    async fn test_fetch_quote_no_fallback_available() {
        let m = manager();
        let source = MockQuoteSource::failing("down");
        let err = m.fetch_quote(&source, "USD/SOL").await.unwrap_err();
        assert!(matches!(err, FiatError::QuoteUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_fetch_quote_fail_fast_policy() {
        let m = FiatManager::new(FiatPolicy {
            on_quote_failure: QuoteFailurePolicy::Fail,
            ..FiatPolicy::default()
        });
        m.seed_last_known(Price::new(dec!(150)));

        let source = MockQuoteSource::failing("down");
        let err = m.fetch_quote(&source, "USD/SOL").await.unwrap_err();
        assert!(matches!(err, FiatError::Transport(_)));
    }
}

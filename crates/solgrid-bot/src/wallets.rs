//! Wallet rotation.
//!
//! Selection is deterministic from a configured seed, so a run can be
//! replayed wallet-for-wallet. The rotation is an LCG over the
//! identity list, not a random draw.

use parking_lot::Mutex;
use tracing::debug;

use crate::error::{AppError, AppResult};

// Knuth's MMIX multiplier/increment.
const LCG_MULTIPLIER: u64 = 6364136223846793005;
const LCG_INCREMENT: u64 = 1442695040888963407;

/// Seedable pool of order-submission identities.
#[derive(Debug)]
pub struct WalletPool {
    identities: Vec<String>,
    state: Mutex<u64>,
}

impl WalletPool {
    pub fn new(identities: Vec<String>, seed: u64) -> AppResult<Self> {
        if identities.is_empty() {
            return Err(AppError::Config(
                "wallet pool requires at least one identity".into(),
            ));
        }
        Ok(Self {
            identities,
            state: Mutex::new(seed),
        })
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Next identity in the deterministic rotation.
    pub fn next_wallet(&self) -> &str {
        let mut state = self.state.lock();
        *state = state
            .wrapping_mul(LCG_MULTIPLIER)
            .wrapping_add(LCG_INCREMENT);
        // High bits have the better statistical quality
        let idx = ((*state >> 33) as usize) % self.identities.len();
        let wallet = &self.identities[idx];
        debug!(%wallet, "wallet selected");
        wallet
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identities() -> Vec<String> {
        vec!["w1".into(), "w2".into(), "w3".into()]
    }

    #[test]
    fn test_empty_pool_rejected() {
        assert!(matches!(
            WalletPool::new(vec![], 42),
            Err(AppError::Config(_))
        ));
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = WalletPool::new(identities(), 42).unwrap();
        let b = WalletPool::new(identities(), 42).unwrap();

        let seq_a: Vec<_> = (0..10).map(|_| a.next_wallet().to_string()).collect();
        let seq_b: Vec<_> = (0..10).map(|_| b.next_wallet().to_string()).collect();
        assert_eq!(seq_a, seq_b);
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = WalletPool::new(identities(), 1).unwrap();
        let b = WalletPool::new(identities(), 2).unwrap();

        let seq_a: Vec<_> = (0..20).map(|_| a.next_wallet().to_string()).collect();
        let seq_b: Vec<_> = (0..20).map(|_| b.next_wallet().to_string()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_single_identity_always_selected() {
        let pool = WalletPool::new(vec!["only".into()], 7).unwrap();
        for _ in 0..5 {
            assert_eq!(pool.next_wallet(), "only");
        }
    }
}

//! Bundle assembly.

use crate::error::{JitoError, JitoResult};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Block-engine soft limit on transactions per bundle. Exceeding it is
/// logged, not rejected; the engine may still accept larger bundles.
pub const SOFT_BUNDLE_LIMIT: usize = 5;

/// An ordered set of signed transaction payloads plus the tip
/// transaction, submitted atomically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    /// Opaque serialized transactions, tip last.
    pub transactions: Vec<String>,
}

impl Bundle {
    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// The tip transaction, always the last element.
    pub fn tip_transaction(&self) -> Option<&str> {
        self.transactions.last().map(String::as_str)
    }
}

/// Assemble a bundle with the tip transaction appended last.
///
/// Fails with `EmptyBundle` when there is no non-tip transaction.
/// A bundle above the soft limit is returned with a warning; the
/// "warn, don't reject" behavior is deliberate.
pub fn build_bundle(transactions: &[String], tip_transaction: String) -> JitoResult<Bundle> {
    if transactions.is_empty() {
        return Err(JitoError::EmptyBundle);
    }

    let mut all = Vec::with_capacity(transactions.len() + 1);
    all.extend_from_slice(transactions);
    all.push(tip_transaction);

    if all.len() > SOFT_BUNDLE_LIMIT {
        warn!(
            size = all.len(),
            limit = SOFT_BUNDLE_LIMIT,
            "bundle exceeds recommended size"
        );
    }

    Ok(Bundle { transactions: all })
}

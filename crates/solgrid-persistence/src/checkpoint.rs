//! Pivot checkpoint.
//!
//! The pivot anchor is the single value the strategy cannot cheaply
//! recompute after a restart, so it is persisted after every update.
//! It is stored as the canonical decimal string produced by
//! `Decimal::to_string`, which parses back losslessly.

use std::str::FromStr;
use std::sync::Arc;

use rust_decimal::Decimal;
use solgrid_core::Price;
use tracing::{debug, info};

use crate::error::{PersistenceError, PersistenceResult};
use crate::store::StateStore;

/// Store key under which the pivot anchor lives.
pub const PIVOT_STATE_KEY: &str = "pivot";

/// Persists and restores the pivot anchor.
pub struct PivotCheckpoint {
    store: Arc<dyn StateStore>,
}

impl PivotCheckpoint {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Persist the pivot as its canonical decimal string.
    pub async fn save(&self, pivot: Price) -> PersistenceResult<()> {
        let encoded = pivot.inner().to_string();
        self.store.set_state(PIVOT_STATE_KEY, &encoded).await?;
        debug!(pivot = %encoded, "pivot checkpoint saved");
        Ok(())
    }

    /// Restore the last persisted pivot, if any.
    ///
    /// A stored value that fails to parse as a decimal is `Corrupt`;
    /// an absent key is simply `None`.
    pub async fn load(&self) -> PersistenceResult<Option<Price>> {
        let Some(raw) = self.store.get_state(PIVOT_STATE_KEY).await? else {
            info!("no pivot checkpoint found, starting fresh");
            return Ok(None);
        };

        let value = Decimal::from_str(&raw).map_err(|e| PersistenceError::Corrupt {
            key: PIVOT_STATE_KEY.to_string(),
            detail: format!("'{raw}' is not a decimal: {e}"),
        })?;
        info!(pivot = %value, "pivot checkpoint restored");
        Ok(Some(Price::new(value)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_save_then_load_is_lossless() {
        let store = Arc::new(MemoryStore::new());
        let checkpoint = PivotCheckpoint::new(store.clone());

        checkpoint.save(Price::new(dec!(151.250))).await.unwrap();

        // Stored form is the canonical string, trailing zeros included.
        let raw = store.get_state(PIVOT_STATE_KEY).await.unwrap();
        assert_eq!(raw.as_deref(), Some("151.250"));

        let restored = checkpoint.load().await.unwrap();
        assert_eq!(restored, Some(Price::new(dec!(151.250))));
    }

    #[tokio::test]
    async fn test_load_without_checkpoint_is_none() {
        let checkpoint = PivotCheckpoint::new(Arc::new(MemoryStore::new()));
        assert_eq!(checkpoint.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_value_is_an_error() {
        let store = Arc::new(MemoryStore::new());
        store.set_state(PIVOT_STATE_KEY, "not-a-number").await.unwrap();

        let checkpoint = PivotCheckpoint::new(store);
        let err = checkpoint.load().await.unwrap_err();
        assert!(matches!(err, PersistenceError::Corrupt { .. }));
    }
}

//! Key/value store seam.

use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::PersistenceResult;

/// Boxed future for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn std::future::Future<Output = T> + Send + 'a>>;

/// Durable string key/value store.
///
/// Keys and values are strings; callers serialize decimals to
/// canonical string form and must parse them back losslessly.
pub trait StateStore: Send + Sync {
    fn get_state(&self, key: &str) -> BoxFuture<'_, PersistenceResult<Option<String>>>;
    fn set_state(&self, key: &str, value: &str) -> BoxFuture<'_, PersistenceResult<()>>;
}

/// Arc wrapper for StateStore trait objects.
pub type DynStateStore = Arc<dyn StateStore>;

/// In-memory store for tests and paper mode.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: parking_lot::Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }
}

impl StateStore for MemoryStore {
    fn get_state(&self, key: &str) -> BoxFuture<'_, PersistenceResult<Option<String>>> {
        let key = key.to_string();
        Box::pin(async move { Ok(self.entries.lock().get(&key).cloned()) })
    }

    fn set_state(&self, key: &str, value: &str) -> BoxFuture<'_, PersistenceResult<()>> {
        let key = key.to_string();
        let value = value.to_string();
        Box::pin(async move {
            self.entries.lock().insert(key, value);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get_state("pivot").await.unwrap().is_none());

        store.set_state("pivot", "151.25").await.unwrap();
        assert_eq!(
            store.get_state("pivot").await.unwrap().as_deref(),
            Some("151.25")
        );

        // Overwrite wins
        store.set_state("pivot", "152").await.unwrap();
        assert_eq!(
            store.get_state("pivot").await.unwrap().as_deref(),
            Some("152")
        );
        assert_eq!(store.len(), 1);
    }
}

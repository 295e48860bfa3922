//! Durable strategy state.
//!
//! The store itself is an external collaborator; this crate owns the
//! seam (`StateStore`), an in-memory implementation for tests and
//! paper mode, and the pivot checkpoint that gives the strategy
//! continuity across restarts.

pub mod checkpoint;
pub mod error;
pub mod store;

pub use checkpoint::{PivotCheckpoint, PIVOT_STATE_KEY};
pub use error::{PersistenceError, PersistenceResult};
pub use store::{MemoryStore, StateStore};

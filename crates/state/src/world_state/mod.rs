//! Key-value world-state contract consumed by the asset registry.
//!
//! The registry only ever talks to a [`WorldState`]: point reads, writes,
//! deletes and an ordered range scan. Consensus, versioning and persistence
//! belong to the implementation. [`MemoryWorldState`] is the in-process
//! implementation used by the bundled host and by tests.

mod memory;

pub use memory::{MemoryWorldState, Transaction};

use async_trait::async_trait;

/// Errors raised by a world-state implementation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("world state unavailable: {0}")]
    Unavailable(String),

    #[error("invalid key: {0:?}")]
    InvalidKey(String),

    /// A key read by a transaction changed before it committed.
    #[error("read conflict on key {0}")]
    Conflict(String),

    #[error("range scan cursor already closed")]
    Closed,
}

/// One entry yielded by a range scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: Vec<u8>,
}

/// Transactional key-value store holding the current asset records.
///
/// `get_state` returns `None` for an absent key. Implementations may also
/// return an empty value; callers treat both the same way.
#[async_trait]
pub trait WorldState: Send + Sync {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    async fn del_state(&self, key: &str) -> Result<(), StoreError>;

    /// Open a cursor over `[start_key, end_key)` in key order. An empty bound
    /// is open-ended, so `("", "")` scans the whole namespace.
    ///
    /// The returned cursor holds store resources until [`StateIterator::close`]
    /// is called; wrap it in a [`ScanGuard`] to release it on every path.
    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator>, StoreError>;
}

/// Cursor returned by [`WorldState::get_state_by_range`].
#[async_trait]
pub trait StateIterator: Send {
    /// Next entry, or `None` once the range is exhausted.
    async fn next_entry(&mut self) -> Result<Option<KeyValue>, StoreError>;

    /// Release the cursor. Further calls to `next_entry` fail with
    /// [`StoreError::Closed`].
    fn close(&mut self) -> Result<(), StoreError>;
}

/// Scope guard around a range-scan cursor.
///
/// [`ScanGuard::close`] releases the cursor and reports the result. If the
/// guard is dropped first (early return, `?`, panic unwind) the cursor is
/// closed in `Drop` and a failure is only logged.
pub struct ScanGuard {
    cursor: Option<Box<dyn StateIterator>>,
}

impl ScanGuard {
    pub fn new(cursor: Box<dyn StateIterator>) -> Self {
        Self {
            cursor: Some(cursor),
        }
    }

    pub async fn next_entry(&mut self) -> Result<Option<KeyValue>, StoreError> {
        match self.cursor.as_mut() {
            Some(cursor) => cursor.next_entry().await,
            None => Err(StoreError::Closed),
        }
    }

    pub fn close(mut self) -> Result<(), StoreError> {
        match self.cursor.take() {
            Some(mut cursor) => cursor.close(),
            None => Ok(()),
        }
    }
}

impl Drop for ScanGuard {
    fn drop(&mut self) {
        if let Some(mut cursor) = self.cursor.take() {
            if let Err(err) = cursor.close() {
                tracing::warn!(error = %err, "Failed to close range scan cursor");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

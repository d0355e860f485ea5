//! In-memory, versioned world state.
//!
//! Keys are kept in lexicographic order. Every committed key records the
//! commit sequence number that last wrote it, which is what
//! [`Transaction::commit`] validates its read set against.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use super::{KeyValue, StateIterator, StoreError, WorldState};

#[derive(Debug, Clone)]
struct VersionedValue {
    value: Vec<u8>,
    version: u64,
}

#[derive(Debug, Default)]
struct Committed {
    entries: BTreeMap<String, VersionedValue>,
    sequence: u64,
}

impl Committed {
    fn version_of(&self, key: &str) -> Option<u64> {
        self.entries.get(key).map(|entry| entry.version)
    }

    /// Apply one batch of writes under a fresh sequence number.
    fn apply(&mut self, writes: BTreeMap<String, Option<Vec<u8>>>) -> u64 {
        self.sequence += 1;
        let version = self.sequence;
        for (key, write) in writes {
            match write {
                Some(value) => {
                    self.entries.insert(key, VersionedValue { value, version });
                }
                None => {
                    self.entries.remove(&key);
                }
            }
        }
        version
    }

    fn scan(&self, start_key: &str, end_key: &str) -> Vec<(String, VersionedValue)> {
        if !start_key.is_empty() && !end_key.is_empty() && start_key > end_key {
            return Vec::new();
        }
        self.entries
            .range::<str, _>(range_bounds(start_key, end_key))
            .map(|(key, entry)| (key.clone(), entry.clone()))
            .collect()
    }
}

fn range_bounds<'a>(start_key: &'a str, end_key: &'a str) -> (Bound<&'a str>, Bound<&'a str>) {
    let lower = if start_key.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Included(start_key)
    };
    let upper = if end_key.is_empty() {
        Bound::Unbounded
    } else {
        Bound::Excluded(end_key)
    };
    (lower, upper)
}

fn in_range(key: &str, start_key: &str, end_key: &str) -> bool {
    (start_key.is_empty() || key >= start_key) && (end_key.is_empty() || key < end_key)
}

fn check_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Committed store
// ---------------------------------------------------------------------------

/// Committed world state shared by all invocations.
///
/// Implements [`WorldState`] directly with autocommit semantics (each write
/// is its own commit). Use [`MemoryWorldState::begin`] to group reads and
/// writes of one invocation into a [`Transaction`].
#[derive(Debug, Default)]
pub struct MemoryWorldState {
    committed: RwLock<Committed>,
    open_cursors: Arc<AtomicUsize>,
}

impl MemoryWorldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a transaction over the current committed state.
    pub fn begin(&self) -> Transaction<'_> {
        Transaction {
            store: self,
            reads: Mutex::new(BTreeMap::new()),
            writes: Mutex::new(BTreeMap::new()),
        }
    }

    /// Number of committed keys.
    pub async fn key_count(&self) -> usize {
        self.committed.read().await.entries.len()
    }

    /// Sequence number of the latest commit (0 for a fresh store).
    pub async fn sequence(&self) -> u64 {
        self.committed.read().await.sequence
    }

    /// Number of range-scan cursors opened and not yet closed.
    pub fn open_cursors(&self) -> usize {
        self.open_cursors.load(Ordering::SeqCst)
    }

    fn cursor(&self, entries: Vec<KeyValue>) -> Box<dyn StateIterator> {
        self.open_cursors.fetch_add(1, Ordering::SeqCst);
        Box::new(MemoryCursor {
            entries: entries.into_iter(),
            open_cursors: Arc::clone(&self.open_cursors),
            closed: false,
        })
    }
}

#[async_trait]
impl WorldState for MemoryWorldState {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let committed = self.committed.read().await;
        Ok(committed.entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        check_key(key)?;
        let mut committed = self.committed.write().await;
        committed.apply(BTreeMap::from([(key.to_string(), Some(value))]));
        Ok(())
    }

    async fn del_state(&self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        let mut committed = self.committed.write().await;
        committed.apply(BTreeMap::from([(key.to_string(), None)]));
        Ok(())
    }

    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator>, StoreError> {
        let entries = self
            .committed
            .read()
            .await
            .scan(start_key, end_key)
            .into_iter()
            .map(|(key, entry)| KeyValue {
                key,
                value: entry.value,
            })
            .collect();
        Ok(self.cursor(entries))
    }
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// One invocation's view of the world state.
///
/// Writes are buffered and visible to later reads of the same transaction.
/// Nothing reaches the committed state until [`Transaction::commit`]
/// succeeds; dropping the transaction discards it.
#[derive(Debug)]
pub struct Transaction<'a> {
    store: &'a MemoryWorldState,
    /// Committed version observed for every key read (`None` = absent).
    reads: Mutex<BTreeMap<String, Option<u64>>>,
    /// Buffered writes (`None` = delete).
    writes: Mutex<BTreeMap<String, Option<Vec<u8>>>>,
}

impl Transaction<'_> {
    /// Number of buffered writes and deletes.
    pub async fn pending_writes(&self) -> usize {
        self.writes.lock().await.len()
    }

    /// Validate the read set and apply all buffered writes atomically.
    ///
    /// Returns the commit sequence number, or `None` when the transaction
    /// wrote nothing. Fails with [`StoreError::Conflict`] if any key read by
    /// this transaction was changed by another commit in the meantime; in
    /// that case nothing is applied.
    pub async fn commit(self) -> Result<Option<u64>, StoreError> {
        let reads = self.reads.into_inner();
        let writes = self.writes.into_inner();

        let mut committed = self.store.committed.write().await;
        for (key, seen) in &reads {
            if committed.version_of(key) != *seen {
                return Err(StoreError::Conflict(key.clone()));
            }
        }

        if writes.is_empty() {
            return Ok(None);
        }
        Ok(Some(committed.apply(writes)))
    }

    async fn record_read(&self, key: &str, version: Option<u64>) {
        self.reads
            .lock()
            .await
            .entry(key.to_string())
            .or_insert(version);
    }
}

#[async_trait]
impl<'a> WorldState for Transaction<'a> {
    async fn get_state(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        if let Some(write) = self.writes.lock().await.get(key) {
            return Ok(write.clone());
        }

        let (value, version) = {
            let committed = self.store.committed.read().await;
            match committed.entries.get(key) {
                Some(entry) => (Some(entry.value.clone()), Some(entry.version)),
                None => (None, None),
            }
        };
        self.record_read(key, version).await;
        Ok(value)
    }

    async fn put_state(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        check_key(key)?;
        self.writes.lock().await.insert(key.to_string(), Some(value));
        Ok(())
    }

    async fn del_state(&self, key: &str) -> Result<(), StoreError> {
        check_key(key)?;
        self.writes.lock().await.insert(key.to_string(), None);
        Ok(())
    }

    async fn get_state_by_range(
        &self,
        start_key: &str,
        end_key: &str,
    ) -> Result<Box<dyn StateIterator>, StoreError> {
        let snapshot = self.store.committed.read().await.scan(start_key, end_key);

        let mut merged: BTreeMap<String, Vec<u8>> = BTreeMap::new();
        for (key, entry) in snapshot {
            self.record_read(&key, Some(entry.version)).await;
            merged.insert(key, entry.value);
        }

        let writes = self.writes.lock().await;
        for (key, write) in writes.iter() {
            if !in_range(key, start_key, end_key) {
                continue;
            }
            match write {
                Some(value) => {
                    merged.insert(key.clone(), value.clone());
                }
                None => {
                    merged.remove(key);
                }
            }
        }

        let entries = merged
            .into_iter()
            .map(|(key, value)| KeyValue { key, value })
            .collect();
        Ok(self.store.cursor(entries))
    }
}

// ---------------------------------------------------------------------------
// Cursor
// ---------------------------------------------------------------------------

struct MemoryCursor {
    entries: std::vec::IntoIter<KeyValue>,
    open_cursors: Arc<AtomicUsize>,
    closed: bool,
}

#[async_trait]
impl StateIterator for MemoryCursor {
    async fn next_entry(&mut self) -> Result<Option<KeyValue>, StoreError> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        Ok(self.entries.next())
    }

    fn close(&mut self) -> Result<(), StoreError> {
        if self.closed {
            return Err(StoreError::Closed);
        }
        self.closed = true;
        self.open_cursors.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

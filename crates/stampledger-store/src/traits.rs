//! KvStore trait: the abstract interface to the key-value substrate.
//!
//! The ledger is storage-agnostic. Implementations include SQLite
//! (persistent) and in-memory (tests, embedding).

use async_trait::async_trait;

use crate::error::Result;

/// A set of puts applied atomically by [`KvStore::write_batch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteBatch {
    puts: Vec<(Vec<u8>, Vec<u8>)>,
}

impl WriteBatch {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a put. Later puts to the same key win.
    pub fn put(&mut self, key: Vec<u8>, value: Vec<u8>) {
        self.puts.push((key, value));
    }

    pub fn len(&self) -> usize {
        self.puts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.puts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&[u8], &[u8])> {
        self.puts.iter().map(|(k, v)| (k.as_slice(), v.as_slice()))
    }

    pub fn into_puts(self) -> Vec<(Vec<u8>, Vec<u8>)> {
        self.puts
    }
}

/// The KvStore trait: async interface to an ordered key-value store.
///
/// # Design Notes
///
/// - **Byte-ordered keys**: `scan_prefix` yields entries in ascending
///   lexicographic key order, which is what makes composite index keys work.
/// - **Atomic batches**: either every put in a [`WriteBatch`] is visible
///   or none is.
/// - **No deletes**: ledger records are never deleted.
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Get the value stored under an exact key.
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>>;

    /// Store a value under a key, replacing any previous value.
    async fn set(&self, key: &[u8], value: &[u8]) -> Result<()>;

    /// Apply every put in the batch atomically.
    async fn write_batch(&self, batch: WriteBatch) -> Result<()>;

    /// All entries whose key starts with `prefix`, in ascending key order.
    ///
    /// An empty prefix scans the whole store.
    async fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>>;

    /// Check if a key exists.
    async fn contains(&self, key: &[u8]) -> Result<bool> {
        Ok(self.get(key).await?.is_some())
    }
}

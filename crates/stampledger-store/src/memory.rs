//! In-memory implementation of the KvStore trait.
//!
//! Same ordering and atomicity semantics as SQLite, no persistence.

use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{Result, StoreError};
use crate::traits::{KvStore, WriteBatch};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock; a
/// whole batch is applied under one write guard.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys across all tables.
    pub fn len(&self) -> usize {
        self.inner.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E: std::fmt::Display>(e: E) -> StoreError {
    StoreError::Poisoned(e.to_string())
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner.get(key).cloned())
    }

    async fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        inner.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    async fn write_batch(&self, batch: WriteBatch) -> Result<()> {
        let mut inner = self.inner.write().map_err(poisoned)?;
        for (key, value) in batch.into_puts() {
            inner.insert(key, value);
        }
        Ok(())
    }

    async fn scan_prefix(&self, prefix: &[u8]) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let inner = self.inner.read().map_err(poisoned)?;
        Ok(inner
            .range(prefix.to_vec()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        store.set(b"\x01a", b"one").await.unwrap();
        assert_eq!(store.get(b"\x01a").await.unwrap(), Some(b"one".to_vec()));
        assert_eq!(store.get(b"\x01b").await.unwrap(), None);
        assert!(store.contains(b"\x01a").await.unwrap());

        store.set(b"\x01a", b"uno").await.unwrap();
        assert_eq!(store.get(b"\x01a").await.unwrap(), Some(b"uno".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_scan_prefix_is_ordered_and_bounded() {
        let store = MemoryStore::new();
        let mut batch = WriteBatch::new();
        batch.put(b"\x02zz".to_vec(), vec![]);
        batch.put(b"\x01c".to_vec(), vec![]);
        batch.put(b"\x01a".to_vec(), vec![]);
        batch.put(b"\x01b".to_vec(), vec![]);
        batch.put(b"\x00x".to_vec(), vec![]);
        store.write_batch(batch).await.unwrap();

        let keys: Vec<Vec<u8>> = store
            .scan_prefix(b"\x01")
            .await
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec![b"\x01a".to_vec(), b"\x01b".to_vec(), b"\x01c".to_vec()]);

        assert_eq!(store.scan_prefix(b"").await.unwrap().len(), 5);
        assert!(store.scan_prefix(b"\x03").await.unwrap().is_empty());
    }
}

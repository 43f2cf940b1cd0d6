//! Per-record async locks for read-modify-write operations.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Idle locks are swept once the map grows past this many keys.
const SWEEP_THRESHOLD: usize = 1024;

/// A lazily populated map of record key to async mutex.
///
/// Two operations on the same record key run one after the other; operations
/// on different keys never wait on each other.
#[derive(Debug, Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<Vec<u8>, Arc<AsyncMutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to `key`. Released when the guard drops.
    pub async fn lock(&self, key: Vec<u8>) -> OwnedMutexGuard<()> {
        let lock = {
            // The map holds no invariants a panicking holder could break.
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            if locks.len() >= SWEEP_THRESHOLD {
                // Held or awaited locks have a guard or waiter sharing the Arc.
                locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            }
            locks.entry(key).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Number of keys currently tracked.
    pub fn len(&self) -> usize {
        self.locks.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_same_key_is_exclusive() {
        let locks = Arc::new(KeyLocks::new());
        let guard = locks.lock(b"stamp-1".to_vec()).await;

        let contender = {
            let locks = locks.clone();
            tokio::spawn(async move {
                let _guard = locks.lock(b"stamp-1".to_vec()).await;
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!contender.is_finished());

        drop(guard);
        contender.await.unwrap();
    }

    #[tokio::test]
    async fn test_distinct_keys_do_not_block() {
        let locks = KeyLocks::new();
        let _a = locks.lock(b"a".to_vec()).await;
        let _b = tokio::time::timeout(Duration::from_secs(1), locks.lock(b"b".to_vec()))
            .await
            .expect("distinct key should not wait");
        assert_eq!(locks.len(), 2);
    }

    #[tokio::test]
    async fn test_idle_locks_are_swept() {
        let locks = KeyLocks::new();
        for i in 0..SWEEP_THRESHOLD {
            let _guard = locks.lock(format!("k{}", i).into_bytes()).await;
        }
        assert_eq!(locks.len(), SWEEP_THRESHOLD);

        let _guard = locks.lock(b"fresh".to_vec()).await;
        assert_eq!(locks.len(), 1);
    }
}

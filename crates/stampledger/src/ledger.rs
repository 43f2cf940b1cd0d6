//! The Ledger: unified API over the four registries.
//!
//! Registry operations are implemented in their own modules as further
//! `impl Ledger` blocks; this module holds the shared state and the
//! plumbing every mutation goes through.

use std::sync::Arc;

use stampledger_store::{KvStore, WriteBatch};

use crate::config::{Clock, LedgerConfig, SystemClock};
use crate::error::Result;
use crate::events::{AuditEvent, EventSink, TracingSink};
use crate::locks::KeyLocks;

/// The main Ledger struct.
///
/// Every mutation takes the already-authenticated caller identity as its
/// first argument and checks everything before writing anything. A record
/// and its index entries are committed in one atomic batch; the audit
/// event follows the commit.
pub struct Ledger<S: KvStore> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: LedgerConfig,
    /// Timestamp source.
    clock: Arc<dyn Clock>,
    /// Audit event consumer.
    events: Arc<dyn EventSink>,
    /// Serializes read-modify-write on a single record. Shared by every
    /// ledger over the same store.
    locks: Arc<KeyLocks>,
}

impl<S: KvStore> Ledger<S> {
    /// Create a new ledger over `store`.
    pub fn new(store: S, config: LedgerConfig) -> Self {
        Self::from_shared(Arc::new(store), Arc::new(KeyLocks::new()), config)
    }

    /// Create a ledger over a store that is shared with other owners.
    ///
    /// Every ledger writing to `store` must be given the same `locks`, or
    /// concurrent updates to one record can overwrite each other. Use
    /// [`Ledger::shared_locks`] to get the map of an existing ledger.
    pub fn from_shared(store: Arc<S>, locks: Arc<KeyLocks>, config: LedgerConfig) -> Self {
        Self {
            store,
            config,
            clock: Arc::new(SystemClock),
            events: Arc::new(TracingSink),
            locks,
        }
    }

    /// Another ledger over the same store and lock map, with its own config.
    pub fn sibling(&self, config: LedgerConfig) -> Self {
        Self::from_shared(self.store.clone(), self.shared_locks(), config)
    }

    /// Replace the timestamp source.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Replace the audit event sink.
    pub fn with_event_sink(mut self, events: Arc<dyn EventSink>) -> Self {
        self.events = events;
        self
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// A handle to the store shared by this ledger.
    pub fn shared_store(&self) -> Arc<S> {
        self.store.clone()
    }

    /// A handle to the per-record lock map.
    pub fn shared_locks(&self) -> Arc<KeyLocks> {
        self.locks.clone()
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    pub(crate) fn now(&self) -> i64 {
        self.clock.now()
    }

    pub(crate) fn locks(&self) -> &KeyLocks {
        &self.locks
    }

    /// Apply a staged mutation.
    pub(crate) async fn commit(&self, batch: WriteBatch) -> Result<()> {
        self.store.write_batch(batch).await?;
        Ok(())
    }

    pub(crate) fn emit(&self, event: AuditEvent) {
        self.events.emit(event);
    }
}

//! # StampLedger Store
//!
//! Storage abstraction for StampLedger. Registries see the substrate only
//! through the [`KvStore`] trait: exact-key get/set, atomic write batches,
//! and ordered prefix scans over byte-comparable keys.
//!
//! ## Key Types
//!
//! - [`KvStore`] - The async trait every backend implements
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests and embedding
//! - [`RecordTable`] - A typed table of records keyed by id
//! - [`SecondaryIndex`] - An ordered `group -> {record id}` multimap
//! - [`ValueCodec`] - Per-record-type encoding ([`CborCodec`], [`JsonCodec`])
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stampledger_store::{keys::TableTag, KvStore, MemoryStore, SecondaryIndex, WriteBatch};
//!
//! async fn example() {
//!     let store = MemoryStore::new();
//!     let by_owner = SecondaryIndex::new(TableTag::EntitiesByOwner);
//!
//!     let mut batch = WriteBatch::new();
//!     by_owner.insert(&mut batch, "owner-1", "entity-a");
//!     store.write_batch(batch).await.unwrap();
//!
//!     let ids = by_owner.members_of(&store, "owner-1").await.unwrap();
//!     assert_eq!(ids, vec!["entity-a".to_string()]);
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Disjoint key spaces**: each table owns a one-byte tag (see [`keys`]).
//! - **Atomic batches**: a record and its index entries commit together.
//! - **Ordered scans**: prefix scans return keys in ascending byte order.

pub mod codec;
pub mod error;
pub mod index;
pub mod keys;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod table;
pub mod traits;

pub use codec::{CborCodec, JsonCodec, ValueCodec};
pub use error::{Result, StoreError};
pub use index::SecondaryIndex;
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use table::RecordTable;
pub use traits::{KvStore, WriteBatch};

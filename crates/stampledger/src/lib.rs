//! # StampLedger
//!
//! Record-and-index ledger for professional engineering stamps.
//!
//! ## Overview
//!
//! Four registries share one key-value store:
//!
//! - **Stamps**: a PE's Ed25519 attestation over a document hash, revocable
//!   once by its creator
//! - **Documents**: IPFS content pointers attached to a stamp
//! - **Entities**: organizations with an owner, admins, and members
//! - **Spec versions**: immutable, parent-linked lineage per project
//!
//! Each registry answers one-to-many questions ("all stamps by this PE")
//! through secondary indexes written in the same atomic batch as the record.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stampledger::{Ledger, LedgerConfig, NewStamp};
//! use stampledger::core::{DocumentHash, Keypair};
//! use stampledger::store::SqliteStore;
//!
//! async fn example() {
//!     let store = SqliteStore::open("ledger.db").unwrap();
//!     let ledger = Ledger::new(store, LedgerConfig::default());
//!
//!     let pe = Keypair::generate();
//!     let hash = DocumentHash::digest(b"structural drawings rev C");
//!
//!     let stamp_id = ledger
//!         .issue_stamp(
//!             "pe-address",
//!             NewStamp {
//!                 document_hash: hash.to_hex(),
//!                 pe_public_key: pe.public_key().to_hex(),
//!                 signature: pe.sign_document(&hash).to_hex(),
//!                 ..Default::default()
//!             },
//!         )
//!         .await
//!         .unwrap();
//!
//!     let check = ledger.verify_stamp(&stamp_id).await.unwrap();
//!     assert!(check.valid);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `stampledger::core` - Record types, crypto, and validation rules
//! - `stampledger::store` - Storage abstraction, SQLite, and indexes

pub mod config;
pub mod documents;
pub mod entities;
pub mod error;
pub mod events;
pub mod genesis;
pub mod ledger;
pub mod locks;
mod lookup;
mod schema;
pub mod specs;
pub mod stamps;

#[cfg(test)]
mod testing;

// Re-export component crates
pub use stampledger_core as core;
pub use stampledger_store as store;

pub use config::{Clock, FixedClock, LedgerConfig, SystemClock};
pub use documents::{NewDocument, StoredDocument};
pub use error::{ErrorKind, LedgerError, Result};
pub use events::{AuditEvent, EventKind, EventSink, MemorySink, TracingSink};
pub use genesis::GenesisState;
pub use ledger::Ledger;
pub use locks::KeyLocks;
pub use specs::NewSpecVersion;
pub use stamps::{NewStamp, Verification};

pub use stampledger_core::{
    DocumentStorage, EntityAccount, EntityType, Role, SpecVersion, Stamp, StampMetadata,
};

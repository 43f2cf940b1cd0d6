//! # StampLedger Core
//!
//! Pure primitives for StampLedger: PE stamp attestations, ledger records,
//! and the stateless validation rules every registry applies.
//!
//! This crate contains no I/O, no storage, no async. It is pure computation
//! over the record types and their cryptographic checks.
//!
//! ## Key Types
//!
//! - [`Stamp`] - A PE's Ed25519 attestation over a document hash
//! - [`DocumentStorage`] - A content pointer attached to a stamp
//! - [`EntityAccount`] - An organization with owner/admin/member roles
//! - [`SpecVersion`] - One immutable node of a project's version lineage
//! - [`EntityType`], [`Role`] - Closed enumerations parsed at the boundary
//!
//! ## Attestation
//!
//! A stamp is valid when its signature verifies over the *raw* 32-byte
//! document hash under the PE's public key. Issuance and re-verification
//! both go through [`verify_attestation`], so acceptance is replayable.

pub mod crypto;
pub mod error;
pub mod records;
pub mod types;
pub mod validation;

pub use crypto::{DocumentHash, Ed25519PublicKey, Ed25519Signature, Keypair};
pub use error::{CoreError, ValidationError};
pub use records::{DocumentStorage, EntityAccount, SpecVersion, Stamp, StampMetadata};
pub use types::{new_record_id, EntityType, Role};
pub use validation::{
    parse_attestation, validate_entity_name, validate_ipfs_hash, validate_project_id,
    validate_version_label, verify_attestation, Attestation, MIN_IPFS_HASH_LEN,
};

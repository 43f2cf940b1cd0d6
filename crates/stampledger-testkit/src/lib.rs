//! # StampLedger Testkit
//!
//! Testing utilities for StampLedger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known attestations with expected hashes, keys, and signatures
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Seeded parties and ready-to-use ledgers
//!
//! ## Golden Vectors
//!
//! ```rust
//! use stampledger_testkit::vectors::verify_all_vectors;
//!
//! assert!(verify_all_vectors().is_empty());
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use stampledger_testkit::generators::{stamp_from_params, StampParams};
//!
//! proptest! {
//!     #[test]
//!     fn requests_are_deterministic(params: StampParams) {
//!         prop_assert_eq!(stamp_from_params(&params), stamp_from_params(&params));
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust,no_run
//! use stampledger_testkit::fixtures::TestFixture;
//!
//! async fn example() {
//!     let fixture = TestFixture::with_seed([1u8; 32]);
//!     let stamp_id = fixture.issue(b"drawing set").await.unwrap();
//!     assert!(fixture.ledger.verify_stamp(&stamp_id).await.unwrap().valid);
//! }
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{cid_v0, init_tracing, multi_party_fixtures, Party, TestFixture, FIXED_TIME};
pub use generators::{stamp_from_params, StampParams};
pub use vectors::{all_vectors, check_vector, verify_all_vectors, GoldenVector};

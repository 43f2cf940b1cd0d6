//! Shared setup for this crate's unit tests.

use std::sync::Arc;

use stampledger_core::{DocumentHash, Keypair};
use stampledger_store::MemoryStore;

use crate::config::{FixedClock, LedgerConfig};
use crate::events::MemorySink;
use crate::ledger::Ledger;
use crate::stamps::NewStamp;

pub(crate) const T0: i64 = 1_700_000_000;

pub(crate) struct Harness {
    pub ledger: Ledger<MemoryStore>,
    pub events: Arc<MemorySink>,
    pub clock: Arc<FixedClock>,
}

pub(crate) fn harness() -> Harness {
    harness_with(LedgerConfig::default())
}

pub(crate) fn harness_with(config: LedgerConfig) -> Harness {
    let events = Arc::new(MemorySink::new());
    let clock = Arc::new(FixedClock::new(T0));
    let ledger = Ledger::new(MemoryStore::new(), config)
        .with_clock(clock.clone())
        .with_event_sink(events.clone());
    Harness {
        ledger,
        events,
        clock,
    }
}

/// A request signed by the PE keypair derived from `seed`.
pub(crate) fn signed_request(seed: u8, document: &[u8]) -> NewStamp {
    let pe = Keypair::from_seed(&[seed; 32]);
    let hash = DocumentHash::digest(document);
    NewStamp {
        document_hash: hash.to_hex(),
        pe_public_key: pe.public_key().to_hex(),
        signature: pe.sign_document(&hash).to_hex(),
        ..Default::default()
    }
}

pub(crate) fn cid_v0() -> String {
    format!("Qm{}", "Y".repeat(44))
}

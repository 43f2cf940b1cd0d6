//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::{Arc, Once};

use stampledger::{FixedClock, Ledger, LedgerConfig, MemorySink, NewDocument, NewStamp};
use stampledger_core::{DocumentHash, Keypair};
use stampledger_store::{KvStore, MemoryStore};
use tracing_subscriber::filter::LevelFilter;

/// The time every fixture ledger starts at, in Unix seconds.
pub const FIXED_TIME: i64 = 1_700_000_000;

/// A PE: signing keypair plus the caller address it submits under.
#[derive(Debug, Clone)]
pub struct Party {
    pub keypair: Keypair,
    pub address: String,
}

impl Party {
    /// A party with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        let keypair = Keypair::from_seed(&seed);
        let address = address_for(&keypair);
        Self { keypair, address }
    }

    /// A party with a random keypair.
    pub fn random() -> Self {
        let keypair = Keypair::generate();
        let address = address_for(&keypair);
        Self { keypair, address }
    }

    pub fn public_key_hex(&self) -> String {
        self.keypair.public_key().to_hex()
    }

    /// A stamp request over `document`, correctly signed by this party.
    pub fn stamp_request(&self, document: &[u8]) -> NewStamp {
        let hash = DocumentHash::digest(document);
        NewStamp {
            document_hash: hash.to_hex(),
            pe_public_key: self.public_key_hex(),
            signature: self.keypair.sign_document(&hash).to_hex(),
            ..Default::default()
        }
    }
}

fn address_for(keypair: &Keypair) -> String {
    format!("stamp1{}", &keypair.public_key().to_hex()[..38])
}

/// A test fixture: one party and a ledger with a fixed clock and a
/// recording event sink.
pub struct TestFixture<S: KvStore = MemoryStore> {
    pub party: Party,
    pub ledger: Ledger<S>,
    pub events: Arc<MemorySink>,
    pub clock: Arc<FixedClock>,
}

impl TestFixture<MemoryStore> {
    /// Create a new test fixture with a random keypair.
    pub fn new() -> Self {
        Self::on_store(MemoryStore::new(), Party::random())
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self::on_store(MemoryStore::new(), Party::with_seed(seed))
    }
}

impl Default for TestFixture<MemoryStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: KvStore> TestFixture<S> {
    /// A fixture over any store.
    pub fn on_store(store: S, party: Party) -> Self {
        Self::with_config(store, party, LedgerConfig::default())
    }

    pub fn with_config(store: S, party: Party, config: LedgerConfig) -> Self {
        let events = Arc::new(MemorySink::new());
        let clock = Arc::new(FixedClock::new(FIXED_TIME));
        let ledger = Ledger::new(store, config)
            .with_clock(clock.clone())
            .with_event_sink(events.clone());
        Self {
            party,
            ledger,
            events,
            clock,
        }
    }

    /// Issue a stamp over `document` as the fixture's party.
    pub async fn issue(&self, document: &[u8]) -> stampledger::Result<String> {
        self.ledger
            .issue_stamp(&self.party.address, self.party.stamp_request(document))
            .await
    }

    /// Issue a stamp over random bytes.
    pub async fn issue_random(&self) -> stampledger::Result<String> {
        let document: [u8; 32] = rand::random();
        self.issue(&document).await
    }

    /// Attach a well-formed CIDv0 document to a stamp as the fixture's party.
    pub async fn attach(&self, stamp_id: &str, filename: &str) -> stampledger::Result<String> {
        let stored = self
            .ledger
            .store_document(
                &self.party.address,
                NewDocument {
                    stamp_id: stamp_id.to_string(),
                    ipfs_hash: cid_v0(filename.as_bytes()),
                    filename: filename.to_string(),
                    size: 4096,
                    mime_type: "application/pdf".into(),
                    pin_forever: false,
                },
            )
            .await?;
        Ok(stored.document_id)
    }
}

/// A syntactically valid CIDv0 derived from `content`.
pub fn cid_v0(content: &[u8]) -> String {
    let hex = DocumentHash::digest(content).to_hex();
    format!("Qm{}", &hex[..44])
}

/// Create multiple parties for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<Party> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[31] = 0xA5;
            Party::with_seed(seed)
        })
        .collect()
}

/// Route `tracing` output through the test harness's captured writer.
///
/// Safe to call from every test; only the first call installs anything.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_test_writer()
            .with_max_level(LevelFilter::DEBUG)
            .try_init();
    });
}

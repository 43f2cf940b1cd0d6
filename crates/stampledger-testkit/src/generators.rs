//! Proptest generators for property-based testing.

use proptest::prelude::*;

use stampledger::NewStamp;
use stampledger_core::{DocumentHash, EntityType, Keypair, Role};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate document bytes of specified max length.
pub fn document(max_len: usize) -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..=max_len)
}

/// Generate a caller address.
pub fn address() -> impl Strategy<Value = String> {
    "stamp1[a-z0-9]{10,38}".prop_map(String::from)
}

pub fn entity_type() -> impl Strategy<Value = EntityType> {
    prop_oneof![
        Just(EntityType::Company),
        Just(EntityType::Municipality),
        Just(EntityType::Firm),
    ]
}

pub fn role() -> impl Strategy<Value = Role> {
    prop_oneof![Just(Role::Viewer), Just(Role::Editor), Just(Role::Admin)]
}

/// Generate a syntactically valid IPFS content identifier.
pub fn ipfs_hash() -> impl Strategy<Value = String> {
    prop_oneof![
        "Qm[1-9A-HJ-NP-Za-km-z]{44,50}",
        "bafy[a-z2-7]{42,60}",
    ]
}

/// Generate a string that is not a valid IPFS content identifier.
pub fn invalid_ipfs_hash() -> impl Strategy<Value = String> {
    prop_oneof![
        // Right prefix, too short.
        "Qm[1-9A-HJ-NP-Za-km-z]{0,43}",
        "bafy[a-z2-7]{0,41}",
        // Long enough, wrong prefix.
        "[A-PR-Z][a-z0-9]{45,60}",
    ]
}

/// Generate a string that is not exactly `bytes` bytes of hex.
///
/// Either the length is wrong or at least one character is not hex.
pub fn malformed_hex(bytes: usize) -> impl Strategy<Value = String> {
    let len = bytes * 2;
    prop_oneof![
        "[0-9a-f]{0,200}".prop_filter("length must differ", move |s| s.len() != len),
        (0..len, "[g-z]").prop_map(move |(at, bad)| {
            let mut s = "0".repeat(len);
            s.replace_range(at..at + 1, &bad);
            s
        }),
    ]
}

/// Parameters for generating a signed stamp request.
#[derive(Debug, Clone)]
pub struct StampParams {
    pub keypair: Keypair,
    pub document: Vec<u8>,
    pub jurisdiction_id: String,
}

impl Arbitrary for StampParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            any::<[u8; 32]>(), // seed
            document(512),
            prop_oneof![Just(String::new()), "[a-z-]{3,24}"],
        )
            .prop_map(|(seed, document, jurisdiction_id)| StampParams {
                keypair: Keypair::from_seed(&seed),
                document,
                jurisdiction_id,
            })
            .boxed()
    }
}

/// Build a correctly signed request from parameters.
pub fn stamp_from_params(params: &StampParams) -> NewStamp {
    let hash = DocumentHash::digest(&params.document);
    NewStamp {
        document_hash: hash.to_hex(),
        pe_public_key: params.keypair.public_key().to_hex(),
        signature: params.keypair.sign_document(&hash).to_hex(),
        jurisdiction_id: params.jurisdiction_id.clone(),
        ..Default::default()
    }
}

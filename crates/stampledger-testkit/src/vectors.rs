//! Golden attestation vectors.
//!
//! Each vector pins the SHA-256 of a document, the Ed25519 public key of a
//! seed, and the signature over the raw hash bytes. Any signer that follows
//! RFC 8032 reproduces these exactly.

use stampledger_core::{verify_attestation, DocumentHash, Keypair};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed for deterministic key generation.
    pub seed: [u8; 32],
    /// Document bytes, or None when the vector signs a literal hash.
    pub document: Option<&'static [u8]>,
    pub expected_hash: &'static str,
    pub expected_public_key: &'static str,
    pub expected_signature: &'static str,
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "zero seed, empty document",
            seed: [0x00; 32],
            document: Some(b""),
            expected_hash: "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855",
            expected_public_key: "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29",
            expected_signature: "bf527d440e4b9b18923b75a6e7e41ade5675a276d055a3af038e6e7c3801206b\
                                 325bee99858c849898c422dc3315a7592705dd1607be23da3b4d8e341a4e0504",
        },
        GoldenVector {
            name: "drawing set",
            seed: [0x42; 32],
            document: Some(b"structural drawings rev C"),
            expected_hash: "f5ad482d6c80a56437a8f936c32045eff7df581c8c2481f2c6fee7c6e4b93475",
            expected_public_key: "2152f8d19b791d24453242e15f2eab6cb7cffa7b6a5ed30097960e069881db12",
            expected_signature: "917a2c2f2d22839ed515dcbd632193cf764af6e53b717c14f8b40f2274fd8e3e\
                                 e974ac94bccf30cf9346a03c38e82cff27503be8b3244dc70ea3b5ddfc86c103",
        },
        GoldenVector {
            name: "all-zero hash",
            seed: [0x01; 32],
            document: None,
            expected_hash: "0000000000000000000000000000000000000000000000000000000000000000",
            expected_public_key: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            expected_signature: "3714689e5478c21106ed9da455589e89bb77bbf09f49503f85a24a5b3035068a\
                                 01291679f92ec6919b6603d2a887ad37fc482d7ea9b2bf079943705a96218c07",
        },
    ]
}

/// The hash a vector signs.
pub fn vector_hash(vector: &GoldenVector) -> DocumentHash {
    match vector.document {
        Some(document) => DocumentHash::digest(document),
        None => DocumentHash::from_bytes([0u8; 32]),
    }
}

/// Check one vector: hashing, key derivation, signing, and verification.
pub fn check_vector(vector: &GoldenVector) -> Result<(), String> {
    let hash = vector_hash(vector);
    if hash.to_hex() != vector.expected_hash {
        return Err(format!("{}: hash {}", vector.name, hash.to_hex()));
    }

    let keypair = Keypair::from_seed(&vector.seed);
    let public_key = keypair.public_key().to_hex();
    if public_key != vector.expected_public_key {
        return Err(format!("{}: public key {}", vector.name, public_key));
    }

    let signature = keypair.sign_document(&hash).to_hex();
    if signature != vector.expected_signature {
        return Err(format!("{}: signature {}", vector.name, signature));
    }

    verify_attestation(vector.expected_hash, vector.expected_public_key, vector.expected_signature)
        .map_err(|e| format!("{}: {}", vector.name, e))
}

/// Verify all golden vectors, collecting every failure.
pub fn verify_all_vectors() -> Vec<String> {
    all_vectors()
        .iter()
        .filter_map(|v| check_vector(v).err())
        .collect()
}

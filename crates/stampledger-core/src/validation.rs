//! Stateless validation: attestation checks and field format rules.
//!
//! Registries call these before reading or writing the store, so a failure
//! here never leaves a partial write behind.

use crate::crypto::{DocumentHash, Ed25519PublicKey, Ed25519Signature};
use crate::error::ValidationError;

/// Shortest accepted IPFS content identifier (a CIDv0 is 46 chars).
pub const MIN_IPFS_HASH_LEN: usize = 46;

/// Recognized CID prefixes: CIDv0 (base58 `Qm...`) and CIDv1 (base32 `bafy...`).
const IPFS_PREFIXES: [&str; 2] = ["Qm", "bafy"];

/// A decoded `(hash, key, signature)` triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attestation {
    pub document_hash: DocumentHash,
    pub public_key: Ed25519PublicKey,
    pub signature: Ed25519Signature,
}

impl Attestation {
    /// Verify the signature over the raw document hash bytes.
    pub fn verify(&self) -> Result<(), ValidationError> {
        self.public_key
            .verify(self.document_hash.as_bytes(), &self.signature)
            .map_err(|_| ValidationError::SignatureFailed)
    }
}

/// Decode the hex fields of a stamp attestation.
///
/// Checks run in a fixed order: document hash, public key, signature.
pub fn parse_attestation(
    document_hash: &str,
    pe_public_key: &str,
    signature: &str,
) -> Result<Attestation, ValidationError> {
    let document_hash = DocumentHash::from_hex(document_hash)
        .map_err(|e| ValidationError::InvalidDocumentHash(e.to_string()))?;
    let public_key = Ed25519PublicKey::from_hex(pe_public_key)
        .map_err(|e| ValidationError::InvalidPublicKey(e.to_string()))?;
    let signature = Ed25519Signature::from_hex(signature)
        .map_err(|e| ValidationError::InvalidSignatureEncoding(e.to_string()))?;

    Ok(Attestation {
        document_hash,
        public_key,
        signature,
    })
}

/// Decode and verify a stamp attestation.
///
/// This is the single verification routine used at issuance and at
/// re-verification time.
pub fn verify_attestation(
    document_hash: &str,
    pe_public_key: &str,
    signature: &str,
) -> Result<(), ValidationError> {
    parse_attestation(document_hash, pe_public_key, signature)?.verify()
}

pub fn validate_ipfs_hash(ipfs_hash: &str) -> Result<(), ValidationError> {
    if !IPFS_PREFIXES.iter().any(|p| ipfs_hash.starts_with(p)) {
        return Err(ValidationError::InvalidIpfsHash(
            "must start with 'Qm' or 'bafy'".into(),
        ));
    }
    if ipfs_hash.len() < MIN_IPFS_HASH_LEN {
        return Err(ValidationError::InvalidIpfsHash(format!(
            "hash too short: got {} chars, need at least {}",
            ipfs_hash.len(),
            MIN_IPFS_HASH_LEN
        )));
    }
    Ok(())
}

pub fn validate_entity_name(name: &str) -> Result<(), ValidationError> {
    if name.is_empty() {
        return Err(ValidationError::EmptyEntityName);
    }
    Ok(())
}

pub fn validate_version_label(version: &str) -> Result<(), ValidationError> {
    if version.is_empty() {
        return Err(ValidationError::InvalidVersion("version cannot be empty".into()));
    }
    Ok(())
}

pub fn validate_project_id(project_id: &str) -> Result<(), ValidationError> {
    if project_id.is_empty() {
        return Err(ValidationError::InvalidVersion("project id cannot be empty".into()));
    }
    Ok(())
}

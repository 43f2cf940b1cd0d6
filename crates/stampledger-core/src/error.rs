//! Error types for StampLedger Core.

use thiserror::Error;

/// Low-level errors from decoding and verifying cryptographic material.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("got {got} chars, expected {expected}")]
    InvalidLength { expected: usize, got: usize },

    #[error("not valid hex encoding: {0}")]
    InvalidHex(String),

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,
}

/// Structural and cryptographic validation failures.
///
/// Every variant is detected before a registry touches the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("invalid document hash: must be 64 hex characters (SHA-256): {0}")]
    InvalidDocumentHash(String),

    #[error("invalid PE public key: must be 64 hex characters (Ed25519): {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature encoding: must be 128 hex characters: {0}")]
    InvalidSignatureEncoding(String),

    #[error("signature verification failed")]
    SignatureFailed,

    #[error("invalid IPFS hash format: {0}")]
    InvalidIpfsHash(String),

    #[error("invalid entity type: must be 'company', 'municipality', or 'firm', got '{0}'")]
    InvalidEntityType(String),

    #[error("entity name cannot be empty")]
    EmptyEntityName,

    #[error("invalid role: must be 'viewer', 'editor', or 'admin', got '{0}'")]
    InvalidRole(String),

    #[error("invalid version format: {0}")]
    InvalidVersion(String),
}

impl ValidationError {
    /// True for a well-formed attestation whose signature does not verify.
    ///
    /// Everything else is a structural (format) failure.
    pub fn is_signature_failure(&self) -> bool {
        matches!(self, ValidationError::SignatureFailed)
    }
}

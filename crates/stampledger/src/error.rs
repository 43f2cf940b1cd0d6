//! Error types for the ledger.

use stampledger_core::ValidationError;
use stampledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Structural or cryptographic validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    #[error("stamp not found: {0}")]
    StampNotFound(String),

    #[error("document not found: {0}")]
    DocumentNotFound(String),

    #[error("entity not found: {0}")]
    EntityNotFound(String),

    #[error("spec version not found: {0}")]
    SpecVersionNotFound(String),

    #[error("parent version not found: {0}")]
    ParentVersionNotFound(String),

    #[error("member {member} not found in entity {entity_id}")]
    MemberNotFound { entity_id: String, member: String },

    /// Caller is not the required creator or admin.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("stamp already revoked: {0}")]
    AlreadyRevoked(String),
}

/// Coarse classification of a [`LedgerError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    NotFound,
    InvalidFormat,
    SignatureInvalid,
    Unauthorized,
    AlreadyRevoked,
    /// The key-value substrate failed; not a property of the request.
    Storage,
}

impl LedgerError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LedgerError::Validation(e) if e.is_signature_failure() => ErrorKind::SignatureInvalid,
            LedgerError::Validation(_) => ErrorKind::InvalidFormat,
            LedgerError::Store(_) => ErrorKind::Storage,
            LedgerError::StampNotFound(_)
            | LedgerError::DocumentNotFound(_)
            | LedgerError::EntityNotFound(_)
            | LedgerError::SpecVersionNotFound(_)
            | LedgerError::ParentVersionNotFound(_)
            | LedgerError::MemberNotFound { .. } => ErrorKind::NotFound,
            LedgerError::Unauthorized(_) => ErrorKind::Unauthorized,
            LedgerError::AlreadyRevoked(_) => ErrorKind::AlreadyRevoked,
        }
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;

//! Ledger record types.
//!
//! Records are plain serde structs; storage encodes them through a
//! pluggable codec. Hex-encoded cryptographic fields are kept as the
//! strings the issuer submitted so that re-verification reads exactly
//! what issuance checked.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{EntityType, Role};
use crate::validation::verify_attestation;

/// Descriptive fields captured when a stamp is issued.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StampMetadata {
    pub pe_license_number: String,
    pub pe_name: String,
    pub project_name: String,
    pub document_ipfs_hash: String,
    pub document_size: i64,
    pub document_filename: String,
}

/// A PE's attestation over a document hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stamp {
    pub id: String,
    /// SHA-256 of the stamped document, 64 hex chars.
    pub document_hash: String,
    /// Ed25519 public key of the PE, 64 hex chars.
    pub pe_public_key: String,
    /// Ed25519 signature over the raw hash bytes, 128 hex chars.
    pub signature: String,
    /// Empty when the stamp is not filed under a jurisdiction.
    pub jurisdiction_id: String,
    pub creator: String,
    pub created_at: i64,
    pub revoked: bool,
    pub revoked_at: i64,
    pub revoked_reason: String,
    pub metadata: StampMetadata,
}

impl Stamp {
    /// Re-run the issuance signature check against the stored fields.
    pub fn verify_signature(&self) -> Result<(), ValidationError> {
        verify_attestation(&self.document_hash, &self.pe_public_key, &self.signature)
    }

    /// Mark the stamp revoked. Revocation is one-way; callers must reject
    /// an already-revoked stamp before calling this.
    pub fn revoke(&mut self, reason: &str, at: i64) {
        self.revoked = true;
        self.revoked_at = at;
        self.revoked_reason = reason.to_string();
    }
}

/// A document content pointer attached to a stamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStorage {
    pub id: String,
    pub stamp_id: String,
    pub ipfs_hash: String,
    pub filename: String,
    pub size: i64,
    pub mime_type: String,
    pub uploaded_at: i64,
    pub uploaded_by: String,
    pub pinned: bool,
}

/// An organization account with role-based membership.
///
/// Invariants: the owner is always in both `member_addresses` and
/// `admin_addresses`; every member has exactly one `permissions` entry;
/// `admin_addresses` is exactly the members whose role is `Admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAccount {
    pub id: String,
    pub name: String,
    pub entity_type: EntityType,
    pub owner_address: String,
    pub member_addresses: BTreeSet<String>,
    pub admin_addresses: BTreeSet<String>,
    pub permissions: BTreeMap<String, Role>,
    pub created_at: i64,
    pub active: bool,
}

impl EntityAccount {
    /// A new entity whose owner is its sole member and sole admin.
    pub fn new(id: String, name: String, entity_type: EntityType, owner: &str, created_at: i64) -> Self {
        Self {
            id,
            name,
            entity_type,
            owner_address: owner.to_string(),
            member_addresses: BTreeSet::from([owner.to_string()]),
            admin_addresses: BTreeSet::from([owner.to_string()]),
            permissions: BTreeMap::from([(owner.to_string(), Role::Admin)]),
            created_at,
            active: true,
        }
    }

    pub fn is_owner(&self, address: &str) -> bool {
        self.owner_address == address
    }

    pub fn is_admin(&self, address: &str) -> bool {
        self.admin_addresses.contains(address)
    }

    pub fn is_member(&self, address: &str) -> bool {
        self.member_addresses.contains(address)
    }

    pub fn role_of(&self, address: &str) -> Option<Role> {
        self.permissions.get(address).copied()
    }

    /// Add a member, or change an existing member's role.
    ///
    /// The admin set follows the role. Demoting the owner is a policy
    /// decision for the caller; this method does not check it.
    pub fn set_member(&mut self, address: &str, role: Role) {
        self.member_addresses.insert(address.to_string());
        self.permissions.insert(address.to_string(), role);
        if role.is_admin() {
            self.admin_addresses.insert(address.to_string());
        } else {
            self.admin_addresses.remove(address);
        }
    }

    /// Remove a member from every set. Returns false if it was not a member.
    pub fn remove_member(&mut self, address: &str) -> bool {
        if !self.member_addresses.remove(address) {
            return false;
        }
        self.admin_addresses.remove(address);
        self.permissions.remove(address);
        true
    }
}

/// One immutable node of a project's specification lineage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecVersion {
    pub id: String,
    pub project_id: String,
    pub version: String,
    pub spec_hash: String,
    pub spec_ipfs: String,
    pub created_at: i64,
    pub created_by: String,
    pub changelog: String,
    /// Empty for a root version.
    pub parent_version_id: String,
}

impl SpecVersion {
    pub fn parent(&self) -> Option<&str> {
        if self.parent_version_id.is_empty() {
            None
        } else {
            Some(&self.parent_version_id)
        }
    }
}

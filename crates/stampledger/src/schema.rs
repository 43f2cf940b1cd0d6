//! The ledger's nine tables and how each record fans out into them.
//!
//! Every index entry is derived from its owning record here, so the
//! registries and genesis import stage identical writes.

use stampledger_core::{DocumentStorage, EntityAccount, SpecVersion, Stamp};
use stampledger_store::keys::TableTag;
use stampledger_store::{RecordTable, SecondaryIndex, WriteBatch};

use crate::error::Result;

pub(crate) const STAMPS: RecordTable<Stamp> = RecordTable::new(TableTag::Stamps);
pub(crate) const DOCUMENTS: RecordTable<DocumentStorage> = RecordTable::new(TableTag::Documents);
pub(crate) const ENTITIES: RecordTable<EntityAccount> = RecordTable::new(TableTag::Entities);
pub(crate) const SPEC_VERSIONS: RecordTable<SpecVersion> = RecordTable::new(TableTag::SpecVersions);

pub(crate) const STAMPS_BY_PE: SecondaryIndex = SecondaryIndex::new(TableTag::StampsByPe);
pub(crate) const STAMPS_BY_JURISDICTION: SecondaryIndex =
    SecondaryIndex::new(TableTag::StampsByJurisdiction);
pub(crate) const DOCUMENTS_BY_STAMP: SecondaryIndex = SecondaryIndex::new(TableTag::DocumentsByStamp);
pub(crate) const ENTITIES_BY_OWNER: SecondaryIndex = SecondaryIndex::new(TableTag::EntitiesByOwner);
pub(crate) const SPEC_VERSIONS_BY_PROJECT: SecondaryIndex =
    SecondaryIndex::new(TableTag::SpecVersionsByProject);

/// Stamp record plus its PE entry and, when filed, its jurisdiction entry.
pub(crate) fn stage_stamp(batch: &mut WriteBatch, stamp: &Stamp) -> Result<()> {
    STAMPS.put_into(batch, &stamp.id, stamp)?;
    STAMPS_BY_PE.insert(batch, &stamp.pe_public_key, &stamp.id);
    if !stamp.jurisdiction_id.is_empty() {
        STAMPS_BY_JURISDICTION.insert(batch, &stamp.jurisdiction_id, &stamp.id);
    }
    Ok(())
}

pub(crate) fn stage_document(batch: &mut WriteBatch, document: &DocumentStorage) -> Result<()> {
    DOCUMENTS.put_into(batch, &document.id, document)?;
    DOCUMENTS_BY_STAMP.insert(batch, &document.stamp_id, &document.id);
    Ok(())
}

pub(crate) fn stage_entity(batch: &mut WriteBatch, entity: &EntityAccount) -> Result<()> {
    ENTITIES.put_into(batch, &entity.id, entity)?;
    ENTITIES_BY_OWNER.insert(batch, &entity.owner_address, &entity.id);
    Ok(())
}

pub(crate) fn stage_spec_version(batch: &mut WriteBatch, version: &SpecVersion) -> Result<()> {
    SPEC_VERSIONS.put_into(batch, &version.id, version)?;
    SPEC_VERSIONS_BY_PROJECT.insert(batch, &version.project_id, &version.id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use stampledger_core::{EntityType, Role, StampMetadata};
    use stampledger_store::{CborCodec, JsonCodec, ValueCodec};

    fn roundtrip_both<T>(value: &T)
    where
        T: serde::Serialize + serde::de::DeserializeOwned + PartialEq + std::fmt::Debug,
    {
        let cbor = ValueCodec::<T>::encode(&CborCodec, value).unwrap();
        assert_eq!(&ValueCodec::<T>::decode(&CborCodec, &cbor).unwrap(), value);
        let json = ValueCodec::<T>::encode(&JsonCodec, value).unwrap();
        assert_eq!(&ValueCodec::<T>::decode(&JsonCodec, &json).unwrap(), value);
    }

    fn stamp(jurisdiction: &str) -> Stamp {
        Stamp {
            id: "stamp-1".into(),
            document_hash: "00".repeat(32),
            pe_public_key: "ab".repeat(32),
            signature: "cd".repeat(64),
            jurisdiction_id: jurisdiction.into(),
            creator: "pe-addr".into(),
            created_at: 1_700_000_000,
            revoked: false,
            revoked_at: 0,
            revoked_reason: String::new(),
            metadata: StampMetadata {
                pe_license_number: "PE-12345".into(),
                pe_name: "Ada Lovelace".into(),
                project_name: "Bridge".into(),
                document_ipfs_hash: String::new(),
                document_size: 2048,
                document_filename: "plans.pdf".into(),
            },
        }
    }

    #[test]
    fn test_stamp_without_jurisdiction_has_one_index_entry() {
        let mut batch = WriteBatch::new();
        stage_stamp(&mut batch, &stamp("")).unwrap();
        assert_eq!(batch.len(), 2);

        let mut batch = WriteBatch::new();
        stage_stamp(&mut batch, &stamp("county-7")).unwrap();
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_record_types_roundtrip() {
        let mut revoked = stamp("county-7");
        revoked.revoke("superseded", 1_700_000_100);
        roundtrip_both(&stamp(""));
        roundtrip_both(&revoked);

        roundtrip_both(&DocumentStorage {
            id: "doc-1".into(),
            stamp_id: "stamp-1".into(),
            ipfs_hash: format!("Qm{}", "a".repeat(44)),
            filename: "plans.pdf".into(),
            size: 2048,
            mime_type: "application/pdf".into(),
            uploaded_at: 1_700_000_050,
            uploaded_by: "pe-addr".into(),
            pinned: true,
        });

        let mut entity = EntityAccount::new("e1".into(), "Acme".into(), EntityType::Firm, "owner", 7);
        entity.set_member("alice", Role::Editor);
        entity.set_member("bob", Role::Admin);
        roundtrip_both(&entity);

        roundtrip_both(&SpecVersion {
            id: "v2".into(),
            project_id: "p1".into(),
            version: "2.0.0".into(),
            spec_hash: "ff".repeat(32),
            spec_ipfs: format!("bafy{}", "b".repeat(55)),
            created_at: 9,
            created_by: "author".into(),
            changelog: "tightened tolerances".into(),
            parent_version_id: "v1".into(),
        });
    }

    proptest! {
        #[test]
        fn prop_entity_roundtrip(
            name in "\\PC{0,24}",
            members in proptest::collection::btree_map("[a-z0-9]{1,12}", 0usize..3, 0..8),
            active in any::<bool>(),
        ) {
            let mut entity = EntityAccount::new("e".into(), name, EntityType::Municipality, "owner", 0);
            for (member, role) in members {
                entity.set_member(&member, Role::ALL[role]);
            }
            entity.active = active;
            roundtrip_both(&entity);
        }

        #[test]
        fn prop_spec_version_roundtrip(
            version in "\\PC{0,16}",
            changelog in "\\PC{0,64}",
            created_at in any::<i64>(),
        ) {
            roundtrip_both(&SpecVersion {
                id: "v".into(),
                project_id: "p".into(),
                version,
                spec_hash: String::new(),
                spec_ipfs: String::new(),
                created_at,
                created_by: "c".into(),
                changelog,
                parent_version_id: String::new(),
            });
        }
    }
}

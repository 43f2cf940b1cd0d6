//! Document registry: content pointers attached to stamps.

use stampledger_core::{new_record_id, validate_ipfs_hash, DocumentStorage};
use stampledger_store::{KvStore, WriteBatch};
use tracing::info;

use crate::error::{LedgerError, Result};
use crate::events::{AuditEvent, EventKind};
use crate::ledger::Ledger;
use crate::lookup::resolve_group;
use crate::schema::{self, DOCUMENTS, DOCUMENTS_BY_STAMP};

/// A request to attach a document to a stamp.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewDocument {
    pub stamp_id: String,
    /// IPFS content identifier (`Qm...` or `bafy...`).
    pub ipfs_hash: String,
    pub filename: String,
    pub size: i64,
    pub mime_type: String,
    pub pin_forever: bool,
}

/// Result of [`Ledger::store_document`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    pub document_id: String,
    /// `scheme://ipfs_hash`, scheme taken from the ledger config.
    pub locator: String,
}

impl<S: KvStore> Ledger<S> {
    // ─────────────────────────────────────────────────────────────────────────
    // Document Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach a document to one of the caller's own stamps.
    pub async fn store_document(&self, creator: &str, request: NewDocument) -> Result<StoredDocument> {
        let stamp = self.get_stamp(&request.stamp_id).await?;
        if stamp.creator != creator {
            return Err(LedgerError::Unauthorized(
                "only the stamp creator can attach documents".to_string(),
            ));
        }
        validate_ipfs_hash(&request.ipfs_hash)?;

        let document = DocumentStorage {
            id: new_record_id(),
            stamp_id: request.stamp_id,
            ipfs_hash: request.ipfs_hash,
            filename: request.filename,
            size: request.size,
            mime_type: request.mime_type,
            uploaded_at: self.now(),
            uploaded_by: creator.to_string(),
            pinned: request.pin_forever,
        };

        let mut batch = WriteBatch::new();
        schema::stage_document(&mut batch, &document)?;
        self.commit(batch).await?;

        info!(document_id = %document.id, stamp_id = %document.stamp_id, "document stored");
        self.emit(
            AuditEvent::new(EventKind::DocumentStored)
                .with("document_id", document.id.as_str())
                .with("stamp_id", document.stamp_id.as_str())
                .with("ipfs_hash", document.ipfs_hash.as_str())
                .with("filename", document.filename.as_str()),
        );

        Ok(StoredDocument {
            locator: self.config().locator(&document.ipfs_hash),
            document_id: document.id,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Document Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn get_document(&self, document_id: &str) -> Result<DocumentStorage> {
        DOCUMENTS
            .get(self.store(), document_id)
            .await?
            .ok_or_else(|| LedgerError::DocumentNotFound(document_id.to_string()))
    }

    /// Documents attached to `stamp_id`, in document id order.
    pub async fn get_documents_by_stamp(&self, stamp_id: &str) -> Result<Vec<DocumentStorage>> {
        resolve_group(self.store(), DOCUMENTS_BY_STAMP, &DOCUMENTS, stamp_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::error::ErrorKind;
    use crate::testing::{cid_v0, harness, harness_with, signed_request, T0};

    fn request(stamp_id: &str, ipfs_hash: &str) -> NewDocument {
        NewDocument {
            stamp_id: stamp_id.to_string(),
            ipfs_hash: ipfs_hash.to_string(),
            filename: "sheet-s101.pdf".into(),
            size: 1_048_576,
            mime_type: "application/pdf".into(),
            pin_forever: true,
        }
    }

    #[tokio::test]
    async fn test_store_and_lookup() {
        let h = harness();
        let stamp_id = h
            .ledger
            .issue_stamp("pe-1", signed_request(1, b"doc"))
            .await
            .unwrap();

        let stored = h
            .ledger
            .store_document("pe-1", request(&stamp_id, &cid_v0()))
            .await
            .unwrap();
        assert_eq!(stored.locator, format!("ipfs://{}", cid_v0()));

        let doc = h.ledger.get_document(&stored.document_id).await.unwrap();
        assert_eq!(doc.stamp_id, stamp_id);
        assert_eq!(doc.uploaded_by, "pe-1");
        assert_eq!(doc.uploaded_at, T0);
        assert!(doc.pinned);

        let attached = h.ledger.get_documents_by_stamp(&stamp_id).await.unwrap();
        assert_eq!(attached, vec![doc]);

        let event = h.events.last().unwrap();
        assert_eq!(event.kind, EventKind::DocumentStored);
        assert_eq!(event.attribute("filename"), Some("sheet-s101.pdf"));
    }

    #[tokio::test]
    async fn test_store_checks_in_order() {
        let h = harness();
        let stamp_id = h
            .ledger
            .issue_stamp("pe-1", signed_request(1, b"doc"))
            .await
            .unwrap();

        // Unknown stamp wins over a bad hash.
        let err = h
            .ledger
            .store_document("pe-1", request("missing", "bad"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::StampNotFound(_)));

        // Wrong creator wins over a bad hash, and a good hash does not help.
        for hash in ["bad".to_string(), cid_v0()] {
            let err = h
                .ledger
                .store_document("pe-2", request(&stamp_id, &hash))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Unauthorized);
        }

        let wrong_prefix = format!("Xm{}", "Y".repeat(44));
        for hash in ["Qm-too-short", wrong_prefix.as_str()] {
            let err = h
                .ledger
                .store_document("pe-1", request(&stamp_id, hash))
                .await
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidFormat);
        }

        assert!(h.ledger.get_documents_by_stamp(&stamp_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_cid_v1_and_custom_scheme() {
        let h = harness_with(LedgerConfig {
            locator_scheme: "ipns".into(),
            ..LedgerConfig::default()
        });
        let stamp_id = h
            .ledger
            .issue_stamp("pe-1", signed_request(1, b"doc"))
            .await
            .unwrap();
        let cid = format!("bafy{}", "b".repeat(55));

        let stored = h
            .ledger
            .store_document("pe-1", request(&stamp_id, &cid))
            .await
            .unwrap();
        assert_eq!(stored.locator, format!("ipns://{}", cid));

        let err = h.ledger.get_document("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }
}

//! Stamp registry: issuance, revocation, and re-verification.

use stampledger_core::{new_record_id, verify_attestation, Stamp, StampMetadata};
use stampledger_store::{KvStore, WriteBatch};
use tracing::{debug, info};

use crate::error::{LedgerError, Result};
use crate::events::{AuditEvent, EventKind};
use crate::ledger::Ledger;
use crate::lookup::resolve_group;
use crate::schema::{self, STAMPS, STAMPS_BY_JURISDICTION, STAMPS_BY_PE};

/// A request to issue a stamp.
///
/// The three cryptographic fields are lower-case hex as produced by the
/// PE's signing tool: a SHA-256 document hash, an Ed25519 public key, and
/// an Ed25519 signature over the raw hash bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewStamp {
    pub document_hash: String,
    pub pe_public_key: String,
    pub signature: String,
    /// Empty to leave the stamp unfiled.
    pub jurisdiction_id: String,
    pub metadata: StampMetadata,
}

/// Outcome of [`Ledger::verify_stamp`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verification {
    pub valid: bool,
    pub reason: String,
}

impl Verification {
    fn valid() -> Self {
        Self {
            valid: true,
            reason: "valid".to_string(),
        }
    }

    fn invalid(reason: impl Into<String>) -> Self {
        Self {
            valid: false,
            reason: reason.into(),
        }
    }
}

impl<S: KvStore> Ledger<S> {
    // ─────────────────────────────────────────────────────────────────────────
    // Stamp Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Issue a stamp. Returns the new stamp id.
    ///
    /// The attestation is decoded and verified before anything is written.
    /// Ids are random: issuing the same request twice creates two stamps.
    pub async fn issue_stamp(&self, creator: &str, request: NewStamp) -> Result<String> {
        verify_attestation(
            &request.document_hash,
            &request.pe_public_key,
            &request.signature,
        )?;

        let stamp = Stamp {
            id: new_record_id(),
            document_hash: request.document_hash,
            pe_public_key: request.pe_public_key,
            signature: request.signature,
            jurisdiction_id: request.jurisdiction_id,
            creator: creator.to_string(),
            created_at: self.now(),
            revoked: false,
            revoked_at: 0,
            revoked_reason: String::new(),
            metadata: request.metadata,
        };

        let mut batch = WriteBatch::new();
        schema::stage_stamp(&mut batch, &stamp)?;
        self.commit(batch).await?;

        info!(stamp_id = %stamp.id, creator, "stamp issued");
        self.emit(
            AuditEvent::new(EventKind::StampCreated)
                .with("stamp_id", stamp.id.as_str())
                .with("pe_public_key", stamp.pe_public_key.as_str())
                .with("jurisdiction", stamp.jurisdiction_id.as_str())
                .with("creator", creator),
        );

        Ok(stamp.id)
    }

    /// Revoke a stamp. Only its creator may, and only once.
    pub async fn revoke_stamp(&self, creator: &str, stamp_id: &str, reason: &str) -> Result<()> {
        let _guard = self.locks().lock(STAMPS.key(stamp_id)).await;

        let mut stamp = self.get_stamp(stamp_id).await?;
        if stamp.revoked {
            return Err(LedgerError::AlreadyRevoked(stamp_id.to_string()));
        }
        if stamp.creator != creator {
            return Err(LedgerError::Unauthorized(
                "only the stamp creator can revoke it".to_string(),
            ));
        }

        stamp.revoke(reason, self.now());

        let mut batch = WriteBatch::new();
        STAMPS.put_into(&mut batch, stamp_id, &stamp)?;
        self.commit(batch).await?;

        info!(stamp_id, creator, reason, "stamp revoked");
        self.emit(
            AuditEvent::new(EventKind::StampRevoked)
                .with("stamp_id", stamp_id)
                .with("reason", reason)
                .with("revoked_by", creator),
        );

        Ok(())
    }

    /// Re-check a stored stamp.
    ///
    /// A revoked stamp is invalid regardless of its signature. Otherwise the
    /// stored fields go through the same verification as issuance.
    pub async fn verify_stamp(&self, stamp_id: &str) -> Result<Verification> {
        let stamp = self.get_stamp(stamp_id).await?;

        if stamp.revoked {
            return Ok(Verification::invalid(format!(
                "stamp revoked: {}",
                stamp.revoked_reason
            )));
        }

        match stamp.verify_signature() {
            Ok(()) => Ok(Verification::valid()),
            Err(e) => {
                debug!(stamp_id, error = %e, "stored stamp failed verification");
                Ok(Verification::invalid("signature verification failed"))
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Stamp Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn get_stamp(&self, stamp_id: &str) -> Result<Stamp> {
        STAMPS
            .get(self.store(), stamp_id)
            .await?
            .ok_or_else(|| LedgerError::StampNotFound(stamp_id.to_string()))
    }

    /// Stamps signed with `pe_public_key`, in stamp id order.
    pub async fn get_stamps_by_pe(&self, pe_public_key: &str) -> Result<Vec<Stamp>> {
        resolve_group(self.store(), STAMPS_BY_PE, &STAMPS, pe_public_key).await
    }

    /// Stamps filed under `jurisdiction_id`, in stamp id order.
    pub async fn get_stamps_by_jurisdiction(&self, jurisdiction_id: &str) -> Result<Vec<Stamp>> {
        resolve_group(self.store(), STAMPS_BY_JURISDICTION, &STAMPS, jurisdiction_id).await
    }

    /// Every stamp, in id order.
    pub async fn all_stamps(&self) -> Result<Vec<Stamp>> {
        Ok(STAMPS.scan_all(self.store()).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::testing::{harness, signed_request, T0};
    use stampledger_store::KvStore;

    #[tokio::test]
    async fn test_issue_and_verify() {
        let h = harness();
        let request = signed_request(1, b"drawing set A");
        let pe_key = request.pe_public_key.clone();

        let id = h.ledger.issue_stamp("pe-1", request).await.unwrap();

        let stamp = h.ledger.get_stamp(&id).await.unwrap();
        assert_eq!(stamp.creator, "pe-1");
        assert_eq!(stamp.created_at, T0);
        assert!(!stamp.revoked);

        let check = h.ledger.verify_stamp(&id).await.unwrap();
        assert_eq!(check, Verification::valid());

        let by_pe = h.ledger.get_stamps_by_pe(&pe_key).await.unwrap();
        assert_eq!(by_pe.len(), 1);
        assert_eq!(by_pe[0].id, id);

        let event = h.events.last().unwrap();
        assert_eq!(event.kind, EventKind::StampCreated);
        assert_eq!(event.attribute("stamp_id"), Some(id.as_str()));
        assert_eq!(event.attribute("creator"), Some("pe-1"));
    }

    #[tokio::test]
    async fn test_jurisdiction_index_only_when_filed() {
        let h = harness();
        let filed = NewStamp {
            jurisdiction_id: "travis-county".into(),
            ..signed_request(1, b"a")
        };
        let filed_id = h.ledger.issue_stamp("pe-1", filed).await.unwrap();
        h.ledger
            .issue_stamp("pe-1", signed_request(1, b"b"))
            .await
            .unwrap();

        let in_county = h.ledger.get_stamps_by_jurisdiction("travis-county").await.unwrap();
        assert_eq!(in_county.len(), 1);
        assert_eq!(in_county[0].id, filed_id);
        assert!(h.ledger.get_stamps_by_jurisdiction("").await.unwrap().is_empty());
        assert_eq!(h.ledger.all_stamps().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_requests_write_nothing() {
        let h = harness();
        let good = signed_request(1, b"doc");

        let cases = [
            (
                NewStamp {
                    document_hash: "00".repeat(31),
                    ..good.clone()
                },
                ErrorKind::InvalidFormat,
            ),
            (
                NewStamp {
                    pe_public_key: "zz".repeat(32),
                    ..good.clone()
                },
                ErrorKind::InvalidFormat,
            ),
            (
                NewStamp {
                    signature: good.signature[..126].to_string(),
                    ..good.clone()
                },
                ErrorKind::InvalidFormat,
            ),
            (
                NewStamp {
                    pe_public_key: signed_request(2, b"doc").pe_public_key,
                    ..good.clone()
                },
                ErrorKind::SignatureInvalid,
            ),
        ];

        for (request, kind) in cases {
            let err = h.ledger.issue_stamp("pe-1", request).await.unwrap_err();
            assert_eq!(err.kind(), kind, "{}", err);
        }

        assert!(h.ledger.store().scan_prefix(&[]).await.unwrap().is_empty());
        assert!(h.events.events().is_empty());
    }

    #[tokio::test]
    async fn test_revoke_order_of_checks() {
        let h = harness();
        let id = h
            .ledger
            .issue_stamp("pe-1", signed_request(1, b"doc"))
            .await
            .unwrap();

        let err = h.ledger.revoke_stamp("pe-1", "nope", "x").await.unwrap_err();
        assert!(matches!(err, LedgerError::StampNotFound(_)));

        let err = h.ledger.revoke_stamp("intruder", &id, "x").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);

        h.clock.advance(60);
        h.ledger.revoke_stamp("pe-1", &id, "superseded").await.unwrap();

        // Already-revoked is reported before the creator check.
        let err = h.ledger.revoke_stamp("intruder", &id, "again").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::AlreadyRevoked);

        let stamp = h.ledger.get_stamp(&id).await.unwrap();
        assert!(stamp.revoked);
        assert_eq!(stamp.revoked_at, T0 + 60);
        assert_eq!(stamp.revoked_reason, "superseded");

        let event = h.events.last().unwrap();
        assert_eq!(event.kind, EventKind::StampRevoked);
        assert_eq!(event.attribute("revoked_by"), Some("pe-1"));
    }

    #[tokio::test]
    async fn test_verify_revoked_skips_signature() {
        let h = harness();
        let id = h
            .ledger
            .issue_stamp("pe-1", signed_request(1, b"doc"))
            .await
            .unwrap();
        h.ledger.revoke_stamp("pe-1", &id, "error in sheet 4").await.unwrap();

        let check = h.ledger.verify_stamp(&id).await.unwrap();
        assert!(!check.valid);
        assert_eq!(check.reason, "stamp revoked: error in sheet 4");
    }

    #[tokio::test]
    async fn test_verify_revoked_ignores_broken_signature() {
        let h = harness();
        let id = h
            .ledger
            .issue_stamp("pe-1", signed_request(1, b"doc"))
            .await
            .unwrap();
        h.ledger.revoke_stamp("pe-1", &id, "superseded").await.unwrap();

        let mut stamp = h.ledger.get_stamp(&id).await.unwrap();
        stamp.document_hash = stampledger_core::DocumentHash::digest(b"other drawing").to_hex();
        stamp.signature = "zz".repeat(64);
        STAMPS.put(h.ledger.store(), &id, &stamp).await.unwrap();

        let check = h.ledger.verify_stamp(&id).await.unwrap();
        assert!(!check.valid);
        assert_eq!(check.reason, "stamp revoked: superseded");
    }

    #[tokio::test]
    async fn test_verify_detects_tampered_record() {
        let h = harness();
        let id = h
            .ledger
            .issue_stamp("pe-1", signed_request(1, b"doc"))
            .await
            .unwrap();

        let mut stamp = h.ledger.get_stamp(&id).await.unwrap();
        stamp.document_hash = stampledger_core::DocumentHash::digest(b"something else").to_hex();
        STAMPS.put(h.ledger.store(), &id, &stamp).await.unwrap();

        let check = h.ledger.verify_stamp(&id).await.unwrap();
        assert_eq!(check.reason, "signature verification failed");
        assert!(!check.valid);

        let err = h.ledger.verify_stamp("missing").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_same_request_twice_gives_two_stamps() {
        let h = harness();
        let request = signed_request(1, &[0u8; 8]);
        let key = request.pe_public_key.clone();

        let a = h.ledger.issue_stamp("pe-1", request.clone()).await.unwrap();
        let b = h.ledger.issue_stamp("pe-1", request).await.unwrap();

        assert_ne!(a, b);
        assert_eq!(h.ledger.get_stamps_by_pe(&key).await.unwrap().len(), 2);
    }
}

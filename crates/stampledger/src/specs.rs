//! Spec version registry: immutable, parent-linked version lineage.

use std::collections::HashSet;

use stampledger_core::{new_record_id, validate_project_id, validate_version_label, SpecVersion};
use stampledger_store::{KvStore, WriteBatch};
use tracing::{info, warn};

use crate::error::{LedgerError, Result};
use crate::events::{AuditEvent, EventKind};
use crate::ledger::Ledger;
use crate::lookup::resolve_group;
use crate::schema::{self, SPEC_VERSIONS, SPEC_VERSIONS_BY_PROJECT};

/// A request to record a new spec version.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewSpecVersion {
    pub project_id: String,
    pub version: String,
    pub spec_hash: String,
    pub spec_ipfs: String,
    pub changelog: String,
    /// Empty for a root version; otherwise must name an existing version.
    pub parent_version_id: String,
}

impl<S: KvStore> Ledger<S> {
    // ─────────────────────────────────────────────────────────────────────────
    // Spec Version Operations
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn create_spec_version(&self, creator: &str, request: NewSpecVersion) -> Result<String> {
        if !request.parent_version_id.is_empty()
            && !SPEC_VERSIONS
                .contains(self.store(), &request.parent_version_id)
                .await?
        {
            return Err(LedgerError::ParentVersionNotFound(request.parent_version_id));
        }
        validate_version_label(&request.version)?;
        validate_project_id(&request.project_id)?;

        let version = SpecVersion {
            id: new_record_id(),
            project_id: request.project_id,
            version: request.version,
            spec_hash: request.spec_hash,
            spec_ipfs: request.spec_ipfs,
            created_at: self.now(),
            created_by: creator.to_string(),
            changelog: request.changelog,
            parent_version_id: request.parent_version_id,
        };

        let mut batch = WriteBatch::new();
        schema::stage_spec_version(&mut batch, &version)?;
        self.commit(batch).await?;

        info!(
            version_id = %version.id,
            project_id = %version.project_id,
            version = %version.version,
            "spec version created"
        );
        self.emit(
            AuditEvent::new(EventKind::SpecVersionCreated)
                .with("version_id", version.id.as_str())
                .with("project_id", version.project_id.as_str())
                .with("version", version.version.as_str())
                .with("created_by", creator),
        );

        Ok(version.id)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Spec Version Queries
    // ─────────────────────────────────────────────────────────────────────────

    pub async fn get_spec_version(&self, version_id: &str) -> Result<SpecVersion> {
        SPEC_VERSIONS
            .get(self.store(), version_id)
            .await?
            .ok_or_else(|| LedgerError::SpecVersionNotFound(version_id.to_string()))
    }

    /// Versions of `project_id`, in version id order.
    pub async fn get_spec_versions_by_project(&self, project_id: &str) -> Result<Vec<SpecVersion>> {
        resolve_group(self.store(), SPEC_VERSIONS_BY_PROJECT, &SPEC_VERSIONS, project_id).await
    }

    /// Walk parent pointers from `start_id` towards the root.
    ///
    /// Returns the start version first and the oldest resolvable ancestor
    /// last. The walk ends at a root, at a missing id, at a revisited id,
    /// or after `max_history_depth` records. An unknown start id yields an
    /// empty history.
    pub async fn get_spec_history(&self, start_id: &str) -> Result<Vec<SpecVersion>> {
        let max_depth = self.config().max_history_depth;
        let mut history = Vec::new();
        let mut visited = HashSet::new();
        let mut next = Some(start_id.to_string());

        while let Some(id) = next.take() {
            if history.len() >= max_depth {
                warn!(start_id, max_depth, "spec history truncated at depth limit");
                break;
            }
            if !visited.insert(id.clone()) {
                warn!(start_id, version_id = %id, "spec history contains a parent cycle");
                break;
            }
            let Some(version) = SPEC_VERSIONS.get(self.store(), &id).await? else {
                break;
            };
            next = version.parent().map(str::to_string);
            history.push(version);
        }

        Ok(history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LedgerConfig;
    use crate::error::ErrorKind;
    use crate::testing::{harness, harness_with};

    fn request(project: &str, version: &str, parent: &str) -> NewSpecVersion {
        NewSpecVersion {
            project_id: project.to_string(),
            version: version.to_string(),
            spec_hash: "ab".repeat(32),
            spec_ipfs: format!("Qm{}", "Z".repeat(44)),
            changelog: format!("release {}", version),
            parent_version_id: parent.to_string(),
        }
    }

    #[tokio::test]
    async fn test_history_walks_to_root() {
        let h = harness();
        let root = h.ledger.create_spec_version("author", request("p1", "0.1", "")).await.unwrap();
        let v1 = h.ledger.create_spec_version("author", request("p1", "1.0", &root)).await.unwrap();
        let v2 = h.ledger.create_spec_version("author", request("p1", "2.0", &v1)).await.unwrap();
        let v3 = h.ledger.create_spec_version("author", request("p1", "3.0", &v2)).await.unwrap();

        let ids: Vec<String> = h
            .ledger
            .get_spec_history(&v3)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![v3, v2, v1.clone(), root.clone()]);

        let ids: Vec<String> = h
            .ledger
            .get_spec_history(&v1)
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![v1, root]);

        assert!(h.ledger.get_spec_history("missing").await.unwrap().is_empty());
        assert_eq!(h.ledger.get_spec_versions_by_project("p1").await.unwrap().len(), 4);
        assert_eq!(h.events.of_kind(EventKind::SpecVersionCreated).len(), 4);
    }

    #[tokio::test]
    async fn test_create_checks_in_order() {
        let h = harness();

        // Unknown parent is reported before an empty label.
        let err = h
            .ledger
            .create_spec_version("author", request("p1", "", "ghost"))
            .await
            .unwrap_err();
        assert!(matches!(err, LedgerError::ParentVersionNotFound(ref id) if id == "ghost"));

        let err = h
            .ledger
            .create_spec_version("author", request("", "", ""))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "validation error: invalid version format: version cannot be empty");

        let err = h
            .ledger
            .create_spec_version("author", request("", "1.0", ""))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidFormat);

        assert!(h.ledger.export_genesis().await.unwrap().spec_versions.is_empty());
        assert!(h.events.events().is_empty());
    }

    fn version(id: &str, parent: &str) -> SpecVersion {
        SpecVersion {
            id: id.to_string(),
            project_id: "p".into(),
            version: id.to_string(),
            spec_hash: String::new(),
            spec_ipfs: String::new(),
            created_at: 0,
            created_by: "author".into(),
            changelog: String::new(),
            parent_version_id: parent.to_string(),
        }
    }

    #[tokio::test]
    async fn test_history_terminates_on_cycle() {
        let h = harness();
        let store = h.ledger.store();
        SPEC_VERSIONS.put(store, "a", &version("a", "b")).await.unwrap();
        SPEC_VERSIONS.put(store, "b", &version("b", "c")).await.unwrap();
        SPEC_VERSIONS.put(store, "c", &version("c", "a")).await.unwrap();

        let ids: Vec<String> = h
            .ledger
            .get_spec_history("a")
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);

        SPEC_VERSIONS.put(store, "self", &version("self", "self")).await.unwrap();
        assert_eq!(h.ledger.get_spec_history("self").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_history_depth_limit() {
        let h = harness_with(LedgerConfig {
            max_history_depth: 3,
            ..LedgerConfig::default()
        });
        let mut parent = String::new();
        for i in 0..6 {
            parent = h
                .ledger
                .create_spec_version("author", request("p", &format!("{}.0", i), &parent))
                .await
                .unwrap();
        }

        let history = h.ledger.get_spec_history(&parent).await.unwrap();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].version, "5.0");
        assert_eq!(history[2].version, "3.0");
    }
}

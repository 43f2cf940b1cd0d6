//! Genesis export and import of the full ledger state.

use serde::{Deserialize, Serialize};
use stampledger_core::{DocumentStorage, EntityAccount, SpecVersion, Stamp};
use stampledger_store::{KvStore, WriteBatch};
use tracing::info;

use crate::error::Result;
use crate::ledger::Ledger;
use crate::schema::{self, DOCUMENTS, ENTITIES, SPEC_VERSIONS, STAMPS};

/// Every record in the ledger, each list in ascending id order.
///
/// Index entries are not part of the state; they are rebuilt on import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisState {
    pub stamps: Vec<Stamp>,
    pub documents: Vec<DocumentStorage>,
    pub entities: Vec<EntityAccount>,
    pub spec_versions: Vec<SpecVersion>,
}

impl GenesisState {
    pub fn record_count(&self) -> usize {
        self.stamps.len() + self.documents.len() + self.entities.len() + self.spec_versions.len()
    }
}

impl<S: KvStore> Ledger<S> {
    // ─────────────────────────────────────────────────────────────────────────
    // Genesis
    // ─────────────────────────────────────────────────────────────────────────

    /// Snapshot every record table.
    pub async fn export_genesis(&self) -> Result<GenesisState> {
        Ok(GenesisState {
            stamps: STAMPS.scan_all(self.store()).await?,
            documents: DOCUMENTS.scan_all(self.store()).await?,
            entities: ENTITIES.scan_all(self.store()).await?,
            spec_versions: SPEC_VERSIONS.scan_all(self.store()).await?,
        })
    }

    /// Load exported records and rebuild their indexes, in one batch.
    ///
    /// Records are written as exported; signatures and references are not
    /// re-checked. No audit events are emitted.
    pub async fn init_genesis(&self, state: &GenesisState) -> Result<()> {
        let mut batch = WriteBatch::new();
        for stamp in &state.stamps {
            schema::stage_stamp(&mut batch, stamp)?;
        }
        for document in &state.documents {
            schema::stage_document(&mut batch, document)?;
        }
        for entity in &state.entities {
            schema::stage_entity(&mut batch, entity)?;
        }
        for version in &state.spec_versions {
            schema::stage_spec_version(&mut batch, version)?;
        }

        let writes = batch.len();
        self.commit(batch).await?;

        info!(records = state.record_count(), writes, "genesis state imported");
        Ok(())
    }
}

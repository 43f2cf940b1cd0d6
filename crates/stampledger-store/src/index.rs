//! Secondary indexes: ordered `group -> {record id}` multimaps.
//!
//! Each entry is a composite `(group, record_id)` key mapped to an empty
//! marker. Listing a group is a prefix scan; ids come back ordered by their
//! bytes, not by creation time.
//!
//! Indexes only know ids. Turning ids into records (and deciding what to
//! do when a record is missing) is the ledger's job.

use crate::error::{Result, StoreError};
use crate::keys::{decode_index_key, index_group_prefix, index_key, TableTag};
use crate::traits::{KvStore, WriteBatch};

/// One secondary index table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SecondaryIndex {
    tag: TableTag,
}

impl SecondaryIndex {
    pub const fn new(tag: TableTag) -> Self {
        Self { tag }
    }

    pub fn tag(&self) -> TableTag {
        self.tag
    }

    /// Queue the entry `(group, record_id)`.
    pub fn insert(&self, batch: &mut WriteBatch, group: &str, record_id: &str) {
        batch.put(index_key(self.tag, group, record_id), Vec::new());
    }

    /// Record ids filed under `group`, in ascending byte order.
    pub async fn members_of<S: KvStore + ?Sized>(&self, store: &S, group: &str) -> Result<Vec<String>> {
        let prefix = index_group_prefix(self.tag, group);
        store
            .scan_prefix(&prefix)
            .await?
            .into_iter()
            .map(|(key, _)| {
                decode_index_key(self.tag, &key)
                    .map(|(_, record_id)| record_id)
                    .ok_or_else(|| {
                        StoreError::InvalidData(format!(
                            "malformed {} index key ({} bytes)",
                            self.tag.name(),
                            key.len()
                        ))
                    })
            })
            .collect()
    }
}

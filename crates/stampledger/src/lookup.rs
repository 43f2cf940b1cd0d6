//! Index resolution.

use stampledger_store::{KvStore, RecordTable, SecondaryIndex, ValueCodec};
use tracing::debug;

use crate::error::Result;

/// Resolve every record filed under `group` in `index`.
///
/// An entry whose record is missing is skipped, never reported. This is
/// the only place that policy lives; every one-to-many lookup goes
/// through here.
pub(crate) async fn resolve_group<S, T, C>(
    store: &S,
    index: SecondaryIndex,
    table: &RecordTable<T, C>,
    group: &str,
) -> Result<Vec<T>>
where
    S: KvStore + ?Sized,
    C: ValueCodec<T>,
{
    let ids = index.members_of(store, group).await?;
    let mut records = Vec::with_capacity(ids.len());

    for id in ids {
        match table.get(store, &id).await? {
            Some(record) => records.push(record),
            None => debug!(
                index = index.tag().name(),
                group,
                record_id = %id,
                "skipping index entry with missing record"
            ),
        }
    }

    Ok(records)
}

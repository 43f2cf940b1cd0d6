//! Key encoding for the ledger's nine tables.
//!
//! Every table owns a distinct one-byte tag, so no two tables can ever
//! produce the same key.
//!
//! Record key: `{tag:1}{id:var}`
//!
//! Index key:  `{tag:1}{len(group):4BE}{group:var}{record_id:var}`
//!
//! Length-prefixing the group makes `{tag}{len}{group}` a prefix of
//! exactly that group's entries (a group `"ab"` never matches entries of
//! group `"abc"`), and entries within a group sort by record id bytes.

/// Table tags. The byte values are part of the on-disk format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum TableTag {
    Stamps = 0x01,
    StampsByPe = 0x02,
    StampsByJurisdiction = 0x03,
    Documents = 0x10,
    DocumentsByStamp = 0x11,
    Entities = 0x20,
    EntitiesByOwner = 0x21,
    SpecVersions = 0x30,
    SpecVersionsByProject = 0x31,
}

impl TableTag {
    pub const ALL: [TableTag; 9] = [
        TableTag::Stamps,
        TableTag::StampsByPe,
        TableTag::StampsByJurisdiction,
        TableTag::Documents,
        TableTag::DocumentsByStamp,
        TableTag::Entities,
        TableTag::EntitiesByOwner,
        TableTag::SpecVersions,
        TableTag::SpecVersionsByProject,
    ];

    pub const fn byte(self) -> u8 {
        self as u8
    }

    /// Human-readable table name, for logs.
    pub const fn name(self) -> &'static str {
        match self {
            TableTag::Stamps => "stamps",
            TableTag::StampsByPe => "stamps_by_pe",
            TableTag::StampsByJurisdiction => "stamps_by_jurisdiction",
            TableTag::Documents => "documents",
            TableTag::DocumentsByStamp => "documents_by_stamp",
            TableTag::Entities => "entities",
            TableTag::EntitiesByOwner => "entities_by_owner",
            TableTag::SpecVersions => "spec_versions",
            TableTag::SpecVersionsByProject => "spec_versions_by_project",
        }
    }

    /// True for the five secondary-index tables.
    pub const fn is_index(self) -> bool {
        matches!(
            self,
            TableTag::StampsByPe
                | TableTag::StampsByJurisdiction
                | TableTag::DocumentsByStamp
                | TableTag::EntitiesByOwner
                | TableTag::SpecVersionsByProject
        )
    }
}

/// Key of a record in a record table.
pub fn record_key(tag: TableTag, id: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(1 + id.len());
    key.push(tag.byte());
    key.extend_from_slice(id.as_bytes());
    key
}

/// Prefix shared by every entry of `group` in an index table.
pub fn index_group_prefix(tag: TableTag, group: &str) -> Vec<u8> {
    let mut key = Vec::with_capacity(5 + group.len());
    key.push(tag.byte());
    key.extend_from_slice(&(group.len() as u32).to_be_bytes());
    key.extend_from_slice(group.as_bytes());
    key
}

/// Composite `(group, record_id)` key in an index table.
pub fn index_key(tag: TableTag, group: &str, record_id: &str) -> Vec<u8> {
    let mut key = index_group_prefix(tag, group);
    key.extend_from_slice(record_id.as_bytes());
    key
}

/// Split an index key back into `(group, record_id)`.
///
/// Returns None if the key does not belong to `tag` or is malformed.
pub fn decode_index_key(tag: TableTag, key: &[u8]) -> Option<(String, String)> {
    let (&first, rest) = key.split_first()?;
    if first != tag.byte() || rest.len() < 4 {
        return None;
    }
    let group_len = u32::from_be_bytes(rest[..4].try_into().ok()?) as usize;
    let rest = &rest[4..];
    if rest.len() < group_len {
        return None;
    }
    let group = std::str::from_utf8(&rest[..group_len]).ok()?;
    let record_id = std::str::from_utf8(&rest[group_len..]).ok()?;
    Some((group.to_string(), record_id.to_string()))
}

/// The smallest key greater than every key starting with `prefix`.
///
/// Returns None when no such bound exists (empty or all-`0xFF` prefix).
pub fn prefix_successor(prefix: &[u8]) -> Option<Vec<u8>> {
    let mut bound = prefix.to_vec();
    while let Some(last) = bound.pop() {
        if last < u8::MAX {
            bound.push(last + 1);
            return Some(bound);
        }
    }
    None
}

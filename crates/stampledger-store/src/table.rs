//! Typed record tables.

use std::marker::PhantomData;

use crate::codec::{CborCodec, ValueCodec};
use crate::error::Result;
use crate::keys::{record_key, TableTag};
use crate::traits::{KvStore, WriteBatch};

/// A table of `T` records keyed by string id, encoded with `C`.
pub struct RecordTable<T, C = CborCodec> {
    tag: TableTag,
    codec: C,
    _record: PhantomData<fn() -> T>,
}

impl<T> RecordTable<T, CborCodec> {
    /// A table using the default CBOR codec.
    pub const fn new(tag: TableTag) -> Self {
        Self::with_codec(tag, CborCodec)
    }
}

impl<T, C> RecordTable<T, C> {
    pub const fn with_codec(tag: TableTag, codec: C) -> Self {
        Self {
            tag,
            codec,
            _record: PhantomData,
        }
    }

    pub fn tag(&self) -> TableTag {
        self.tag
    }

    pub fn key(&self, id: &str) -> Vec<u8> {
        record_key(self.tag, id)
    }
}

impl<T, C: ValueCodec<T>> RecordTable<T, C> {
    pub fn encode(&self, value: &T) -> Result<Vec<u8>> {
        self.codec.encode(value)
    }

    /// Queue a write of `value` under `id`.
    pub fn put_into(&self, batch: &mut WriteBatch, id: &str, value: &T) -> Result<()> {
        batch.put(self.key(id), self.codec.encode(value)?);
        Ok(())
    }

    pub async fn get<S: KvStore + ?Sized>(&self, store: &S, id: &str) -> Result<Option<T>> {
        match store.get(&self.key(id)).await? {
            Some(bytes) => Ok(Some(self.codec.decode(&bytes)?)),
            None => Ok(None),
        }
    }

    pub async fn contains<S: KvStore + ?Sized>(&self, store: &S, id: &str) -> Result<bool> {
        store.contains(&self.key(id)).await
    }

    /// Write a single record outside of a batch.
    pub async fn put<S: KvStore + ?Sized>(&self, store: &S, id: &str, value: &T) -> Result<()> {
        let bytes = self.codec.encode(value)?;
        store.set(&self.key(id), &bytes).await
    }

    /// Every record in the table, in ascending id byte order.
    pub async fn scan_all<S: KvStore + ?Sized>(&self, store: &S) -> Result<Vec<T>> {
        store
            .scan_prefix(&[self.tag.byte()])
            .await?
            .into_iter()
            .map(|(_, bytes)| self.codec.decode(&bytes))
            .collect()
    }
}

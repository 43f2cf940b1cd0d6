//! Value codecs: how a record type is turned into stored bytes.
//!
//! Encoding is a capability parameterized by record type, so a table can
//! switch formats without the registries noticing. CBOR is the default;
//! JSON matches the value encoding of earlier ledger deployments.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{Result, StoreError};

/// Encode and decode values of type `T`.
pub trait ValueCodec<T>: Send + Sync {
    fn encode(&self, value: &T) -> Result<Vec<u8>>;
    fn decode(&self, bytes: &[u8]) -> Result<T>;
}

/// CBOR via ciborium.
#[derive(Debug, Clone, Copy, Default)]
pub struct CborCodec;

impl<T: Serialize + DeserializeOwned> ValueCodec<T> for CborCodec {
    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(value, &mut buf)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(buf)
    }

    fn decode(&self, bytes: &[u8]) -> Result<T> {
        ciborium::from_reader(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

/// JSON via serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl<T: Serialize + DeserializeOwned> ValueCodec<T> for JsonCodec {
    fn encode(&self, value: &T) -> Result<Vec<u8>> {
        serde_json::to_vec(value).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    fn decode(&self, bytes: &[u8]) -> Result<T> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::BTreeMap;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: String,
        size: i64,
        flags: BTreeMap<String, bool>,
    }

    fn sample() -> Sample {
        Sample {
            id: "x".into(),
            size: -42,
            flags: BTreeMap::from([("pinned".to_string(), true)]),
        }
    }

    #[test]
    fn test_cbor_roundtrip() {
        let bytes = ValueCodec::<Sample>::encode(&CborCodec, &sample()).unwrap();
        let back: Sample = CborCodec.decode(&bytes).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_json_roundtrip() {
        let bytes = ValueCodec::<Sample>::encode(&JsonCodec, &sample()).unwrap();
        let back: Sample = JsonCodec.decode(&bytes).unwrap();
        assert_eq!(back, sample());
    }

    #[test]
    fn test_garbage_is_a_serialization_error() {
        let result: Result<Sample> = CborCodec.decode(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(StoreError::Serialization(_))));
        let result: Result<Sample> = JsonCodec.decode(b"{not json");
        assert!(matches!(result, Err(StoreError::Serialization(_))));
    }
}

//! Write sets - the buffered effects of one transaction

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single buffered write
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum WriteOp {
    Put {
        #[serde(with = "hex_bytes")]
        value: Vec<u8>,
    },
    Delete,
}

/// Keyed writes of one transaction. A later write to the same key replaces
/// the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WriteSet {
    writes: BTreeMap<String, WriteOp>,
}

impl WriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, key: impl Into<String>, value: Vec<u8>) {
        self.writes.insert(key.into(), WriteOp::Put { value });
    }

    pub fn delete(&mut self, key: impl Into<String>) {
        self.writes.insert(key.into(), WriteOp::Delete);
    }

    pub fn get(&self, key: &str) -> Option<&WriteOp> {
        self.writes.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    /// Writes in key order
    pub fn iter(&self) -> impl Iterator<Item = (&String, &WriteOp)> {
        self.writes.iter()
    }
}

/// Values are stored hex-encoded so arbitrary bytes survive JSON
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        hex::decode(encoded).map_err(serde::de::Error::custom)
    }
}

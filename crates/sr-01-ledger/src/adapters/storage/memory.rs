use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, ScanResult};
use std::collections::BTreeMap;

/// In-memory key-value store for unit tests and ephemeral nodes.
///
/// Backed by a `BTreeMap` so `scan_all` is key-ordered.
#[derive(Debug, Default, Clone)]
pub struct InMemoryKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
}

impl InMemoryKVStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        self.data.insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn scan_all(&self) -> Result<ScanResult, KVStoreError> {
        Ok(self
            .data
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn count(&self) -> Result<u64, KVStoreError> {
        Ok(self.data.len() as u64)
    }
}

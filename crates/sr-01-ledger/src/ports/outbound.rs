//! # Outbound Ports (Driven Ports)
//!
//! Dependencies required by the Ledger service.

use crate::domain::entities::Block;
use crate::domain::errors::{GateRejection, KVStoreError, SerializationError};

pub use shared_types::TimeSource;

/// Ordered `(key, value)` pairs from a scan.
pub type ScanResult = Vec<(Vec<u8>, Vec<u8>)>;

/// Abstract interface for key-value database operations.
///
/// Production: `FileBackedKVStore` or `RocksDbStore`
/// Testing: `InMemoryKVStore`
pub trait KeyValueStore: Send + Sync {
    /// Get a value by key.
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError>;

    /// Put a single key-value pair.
    ///
    /// Must be atomic per key: a concurrent reader sees the old value or the
    /// new one, never a partial write. An `Err` means nothing was persisted.
    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError>;

    /// All entries in ascending key order.
    fn scan_all(&self) -> Result<ScanResult, KVStoreError>;

    /// Number of stored keys.
    fn count(&self) -> Result<u64, KVStoreError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Box<T> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        (**self).get(key)
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        (**self).put(key, value)
    }

    fn scan_all(&self) -> Result<ScanResult, KVStoreError> {
        (**self).scan_all()
    }

    fn count(&self) -> Result<u64, KVStoreError> {
        (**self).count()
    }
}

/// Abstract interface for block serialization.
pub trait BlockSerializer: Send + Sync {
    /// Serialize a Block to bytes.
    fn serialize(&self, block: &Block) -> Result<Vec<u8>, SerializationError>;

    /// Deserialize bytes to a Block.
    fn deserialize(&self, data: &[u8]) -> Result<Block, SerializationError>;
}

/// Admission check consulted before a star claim is appended.
///
/// Implemented by the runtime on top of the validation registry.
pub trait SubmissionGate: Send + Sync {
    /// Accept or refuse a submission from `address`.
    fn admit(&self, address: &str) -> Result<(), GateRejection>;

    /// Called after the block for `address` is persisted.
    fn release(&self, address: &str);
}

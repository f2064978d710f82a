//! Store selection for the configured backend.

use sr_01_ledger::{FileBackedKVStore, InMemoryKVStore, KeyValueStore};
use tracing::info;

use crate::container::{StorageBackend, StorageConfig};
use crate::errors::NodeError;

/// Open the `KeyValueStore` named by `config.backend`.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>, NodeError> {
    match config.backend {
        StorageBackend::Memory => {
            info!("[sr-01] Using in-memory storage (nothing is persisted)");
            Ok(Box::new(InMemoryKVStore::new()))
        }
        StorageBackend::File => {
            let path = config.chain_file();
            info!("[sr-01] Using file storage at {}", path.display());
            let store = FileBackedKVStore::open(&path).map_err(sr_01_ledger::LedgerError::from)?;
            Ok(Box::new(store))
        }
        StorageBackend::RocksDb => open_rocksdb(config),
    }
}

#[cfg(feature = "rocksdb")]
fn open_rocksdb(config: &StorageConfig) -> Result<Box<dyn KeyValueStore>, NodeError> {
    let path = config.rocksdb_dir();
    info!("[sr-01] Using RocksDB storage at {}", path.display());
    let store = sr_01_ledger::RocksDbStore::open_default(&path)
        .map_err(sr_01_ledger::LedgerError::from)?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "rocksdb"))]
fn open_rocksdb(_config: &StorageConfig) -> Result<Box<dyn KeyValueStore>, NodeError> {
    Err(crate::container::ConfigError::BackendUnavailable("rocksdb").into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_lives_in_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            data_dir: dir.path().to_path_buf(),
            backend: StorageBackend::File,
        };

        let mut store = open_store(&config).unwrap();
        store.put(b"k", b"v").unwrap();

        assert!(config.chain_file().exists());
    }

    #[test]
    fn test_memory_store_starts_empty() {
        let store = open_store(&StorageConfig {
            backend: StorageBackend::Memory,
            ..StorageConfig::default()
        })
        .unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }
}

//! # RocksDB Storage Adapter
//!
//! RocksDB implementation of the `KeyValueStore` trait, enabled with the
//! `rocksdb` feature.
//!
//! Blocks live in the `blocks` column family. RocksDB iterates keys in byte
//! order, which matches height order for the zero-padded height keys.

use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, ScanResult};
use parking_lot::RwLock;
use rocksdb::{ColumnFamilyDescriptor, IteratorMode, Options, DB};
use std::path::Path;
use std::sync::Arc;

/// Column family holding block records.
pub const CF_BLOCKS: &str = "blocks";

/// RocksDB configuration
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true for durability)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/rocksdb".to_string(),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Create config for testing (smaller buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed key-value store
pub struct RocksDbStore {
    db: Arc<RwLock<DB>>,
    config: RocksDbConfig,
}

impl RocksDbStore {
    /// Open or create a RocksDB database
    pub fn open(config: RocksDbConfig) -> Result<Self, KVStoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let mut cf_opts = Options::default();
        cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
        let cf_descriptors = vec![ColumnFamilyDescriptor::new(CF_BLOCKS, cf_opts)];

        let db = DB::open_cf_descriptors(&opts, &config.path, cf_descriptors).map_err(|e| {
            KVStoreError::IOError {
                message: format!("Failed to open RocksDB: {}", e),
            }
        })?;

        Ok(Self {
            db: Arc::new(RwLock::new(db)),
            config,
        })
    }

    /// Open with default tuning at `path`
    pub fn open_default(path: impl AsRef<Path>) -> Result<Self, KVStoreError> {
        let config = RocksDbConfig {
            path: path.as_ref().to_string_lossy().to_string(),
            ..Default::default()
        };
        Self::open(config)
    }

    fn missing_cf() -> KVStoreError {
        KVStoreError::CorruptionError {
            message: format!("column family '{}' missing", CF_BLOCKS),
        }
    }
}

impl KeyValueStore for RocksDbStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        let db = self.db.read();
        let cf = db.cf_handle(CF_BLOCKS).ok_or_else(Self::missing_cf)?;
        db.get_cf(cf, key).map_err(|e| KVStoreError::IOError {
            message: format!("RocksDB get failed: {}", e),
        })
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let db = self.db.write();
        let cf = db.cf_handle(CF_BLOCKS).ok_or_else(Self::missing_cf)?;
        let mut write_opts = rocksdb::WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);

        db.put_cf_opt(cf, key, value, &write_opts)
            .map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB put failed: {}", e),
            })
    }

    fn scan_all(&self) -> Result<ScanResult, KVStoreError> {
        let db = self.db.read();
        let cf = db.cf_handle(CF_BLOCKS).ok_or_else(Self::missing_cf)?;
        let mut results = Vec::new();

        for item in db.iterator_cf(cf, IteratorMode::Start) {
            let (key, value) = item.map_err(|e| KVStoreError::IOError {
                message: format!("RocksDB scan failed: {}", e),
            })?;
            results.push((key.to_vec(), value.to_vec()));
        }

        Ok(results)
    }

    fn count(&self) -> Result<u64, KVStoreError> {
        Ok(self.scan_all()?.len() as u64)
    }
}

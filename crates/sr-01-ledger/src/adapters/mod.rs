//! # Adapters Module
//!
//! Adapter implementations for the Ledger Engine.
//!
//! ## Modules
//!
//! - `storage`: `KeyValueStore` implementations (in-memory, file, RocksDB)
//! - `serializer`: JSON block serializer
//! - `lock`: Data-directory process locking (singleton guard)

#[cfg(feature = "locking")]
pub mod lock;
pub mod serializer;
pub mod storage;

pub use serializer::JsonBlockSerializer;
pub use storage::{FileBackedKVStore, InMemoryKVStore};

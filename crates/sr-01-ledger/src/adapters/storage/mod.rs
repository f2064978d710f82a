//! Storage Adapters
//!
//! Implementations of the `KeyValueStore` trait.

mod file;
mod memory;
#[cfg(feature = "rocksdb")]
pub mod rocksdb;

pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;

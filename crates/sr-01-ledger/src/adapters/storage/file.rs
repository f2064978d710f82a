use crate::domain::errors::KVStoreError;
use crate::ports::outbound::{KeyValueStore, ScanResult};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::info;

/// File-backed key-value store for production without RocksDB.
///
/// Keeps the full map in memory and rewrites a binary snapshot on every put,
/// via a temp file and rename, so the file on disk is always a complete map.
pub struct FileBackedKVStore {
    data: BTreeMap<Vec<u8>, Vec<u8>>,
    path: PathBuf,
}

impl FileBackedKVStore {
    /// Open the store at `path`, loading any existing snapshot.
    ///
    /// # Errors
    ///
    /// - `IOError`: the file exists but cannot be read
    /// - `CorruptionError`: the file is truncated or badly framed
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, KVStoreError> {
        let path = path.as_ref().to_path_buf();

        let data = match std::fs::read(&path) {
            Ok(bytes) => {
                let data = Self::decode(&bytes)?;
                info!(
                    "[sr-01] 💾 Loaded {} keys from {} ({} bytes)",
                    data.len(),
                    path.display(),
                    bytes.len()
                );
                data
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("[sr-01] 📁 No existing storage file at {}", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                return Err(KVStoreError::IOError {
                    message: format!("{}: {}", path.display(), e),
                })
            }
        };

        Ok(Self { data, path })
    }

    /// Location of the snapshot file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    // Format: [key_len:u32][key][value_len:u32][value]...
    fn decode(bytes: &[u8]) -> Result<BTreeMap<Vec<u8>, Vec<u8>>, KVStoreError> {
        let mut data = BTreeMap::new();
        let mut cursor = 0;

        while cursor < bytes.len() {
            let key = Self::read_chunk(bytes, &mut cursor)?;
            let value = Self::read_chunk(bytes, &mut cursor)?;
            data.insert(key, value);
        }

        Ok(data)
    }

    fn read_chunk(bytes: &[u8], cursor: &mut usize) -> Result<Vec<u8>, KVStoreError> {
        let truncated = |at: usize| KVStoreError::CorruptionError {
            message: format!("storage file truncated at byte {}", at),
        };

        let len_end = *cursor + 4;
        let len_bytes: [u8; 4] = bytes
            .get(*cursor..len_end)
            .and_then(|s| s.try_into().ok())
            .ok_or_else(|| truncated(*cursor))?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        let chunk = bytes
            .get(len_end..len_end + len)
            .ok_or_else(|| truncated(len_end))?;
        *cursor = len_end + len;
        Ok(chunk.to_vec())
    }

    fn save_to_file(&self) -> Result<(), KVStoreError> {
        use std::io::Write;

        let io_err = |e: std::io::Error| KVStoreError::IOError {
            message: e.to_string(),
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let mut bytes = Vec::new();
        for (key, value) in &self.data {
            bytes.extend_from_slice(&(key.len() as u32).to_le_bytes());
            bytes.extend_from_slice(key);
            bytes.extend_from_slice(&(value.len() as u32).to_le_bytes());
            bytes.extend_from_slice(value);
        }

        let temp_path = self.path.with_extension("tmp");
        let mut file = std::fs::File::create(&temp_path).map_err(io_err)?;
        file.write_all(&bytes).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;

        std::fs::rename(&temp_path, &self.path).map_err(io_err)
    }
}

impl KeyValueStore for FileBackedKVStore {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, KVStoreError> {
        Ok(self.data.get(key).cloned())
    }

    fn put(&mut self, key: &[u8], value: &[u8]) -> Result<(), KVStoreError> {
        let previous = self.data.insert(key.to_vec(), value.to_vec());

        if let Err(e) = self.save_to_file() {
            // Roll the map back so memory matches disk.
            match previous {
                Some(old) => self.data.insert(key.to_vec(), old),
                None => self.data.remove(key),
            };
            return Err(e);
        }
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

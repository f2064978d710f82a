//! # Node Configuration
//!
//! Unified configuration for both subsystems and runtime parameters.
//!
//! Values start from `Default` and are overridden once at startup from the
//! environment:
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `SR_DATA_DIR` | `./data` | Storage directory |
//! | `SR_STORAGE_BACKEND` | `file` | `file`, `memory` or `rocksdb` |
//! | `SR_VALIDATION_WINDOW_SECS` | `300` | Validation window |
//! | `SR_GENESIS_NOTE` | built-in note | Genesis block body |

use std::path::PathBuf;
use std::str::FromStr;

use sr_01_ledger::LedgerConfig;
use sr_02_validation::ValidationConfig;

pub const ENV_DATA_DIR: &str = "SR_DATA_DIR";
pub const ENV_STORAGE_BACKEND: &str = "SR_STORAGE_BACKEND";
pub const ENV_VALIDATION_WINDOW: &str = "SR_VALIDATION_WINDOW_SECS";
pub const ENV_GENESIS_NOTE: &str = "SR_GENESIS_NOTE";

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Ledger Engine configuration.
    pub ledger: LedgerConfig,
    /// Validation Registry configuration.
    pub validation: ValidationConfig,
}

impl NodeConfig {
    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each variable.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(dir) = lookup(ENV_DATA_DIR) {
            if dir.trim().is_empty() {
                return Err(ConfigError::invalid(ENV_DATA_DIR, &dir, "must not be empty"));
            }
            config.storage.data_dir = PathBuf::from(dir);
        }

        if let Some(backend) = lookup(ENV_STORAGE_BACKEND) {
            config.storage.backend = backend.parse()?;
        }

        if let Some(window) = lookup(ENV_VALIDATION_WINDOW) {
            let secs: u64 = window.trim().parse().map_err(|_| {
                ConfigError::invalid(ENV_VALIDATION_WINDOW, &window, "expected whole seconds")
            })?;
            if secs == 0 {
                return Err(ConfigError::invalid(
                    ENV_VALIDATION_WINDOW,
                    &window,
                    "must be positive",
                ));
            }
            config.validation.window_secs = secs;
        }

        if let Some(note) = lookup(ENV_GENESIS_NOTE) {
            config.ledger.genesis_note = note;
        }

        Ok(config)
    }

    /// In-memory configuration for tests.
    pub fn for_testing() -> Self {
        Self {
            storage: StorageConfig {
                backend: StorageBackend::Memory,
                ..StorageConfig::default()
            },
            ..Self::default()
        }
    }
}

/// Which `KeyValueStore` holds the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Single snapshot file in the data directory.
    #[default]
    File,
    /// Nothing persisted; lost on exit.
    Memory,
    /// RocksDB database in the data directory (`rocksdb` feature).
    RocksDb,
}

impl StorageBackend {
    /// Whether this backend writes to the data directory.
    pub fn is_persistent(&self) -> bool {
        !matches!(self, StorageBackend::Memory)
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(StorageBackend::File),
            "memory" => Ok(StorageBackend::Memory),
            "rocksdb" if cfg!(feature = "rocksdb") => Ok(StorageBackend::RocksDb),
            "rocksdb" => Err(ConfigError::BackendUnavailable("rocksdb")),
            _ => Err(ConfigError::invalid(
                ENV_STORAGE_BACKEND,
                s,
                "expected file, memory or rocksdb",
            )),
        }
    }
}

/// Storage configuration.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Data directory for the chain and its lock file.
    pub data_dir: PathBuf,
    /// Store implementation.
    pub backend: StorageBackend,
}

impl StorageConfig {
    const CHAIN_FILE: &'static str = "chain.db";
    const ROCKSDB_DIR: &'static str = "rocksdb";

    /// Snapshot file used by the file backend.
    pub fn chain_file(&self) -> PathBuf {
        self.data_dir.join(Self::CHAIN_FILE)
    }

    /// Database directory used by the RocksDB backend.
    pub fn rocksdb_dir(&self) -> PathBuf {
        self.data_dir.join(Self::ROCKSDB_DIR)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./data"),
            backend: StorageBackend::default(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set to an unusable value.
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },
    /// The backend exists but this binary was built without it.
    BackendUnavailable(&'static str),
}

impl ConfigError {
    fn invalid(key: &'static str, value: &str, reason: &'static str) -> Self {
        ConfigError::InvalidValue {
            key,
            value: value.to_string(),
            reason,
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue { key, value, reason } => {
                write!(f, "{}='{}': {}", key, value, reason)
            }
            ConfigError::BackendUnavailable(name) => {
                write!(
                    f,
                    "storage backend '{}' is not compiled in (enable the '{}' feature)",
                    name, name
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

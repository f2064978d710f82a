//! # Ledger Service
//!
//! The main service implementing the Ledger API.
//!
//! ## Architecture
//!
//! This service:
//! 1. Implements `LedgerApi` for appends, lookups and chain audit
//! 2. Serializes appends behind a single append lock
//! 3. Lets reads run concurrently against the store's read lock
//! 4. Uses dependency injection for all external dependencies

use crate::adapters::{InMemoryKVStore, JsonBlockSerializer};
use crate::domain::chain::{audit_chain, failing_heights, ChainFault};
use crate::domain::config::LedgerConfig;
use crate::domain::entities::{Block, BlockBody, BlockHeight, StarBody};
use crate::domain::errors::LedgerError;
use crate::domain::keys::{display_key, height_key, parse_height_key};
use crate::ports::inbound::LedgerApi;
use crate::ports::outbound::{BlockSerializer, KeyValueStore, SubmissionGate, TimeSource};
use parking_lot::{Mutex, RwLock};
use shared_types::SystemTimeSource;
use tracing::{debug, info, warn};

/// Dependencies for `LedgerService`.
pub struct LedgerDependencies<KV, BS, TS> {
    /// Key-value store for persistence.
    pub kv_store: KV,
    /// Block serializer.
    pub serializer: BS,
    /// Time source for block timestamps.
    pub time_source: TS,
}

/// The Ledger Service.
pub struct LedgerService<KV, BS, TS>
where
    KV: KeyValueStore,
    BS: BlockSerializer,
    TS: TimeSource,
{
    kv_store: RwLock<KV>,
    serializer: BS,
    time_source: TS,
    config: LedgerConfig,
    /// Held for the whole read-tip, build, persist sequence.
    append_lock: Mutex<()>,
}

impl LedgerService<InMemoryKVStore, JsonBlockSerializer, SystemTimeSource> {
    /// Ledger backed by an in-memory store and the system clock.
    pub fn new_in_memory(config: LedgerConfig) -> Self {
        Self::new(
            LedgerDependencies {
                kv_store: InMemoryKVStore::new(),
                serializer: JsonBlockSerializer,
                time_source: SystemTimeSource,
            },
            config,
        )
    }
}

impl<KV, BS, TS> LedgerService<KV, BS, TS>
where
    KV: KeyValueStore,
    BS: BlockSerializer,
    TS: TimeSource,
{
    /// Create a new Ledger Service with the given dependencies.
    pub fn new(deps: LedgerDependencies<KV, BS, TS>, config: LedgerConfig) -> Self {
        Self {
            kv_store: RwLock::new(deps.kv_store),
            serializer: deps.serializer,
            time_source: deps.time_source,
            config,
            append_lock: Mutex::new(()),
        }
    }

    /// Every integrity violation in the stored chain, in height order.
    pub fn chain_faults(&self) -> Result<Vec<ChainFault>, LedgerError> {
        let blocks = self.load_all()?;
        Ok(audit_chain(&blocks))
    }

    /// Decode a stored value, checking it against the key it was read from.
    fn decode(&self, key: &[u8], value: &[u8]) -> Result<Block, LedgerError> {
        let block = self
            .serializer
            .deserialize(value)
            .map_err(|e| LedgerError::CorruptRecord {
                key: display_key(key),
                reason: e.message,
            })?;

        match parse_height_key(key) {
            Some(height) if height == block.height => Ok(block),
            _ => Err(LedgerError::CorruptRecord {
                key: display_key(key),
                reason: format!("record carries height {}", block.height),
            }),
        }
    }

    /// All blocks in ascending height order.
    fn load_all(&self) -> Result<Vec<Block>, LedgerError> {
        let entries = self.kv_store.read().scan_all()?;
        entries
            .iter()
            .map(|(key, value)| self.decode(key, value))
            .collect()
    }

    fn tip_height(&self) -> Result<Option<BlockHeight>, LedgerError> {
        let count = self.kv_store.read().count()?;
        Ok(count.checked_sub(1))
    }

    fn read_block(&self, height: BlockHeight) -> Result<Option<Block>, LedgerError> {
        let key = height_key(height);
        let value = self.kv_store.read().get(&key)?;
        value.map(|v| self.decode(&key, &v)).transpose()
    }

    /// Build and persist the next block. Caller holds `append_lock`.
    fn append_locked(&self, body: BlockBody) -> Result<Block, LedgerError> {
        let (height, previous_block_hash) = match self.tip_height()? {
            Some(tip) => {
                let previous = self.read_block(tip)?.ok_or_else(|| LedgerError::CorruptRecord {
                    key: display_key(&height_key(tip)),
                    reason: "tip record missing".to_string(),
                })?;
                (tip + 1, previous.hash)
            }
            None => (0, String::new()),
        };

        let block = Block::new(height, self.time_source.now(), body, previous_block_hash)?;
        let bytes = self.serializer.serialize(&block)?;
        self.kv_store.write().put(&height_key(height), &bytes)?;

        info!(
            "[sr-01] ⛓️ Appended block #{} ({}…)",
            block.height,
            &block.hash[..12]
        );
        Ok(block)
    }
}

impl<KV, BS, TS> LedgerApi for LedgerService<KV, BS, TS>
where
    KV: KeyValueStore,
    BS: BlockSerializer,
    TS: TimeSource,
{
    fn ensure_genesis(&self) -> Result<Block, LedgerError> {
        let _guard = self.append_lock.lock();

        if let Some(genesis) = self.read_block(0)? {
            debug!("[sr-01] Genesis present: {}", genesis.hash);
            return Ok(genesis);
        }
        if self.tip_height()?.is_some() {
            return Err(LedgerError::CorruptRecord {
                key: display_key(&height_key(0)),
                reason: "genesis record missing from non-empty store".to_string(),
            });
        }

        info!("[sr-01] 🌱 Writing genesis block");
        self.append_locked(BlockBody::Note(self.config.genesis_note.clone()))
    }

    fn append_block(&self, body: BlockBody) -> Result<Block, LedgerError> {
        let _guard = self.append_lock.lock();
        self.append_locked(body)
    }

    fn append_gated(
        &self,
        body: StarBody,
        gate: &dyn SubmissionGate,
    ) -> Result<Block, LedgerError> {
        let _guard = self.append_lock.lock();
        let address = body.address.clone();

        if let Err(reason) = gate.admit(&address) {
            warn!("[sr-01] Submission from {} refused: {}", address, reason);
            return Err(LedgerError::ValidationExpiredOrAbsent { address, reason });
        }

        let block = self.append_locked(body.into())?;
        gate.release(&address);
        Ok(block)
    }

    fn chain_height(&self) -> Result<Option<BlockHeight>, LedgerError> {
        self.tip_height()
    }

    fn get_block(&self, height: BlockHeight) -> Result<Block, LedgerError> {
        self.read_block(height)?
            .ok_or(LedgerError::HeightNotFound { height })
    }

    fn get_block_by_hash(&self, hash: &str) -> Result<Block, LedgerError> {
        self.load_all()?
            .into_iter()
            .find(|block| block.hash == hash)
            .ok_or_else(|| LedgerError::HashNotFound {
                hash: hash.to_string(),
            })
    }

    fn get_blocks_by_wallet_address(&self, address: &str) -> Result<Vec<Block>, LedgerError> {
        let blocks: Vec<Block> = self
            .load_all()?
            .into_iter()
            .filter(|block| block.body.address() == Some(address))
            .collect();

        if blocks.is_empty() {
            return Err(LedgerError::AddressNotFound {
                address: address.to_string(),
            });
        }
        Ok(blocks)
    }

    fn validate_chain(&self) -> Result<Vec<BlockHeight>, LedgerError> {
        let faults = self.chain_faults()?;
        for fault in &faults {
            warn!(
                "[sr-01] Chain fault at height {}: {:?}",
                fault.height, fault.kind
            );
        }
        Ok(failing_heights(&faults))
    }
}

#[cfg(test)]
mod tests;

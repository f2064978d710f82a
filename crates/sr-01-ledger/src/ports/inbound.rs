//! # Inbound Ports (Driving Ports)
//!
//! The primary API for the Ledger Engine.

use crate::domain::entities::{Block, BlockBody, BlockHeight, StarBody};
use crate::domain::errors::LedgerError;
use crate::ports::outbound::SubmissionGate;

/// Primary API for the Ledger Engine.
///
/// All methods take `&self`; implementations serialize appends internally
/// and let reads run concurrently.
pub trait LedgerApi: Send + Sync {
    /// Write the genesis block if the store is empty.
    ///
    /// Returns the block at height 0 either way.
    fn ensure_genesis(&self) -> Result<Block, LedgerError>;

    /// Append a block at `tip + 1`, linked to the current tip.
    ///
    /// ## Errors
    ///
    /// - `StorageFailure`: the write did not happen; no block is reported
    /// - `CorruptRecord`: the tip could not be decoded
    fn append_block(&self, body: BlockBody) -> Result<Block, LedgerError>;

    /// Append a star claim only if `gate` admits its address.
    ///
    /// The gate sees `admit`, the append, then `release`, all under the
    /// append lock. A refused admit fails with `ValidationExpiredOrAbsent`.
    fn append_gated(
        &self,
        body: StarBody,
        gate: &dyn SubmissionGate,
    ) -> Result<Block, LedgerError>;

    /// Height of the tip, `None` for an empty store.
    fn chain_height(&self) -> Result<Option<BlockHeight>, LedgerError>;

    /// Block at `height`.
    ///
    /// ## Errors
    ///
    /// - `HeightNotFound`: no block at this height
    /// - `CorruptRecord`: stored value is unreadable
    fn get_block(&self, height: BlockHeight) -> Result<Block, LedgerError>;

    /// The unique block whose hash matches.
    fn get_block_by_hash(&self, hash: &str) -> Result<Block, LedgerError>;

    /// All star blocks submitted by `address`, ascending height.
    ///
    /// Fails with `AddressNotFound` when there are none.
    fn get_blocks_by_wallet_address(&self, address: &str) -> Result<Vec<Block>, LedgerError>;

    /// Heights failing the hash or linkage check, ascending. Empty when the
    /// chain is intact.
    fn validate_chain(&self) -> Result<Vec<BlockHeight>, LedgerError>;
}

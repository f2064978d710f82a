//! Ledger configuration.

/// Body text written into the genesis block.
pub const DEFAULT_GENESIS_NOTE: &str = "First block in the chain - Genesis block";

/// Configuration for the Ledger Engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Free-text body of the block at height 0.
    pub genesis_note: String,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            genesis_note: DEFAULT_GENESIS_NOTE.to_string(),
        }
    }
}

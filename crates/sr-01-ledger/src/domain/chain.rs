//! # Chain Audit
//!
//! Pure integrity check over a height-ordered run of blocks. The block at
//! position `i` must carry height `i`, a self-consistent hash, and a
//! `previous_block_hash` equal to the stored hash at position `i - 1`.

use super::entities::{Block, BlockHeight};

/// What went wrong at a given height.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FaultKind {
    /// Stored hash differs from the recomputed digest.
    HashMismatch,
    /// `previous_block_hash` does not match the predecessor.
    BrokenLink,
    /// Block sits at a position that disagrees with its height (gap).
    HeightMismatch,
}

/// A single integrity violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainFault {
    pub height: BlockHeight,
    pub kind: FaultKind,
}

/// Audit a chain given in ascending height order.
///
/// Faults are reported in height order; one height may carry several.
pub fn audit_chain(blocks: &[Block]) -> Vec<ChainFault> {
    let mut faults = Vec::new();
    let mut previous_hash = "";

    for (position, block) in blocks.iter().enumerate() {
        let height = block.height;

        if height != position as BlockHeight {
            faults.push(ChainFault {
                height,
                kind: FaultKind::HeightMismatch,
            });
        }
        if !block.has_valid_hash() {
            faults.push(ChainFault {
                height,
                kind: FaultKind::HashMismatch,
            });
        }
        if block.previous_block_hash != previous_hash {
            faults.push(ChainFault {
                height,
                kind: FaultKind::BrokenLink,
            });
        }

        previous_hash = &block.hash;
    }

    faults
}

/// Distinct failing heights, ascending.
pub fn failing_heights(faults: &[ChainFault]) -> Vec<BlockHeight> {
    let mut heights: Vec<_> = faults.iter().map(|f| f.height).collect();
    heights.dedup();
    heights
}

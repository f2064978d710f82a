//! # Domain Entities
//!
//! Blocks and the payloads they carry. The serde layout of these types is the
//! block wire representation: `height, time, previousBlockHash, hash, body`.

use super::errors::{LedgerError, SerializationError};
use super::hashing::block_digest;
use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// Position of a block in the chain, genesis is 0.
pub type BlockHeight = u64;

/// Star coordinates and story as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Right ascension, e.g. `"16h 29m 1.0s"`.
    pub ra: String,
    /// Declination, e.g. `"-26° 29' 24.9"`.
    pub dec: String,
    /// Magnitude.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mag: Option<String>,
    /// Constellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cen: Option<String>,
    /// Hex encoding of the UTF-8 story text.
    pub story: String,
}

/// Body of a star claim block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarBody {
    /// Submitter wallet address.
    pub address: String,
    pub star: StarRecord,
}

/// Opaque block payload.
///
/// Star claims carry the submitter address; the genesis block carries a
/// plain note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BlockBody {
    Star(StarBody),
    Note(String),
}

impl BlockBody {
    /// Submitter address, if this is a star claim.
    pub fn address(&self) -> Option<&str> {
        match self {
            BlockBody::Star(body) => Some(&body.address),
            BlockBody::Note(_) => None,
        }
    }

    /// Star record, if this is a star claim.
    pub fn star(&self) -> Option<&StarRecord> {
        match self {
            BlockBody::Star(body) => Some(&body.star),
            BlockBody::Note(_) => None,
        }
    }
}

impl From<StarBody> for BlockBody {
    fn from(body: StarBody) -> Self {
        BlockBody::Star(body)
    }
}

/// An immutable ledger record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Block {
    /// Hex SHA-256 over every other field.
    pub hash: String,
    pub height: BlockHeight,
    pub body: BlockBody,
    /// Append time in seconds since epoch.
    pub time: Timestamp,
    /// Hash of the block at `height - 1`, empty for genesis.
    pub previous_block_hash: String,
}

impl Block {
    /// Build a block and seal it with its digest.
    pub fn new(
        height: BlockHeight,
        time: Timestamp,
        body: BlockBody,
        previous_block_hash: String,
    ) -> Result<Self, SerializationError> {
        let hash = block_digest(height, time, &body, &previous_block_hash)?;
        Ok(Self {
            hash,
            height,
            body,
            time,
            previous_block_hash,
        })
    }

    /// Recompute the digest from the current field values.
    pub fn compute_hash(&self) -> Result<String, SerializationError> {
        block_digest(
            self.height,
            self.time,
            &self.body,
            &self.previous_block_hash,
        )
    }

    /// True when the stored hash matches the recomputed digest.
    pub fn has_valid_hash(&self) -> bool {
        self.compute_hash()
            .map(|digest| digest == self.hash)
            .unwrap_or(false)
    }

    pub fn is_genesis(&self) -> bool {
        self.height == 0
    }
}

/// Parse a textual height from a request path.
///
/// # Errors
///
/// `InvalidInput` for negative or non-numeric text.
pub fn parse_height(text: &str) -> Result<BlockHeight, LedgerError> {
    let text = text.trim();
    if text.starts_with('-') {
        return Err(LedgerError::invalid_input(format!(
            "height must be non-negative, got '{}'",
            text
        )));
    }
    text.parse().map_err(|_| {
        LedgerError::invalid_input(format!("height must be a decimal integer, got '{}'", text))
    })
}

//! # Block Hashing
//!
//! The digest covers `(height, time, body, previousBlockHash)` and never the
//! hash field itself. Fields are encoded as a fixed-order JSON object so the
//! digest is stable across serializer backends.

use super::entities::{BlockBody, BlockHeight};
use super::errors::SerializationError;
use serde::Serialize;
use shared_crypto::sha256_hex;
use shared_types::Timestamp;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HashMaterial<'a> {
    height: BlockHeight,
    time: Timestamp,
    body: &'a BlockBody,
    previous_block_hash: &'a str,
}

/// Hex SHA-256 digest of a block's content fields.
pub fn block_digest(
    height: BlockHeight,
    time: Timestamp,
    body: &BlockBody,
    previous_block_hash: &str,
) -> Result<String, SerializationError> {
    let material = serde_json::to_vec(&HashMaterial {
        height,
        time,
        body,
        previous_block_hash,
    })?;
    Ok(sha256_hex(&material))
}

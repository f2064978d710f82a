//! # SHA-256 Hashing
//!
//! Digest helpers shared by the ledger (block hashes) and the signed-message
//! scheme (message digests, address derivation).

use ripemd::Ripemd160;
use sha2::{Digest, Sha256};

/// 256-bit digest output.
pub type Hash = [u8; 32];

/// Hash data with SHA-256 (one-shot).
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

/// SHA-256 rendered as lowercase hex (64 chars).
pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(sha256(data))
}

/// SHA-256 applied twice, as used for signed-message digests.
pub fn double_sha256(data: &[u8]) -> Hash {
    sha256(&sha256(data))
}

/// RIPEMD-160 of SHA-256, the public key hash inside a P2PKH address.
pub fn hash160(data: &[u8]) -> [u8; 20] {
    Ripemd160::digest(sha256(data)).into()
}

//! # Store Keys
//!
//! Blocks are stored under the decimal string of their height, zero-padded to
//! 20 digits (the width of `u64::MAX`). Lexicographic key order is then equal
//! to numeric height order, which the ordered scan relies on.

use super::entities::BlockHeight;

const HEIGHT_KEY_WIDTH: usize = 20;

/// Store key for a block height.
pub fn height_key(height: BlockHeight) -> Vec<u8> {
    format!("{:0width$}", height, width = HEIGHT_KEY_WIDTH).into_bytes()
}

/// Parse a store key back into a height.
///
/// Returns `None` for keys this ledger did not write.
pub fn parse_height_key(key: &[u8]) -> Option<BlockHeight> {
    if key.len() != HEIGHT_KEY_WIDTH || !key.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(key).ok()?.parse().ok()
}

/// Printable form of a key for error messages.
pub fn display_key(key: &[u8]) -> String {
    String::from_utf8_lossy(key).into_owned()
}

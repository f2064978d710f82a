//! # Shared Crypto - Hashing and Wallet Signatures
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256, double SHA-256, HASH160 | Block digests, address derivation |
//! | `message` | secp256k1 recoverable ECDSA | Wallet signed-message verification |
//!
//! ## Signed Messages
//!
//! Wallets prove key ownership by signing a text challenge with the
//! "Bitcoin Signed Message" scheme: the message is prefixed with a magic
//! string, double SHA-256 hashed, and signed with a recoverable secp256k1
//! signature. The 65-byte compact signature (header || r || s) travels as
//! base64. Verification recovers the public key and compares its P2PKH
//! address against the claimed address.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod message;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{double_sha256, hash160, sha256, sha256_hex, Hash};
pub use message::{message_digest, sign_message, verify_message, WalletKeyPair};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Crypto error types.

use thiserror::Error;

/// Cryptographic operation errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// Signature is not valid base64 or not 65 bytes long
    #[error("Invalid signature format")]
    InvalidSignatureFormat,

    /// Compact signature header outside the supported P2PKH range
    #[error("Invalid recovery header: {0}")]
    InvalidRecoveryId(u8),

    /// r/s components do not form a valid signature
    #[error("Invalid signature")]
    InvalidSignature,

    /// Public key recovery failed
    #[error("Failed to recover public key")]
    RecoveryFailed,

    /// Address is not a Base58Check P2PKH address
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid private key
    #[error("Invalid private key")]
    InvalidPrivateKey,

    /// Signing failed
    #[error("Signing failed: {0}")]
    SigningFailed(String),
}

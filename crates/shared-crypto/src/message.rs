//! # Wallet Signed Messages (secp256k1)
//!
//! Verification and signing for the "Bitcoin Signed Message" scheme.
//!
//! ## Format
//!
//! - Digest: `SHA256d(0x18 || "Bitcoin Signed Message:\n" || varint(len) || msg)`
//! - Signature: base64 of 65 bytes, `header || r || s`
//! - Header: `27 + recovery_id`, plus 4 when the key is compressed
//!
//! Only P2PKH addresses (mainnet `0x00`, testnet `0x6f`) are supported.
//! Headers 35..=42 (segwit address variants) are rejected.

use crate::hashing::{double_sha256, hash160, Hash};
use crate::CryptoError;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use k256::ecdsa::{RecoveryId, Signature, SigningKey, VerifyingKey};

const MESSAGE_MAGIC: &[u8] = b"\x18Bitcoin Signed Message:\n";

/// P2PKH version byte for mainnet addresses.
pub const P2PKH_MAINNET: u8 = 0x00;
/// P2PKH version byte for testnet addresses.
pub const P2PKH_TESTNET: u8 = 0x6f;

const HEADER_BASE: u8 = 27;
const HEADER_COMPRESSED: u8 = 4;
const HEADER_MAX_P2PKH: u8 = 34;

/// Digest a wallet signs for `message`.
pub fn message_digest(message: &str) -> Hash {
    let mut data = Vec::with_capacity(MESSAGE_MAGIC.len() + 9 + message.len());
    data.extend_from_slice(MESSAGE_MAGIC);
    write_varint(&mut data, message.len() as u64);
    data.extend_from_slice(message.as_bytes());
    double_sha256(&data)
}

/// Verify that `signature` over `message` was produced by the key behind `address`.
///
/// Malformed addresses or signatures yield `false`.
pub fn verify_message(message: &str, address: &str, signature: &str) -> bool {
    try_verify_message(message, address, signature).unwrap_or(false)
}

/// Like [`verify_message`] but reports why a malformed input was rejected.
pub fn try_verify_message(
    message: &str,
    address: &str,
    signature: &str,
) -> Result<bool, CryptoError> {
    let (version, expected_hash) = decode_p2pkh(address)?;

    let raw = BASE64
        .decode(signature.trim())
        .map_err(|_| CryptoError::InvalidSignatureFormat)?;
    if raw.len() != 65 {
        return Err(CryptoError::InvalidSignatureFormat);
    }

    let header = raw[0];
    if !(HEADER_BASE..=HEADER_MAX_P2PKH).contains(&header) {
        return Err(CryptoError::InvalidRecoveryId(header));
    }
    let compressed = header >= HEADER_BASE + HEADER_COMPRESSED;
    let recovery_id = RecoveryId::from_byte((header - HEADER_BASE) & 0x03)
        .ok_or(CryptoError::InvalidRecoveryId(header))?;

    let sig = Signature::from_slice(&raw[1..]).map_err(|_| CryptoError::InvalidSignature)?;
    let digest = message_digest(message);
    let recovered = VerifyingKey::recover_from_prehash(&digest, &sig, recovery_id)
        .map_err(|_| CryptoError::RecoveryFailed)?;

    let pubkey = recovered.to_encoded_point(compressed);
    let recovered_hash = hash160(pubkey.as_bytes());

    Ok(recovered_hash == expected_hash && (version == P2PKH_MAINNET || version == P2PKH_TESTNET))
}

/// Sign `message` with `key`, producing a base64 compact signature.
pub fn sign_message(key: &SigningKey, message: &str, compressed: bool) -> Result<String, CryptoError> {
    let digest = message_digest(message);
    let (sig, recovery_id) = key
        .sign_prehash_recoverable(&digest)
        .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;

    let mut raw = [0u8; 65];
    raw[0] = HEADER_BASE
        + recovery_id.to_byte()
        + if compressed { HEADER_COMPRESSED } else { 0 };
    raw[1..].copy_from_slice(&sig.to_bytes());
    Ok(BASE64.encode(raw))
}

/// Base58Check P2PKH address for a public key.
pub fn p2pkh_address(key: &VerifyingKey, compressed: bool, version: u8) -> String {
    let pubkey = key.to_encoded_point(compressed);
    let mut payload = Vec::with_capacity(21);
    payload.push(version);
    payload.extend_from_slice(&hash160(pubkey.as_bytes()));
    bs58::encode(payload).with_check().into_string()
}

fn decode_p2pkh(address: &str) -> Result<(u8, [u8; 20]), CryptoError> {
    let payload = bs58::decode(address.trim())
        .with_check(None)
        .into_vec()
        .map_err(|e| CryptoError::InvalidAddress(e.to_string()))?;
    if payload.len() != 21 {
        return Err(CryptoError::InvalidAddress(format!(
            "expected 21 payload bytes, got {}",
            payload.len()
        )));
    }
    let mut hash = [0u8; 20];
    hash.copy_from_slice(&payload[1..]);
    Ok((payload[0], hash))
}

fn write_varint(out: &mut Vec<u8>, n: u64) {
    match n {
        0..=0xfc => out.push(n as u8),
        0xfd..=0xffff => {
            out.push(0xfd);
            out.extend_from_slice(&(n as u16).to_le_bytes());
        }
        0x1_0000..=0xffff_ffff => {
            out.push(0xfe);
            out.extend_from_slice(&(n as u32).to_le_bytes());
        }
        _ => {
            out.push(0xff);
            out.extend_from_slice(&n.to_le_bytes());
        }
    }
}

/// secp256k1 wallet key with its P2PKH identity.
///
/// The node never holds client keys; this type backs tooling and tests that
/// play the wallet side of the challenge.
pub struct WalletKeyPair {
    signing_key: SigningKey,
    compressed: bool,
}

impl WalletKeyPair {
    /// Generate random keypair (compressed address).
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::random(&mut rand::thread_rng()),
            compressed: true,
        }
    }

    /// Create from secret key bytes (32 bytes).
    pub fn from_bytes(bytes: [u8; 32], compressed: bool) -> Result<Self, CryptoError> {
        let signing_key =
            SigningKey::from_bytes((&bytes).into()).map_err(|_| CryptoError::InvalidPrivateKey)?;
        Ok(Self {
            signing_key,
            compressed,
        })
    }

    /// Mainnet P2PKH address.
    pub fn address(&self) -> String {
        p2pkh_address(
            self.signing_key.verifying_key(),
            self.compressed,
            P2PKH_MAINNET,
        )
    }

    /// Sign a message (deterministic RFC 6979).
    pub fn sign_message(&self, message: &str) -> Result<String, CryptoError> {
        sign_message(&self.signing_key, message, self.compressed)
    }
}

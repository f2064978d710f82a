//! Wallet signature verifier.

use crate::ports::outbound::SignatureVerifier;

/// Verifies Bitcoin signed messages against P2PKH addresses.
#[derive(Debug, Default, Clone, Copy)]
pub struct WalletMessageVerifier;

impl SignatureVerifier for WalletMessageVerifier {
    fn verify(&self, message: &str, address: &str, signature: &str) -> bool {
        shared_crypto::verify_message(message, address, signature)
    }
}

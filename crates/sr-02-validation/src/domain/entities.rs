//! Validation entries as reported to clients.

use serde::{Deserialize, Serialize};
use shared_types::Timestamp;

/// Outcome of the last verification attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationStatus {
    /// No signature presented yet.
    #[serde(rename = "")]
    Pending,
    #[serde(rename = "verified")]
    Verified,
    #[serde(rename = "verification failed")]
    VerificationFailed,
}

impl ValidationStatus {
    /// Status text as shown on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationStatus::Pending => "",
            ValidationStatus::Verified => "verified",
            ValidationStatus::VerificationFailed => "verification failed",
        }
    }
}

/// Snapshot of a registry entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationEntry {
    pub address: String,
    /// Seconds since epoch at creation; fixed for the entry's lifetime.
    #[serde(rename = "requestTimeStamp")]
    pub request_timestamp: Timestamp,
    /// Challenge the wallet must sign.
    pub message: String,
    /// Seconds left at the time the snapshot was taken.
    #[serde(rename = "validationWindow")]
    pub validation_window: u64,
    #[serde(rename = "walletValidated")]
    pub validated: bool,
    #[serde(rename = "walletValidatedStatus")]
    pub status: ValidationStatus,
}

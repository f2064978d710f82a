//! Challenge derivation and window arithmetic, in whole seconds.

use shared_types::Timestamp;

/// Suffix appended to every challenge.
pub const CHALLENGE_SUFFIX: &str = "starRegistry";

/// The message a wallet must sign: `"{address}:{timestamp}:starRegistry"`.
pub fn challenge_message(address: &str, request_timestamp: Timestamp) -> String {
    format!("{}:{}:{}", address, request_timestamp, CHALLENGE_SUFFIX)
}

/// Seconds left in the window, saturating at 0.
pub fn remaining_window(window_secs: u64, request_timestamp: Timestamp, now: Timestamp) -> u64 {
    window_secs.saturating_sub(now.saturating_sub(request_timestamp))
}

/// True once the full window has elapsed.
pub fn window_elapsed(window_secs: u64, request_timestamp: Timestamp, now: Timestamp) -> bool {
    now.saturating_sub(request_timestamp) >= window_secs
}

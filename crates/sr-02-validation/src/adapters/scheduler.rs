//! Expiry schedulers.
//!
//! - `TokioExpiryScheduler` - one sleeping task per entry on a Tokio runtime
//! - `ManualExpiryScheduler` - fires due callbacks when the caller asks

mod manual;
mod runtime;

pub use self::manual::ManualExpiryScheduler;
pub use self::runtime::TokioExpiryScheduler;

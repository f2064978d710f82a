//! # Adapters Module
//!
//! - `scheduler`: Tokio-driven and manually driven expiry schedulers
//! - `verifier`: Bitcoin signed-message verifier

pub mod scheduler;
pub mod verifier;

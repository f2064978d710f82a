//! # Ports Layer
//!
//! - `inbound.rs` - Registry API used by the runtime
//! - `outbound.rs` - Signature verifier and expiry scheduler

pub mod inbound;
pub mod outbound;

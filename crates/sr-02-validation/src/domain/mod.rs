//! # Domain Layer
//!
//! - `entities` - ValidationEntry and its status
//! - `challenge` - Challenge message and window arithmetic
//! - `config` - Registry configuration
//! - `errors` - Registry error types

pub mod challenge;
pub mod config;
pub mod entities;
pub mod errors;

//! Database models for the Nearmart platform
//!
//! Re-exports models from the shared crate

pub use shared::models::*;

//! Shared types and logic for the Nearmart marketplace platform
//!
//! This crate contains the domain models and the pure, I/O-free business
//! rules (geo math, proximity ranking, offer pricing, fee accounting,
//! notification fan-out policy) used by the backend.

pub mod fanout;
pub mod geo;
pub mod ledger;
pub mod models;
pub mod pricing;
pub mod types;
pub mod validation;

pub use models::*;
pub use types::*;

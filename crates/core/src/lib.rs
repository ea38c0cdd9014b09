//! Domain types and logic shared across the ScamShield backend.
//!
//! This crate is storage- and transport-agnostic: it knows nothing about
//! axum, sqlx, or the AI vendor. It holds the analysis result types, the
//! error taxonomy, the region table, message validation, the scam category
//! heuristics, and the hash derivations used for cache keys and pattern
//! identity.

pub mod analysis;
pub mod classify;
pub mod error;
pub mod hashing;
pub mod region;
pub mod types;
pub mod validate;

//! Request handlers.
//!
//! Each submodule provides async handler functions for one operation
//! group. Handlers validate input, delegate to the engine or the
//! repositories in `scamshield_db`, and map errors via
//! [`crate::error::AppError`].

pub mod analytics;
pub mod analyze;
pub mod history;
pub mod patterns;

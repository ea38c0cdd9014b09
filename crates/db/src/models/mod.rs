//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for inserts/upserts
//! - Response shapes derived from the entity where the API trims fields

pub mod analytics;
pub mod history;
pub mod pattern;
pub mod user;

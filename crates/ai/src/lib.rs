//! AI Gateway: translates a raw message + region into a validated
//! [`scamshield_core::analysis::AnalysisResult`] via one call to the
//! generative-language API.
//!
//! The gateway performs no retries and holds no global state: it is an
//! explicitly constructed service owned by the application's composition
//! root. The [`RewriteService`] trait is the seam test code substitutes
//! fakes through.

pub mod config;
pub mod error;
pub mod gateway;
pub mod parse;
pub mod prompt;

pub use config::AiConfig;
pub use error::AiError;
pub use gateway::{AiGateway, RewriteService};

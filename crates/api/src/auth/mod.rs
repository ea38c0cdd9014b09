//! Authentication: JWT configuration, token helpers, and the handler
//! extractor lives in [`crate::middleware::auth`].

pub mod jwt;

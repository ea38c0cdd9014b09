//! Request middleware: authentication extractor and per-IP rate limiting.

pub mod auth;
pub mod rate_limit;

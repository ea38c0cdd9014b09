//! Shared SHA-256 hex digest utility and domain key derivations.
//!
//! Cache keys and pattern identity hashes must be stable across processes,
//! so both are derived here rather than in the layers that consume them.

use sha2::{Digest, Sha256};

use crate::classify::ScamCategory;
use crate::region::Region;

/// Compute a SHA-256 hex digest of the given bytes.
pub fn sha256_hex(data: &[u8]) -> String {
    let hash = Sha256::digest(data);
    format!("{hash:x}")
}

/// Cache key for an analysis result: digest over the raw message and the
/// region code, newline-separated so `("ab", "c")` and `("a", "bc")` cannot
/// collide.
pub fn cache_key(message: &str, region: Region) -> String {
    format!("analysis:{}", sha256_hex(format!("{message}\n{}", region.as_str()).as_bytes()))
}

/// Identity hash for a scam pattern.
///
/// The message is normalized (trimmed, lowercased, internal whitespace
/// collapsed to single spaces) before hashing so trivial reformattings of
/// the same message map to one pattern. The same rule is used at creation
/// and at lookup.
pub fn pattern_hash(message: &str, category: ScamCategory) -> String {
    let normalized = normalize_message(message);
    sha256_hex(format!("{normalized}:{}", category.as_str()).as_bytes())
}

/// Trim, lowercase, and collapse runs of whitespace to single spaces.
fn normalize_message(message: &str) -> String {
    message
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

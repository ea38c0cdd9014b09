//! Cache entry envelope with explicit expiry metadata.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Stored envelope around a cached value.
///
/// Expiry is tracked in the envelope itself (creation time + TTL) so the
/// age check does not depend on the Redis server's key expiry: an entry
/// whose age exceeds its TTL is treated as absent even if the key still
/// exists, and is lazily deleted on read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<T> {
    /// The cached value.
    pub data: T,
    /// Creation time, milliseconds since the Unix epoch.
    pub timestamp: i64,
    /// Time-to-live in seconds.
    pub ttl: u64,
}

impl<T> CacheEntry<T> {
    /// Wrap a value with the current timestamp and the given TTL.
    pub fn new(data: T, ttl_secs: u64) -> Self {
        Self {
            data,
            timestamp: Utc::now().timestamp_millis(),
            ttl: ttl_secs,
        }
    }

    /// Whether the entry has outlived its TTL.
    pub fn is_expired(&self) -> bool {
        let age_ms = Utc::now().timestamp_millis() - self.timestamp;
        age_ms > (self.ttl as i64) * 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entry_is_not_expired() {
        let entry = CacheEntry::new("value".to_string(), 300);
        assert!(!entry.is_expired());
    }

    #[test]
    fn entry_older_than_ttl_is_expired() {
        let mut entry = CacheEntry::new("value".to_string(), 1);
        entry.timestamp = Utc::now().timestamp_millis() - 1_500;
        assert!(entry.is_expired());
    }

    #[test]
    fn zero_ttl_expires_immediately_after_creation_instant() {
        let mut entry = CacheEntry::new(42u32, 0);
        entry.timestamp = Utc::now().timestamp_millis() - 1;
        assert!(entry.is_expired());
    }
}

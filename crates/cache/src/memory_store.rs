//! In-process cache store with the same envelope semantics as the Redis
//! store. Used for local development and hermetic tests; carries no
//! eviction beyond lazy expiry, so it is not meant for production fleets.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entry::CacheEntry;
use crate::error::CacheResult;

/// HashMap-backed store keyed by string, holding serialized
/// [`CacheEntry`] envelopes exactly like the Redis store does.
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let mut entries = self.entries.lock().expect("cache lock poisoned");
        let Some(raw) = entries.get(key) else {
            return Ok(None);
        };

        let entry: CacheEntry<T> = serde_json::from_str(raw)?;
        if entry.is_expired() {
            entries.remove(key);
            return Ok(None);
        }
        Ok(Some(entry.data))
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) -> CacheResult<()> {
        if ttl_secs == 0 {
            return Ok(());
        }
        let raw = serde_json::to_string(&CacheEntry::new(value, ttl_secs))?;
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(key.to_string(), raw);
        Ok(())
    }

    pub fn delete(&self, key: &str) {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .remove(key);
    }

    pub fn exists(&self, key: &str) -> CacheResult<bool> {
        Ok(self.get::<serde_json::Value>(key)?.is_some())
    }
}

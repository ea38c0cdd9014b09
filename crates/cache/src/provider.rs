//! Enum-dispatch cache provider with a no-op fallback.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{CacheError, CacheResult};
use crate::memory_store::MemoryCacheStore;
use crate::redis_store::RedisCacheStore;

/// The cache dependency as seen by the rest of the application.
///
/// `Redis` wraps a live connection; `Memory` is the in-process store for
/// local development and tests; `NoOp` always misses and always
/// succeeds. On the read/write path every backend error is logged and
/// degraded to the NoOp behaviour, so callers never branch on cache
/// failures.
pub enum CacheProvider {
    Redis(RedisCacheStore),
    Memory(MemoryCacheStore),
    NoOp,
}

impl CacheProvider {
    /// In-process store, for tests and cache-enabled local development.
    pub fn memory() -> CacheProvider {
        CacheProvider::Memory(MemoryCacheStore::new())
    }

    /// Connect to the cache service, degrading to [`CacheProvider::NoOp`]
    /// when `url` is `None` or the connection fails. Never blocks startup
    /// on an unreachable cache.
    pub async fn connect(url: Option<&str>) -> CacheProvider {
        let Some(url) = url else {
            tracing::info!("No cache URL configured, response caching disabled");
            return CacheProvider::NoOp;
        };

        match RedisCacheStore::connect(url).await {
            Ok(store) => {
                tracing::info!("Connected to cache");
                CacheProvider::Redis(store)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cache unavailable, degrading to no-op");
                CacheProvider::NoOp
            }
        }
    }

    /// Whether a real cache backend is attached.
    pub fn is_enabled(&self) -> bool {
        !matches!(self, CacheProvider::NoOp)
    }

    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let result = match self {
            CacheProvider::Redis(store) => store.get(key).await,
            CacheProvider::Memory(store) => store.get(key),
            CacheProvider::NoOp => Ok(None),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, key, "Cache read failed, treating as miss");
            None
        })
    }

    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) {
        let result = match self {
            CacheProvider::Redis(store) => store.set(key, value, ttl_secs).await,
            CacheProvider::Memory(store) => store.set(key, value, ttl_secs),
            CacheProvider::NoOp => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, key, "Cache write failed, dropping entry");
        }
    }

    pub async fn delete(&self, key: &str) {
        let result = match self {
            CacheProvider::Redis(store) => store.delete(key).await,
            CacheProvider::Memory(store) => {
                store.delete(key);
                Ok(())
            }
            CacheProvider::NoOp => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, key, "Cache delete failed");
        }
    }

    pub async fn exists(&self, key: &str) -> bool {
        let result = match self {
            CacheProvider::Redis(store) => store.exists(key).await,
            CacheProvider::Memory(store) => store.exists(key),
            CacheProvider::NoOp => Ok(false),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, key, "Cache exists check failed");
            false
        })
    }

    pub async fn mget<T: DeserializeOwned>(&self, keys: &[&str]) -> Vec<Option<T>> {
        let result = match self {
            CacheProvider::Redis(store) => store.mget(keys).await,
            CacheProvider::Memory(store) => keys.iter().map(|key| store.get(key)).collect(),
            CacheProvider::NoOp => Ok(keys.iter().map(|_| None).collect()),
        };
        result.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Cache batch read failed, treating as misses");
            keys.iter().map(|_| None).collect()
        })
    }

    pub async fn mset<T: Serialize>(&self, pairs: &[(&str, &T)], ttl_secs: u64) {
        let result = match self {
            CacheProvider::Redis(store) => store.mset(pairs, ttl_secs).await,
            CacheProvider::Memory(store) => pairs
                .iter()
                .try_for_each(|(key, value)| store.set(key, *value, ttl_secs)),
            CacheProvider::NoOp => Ok(()),
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, "Cache batch write failed, dropping entries");
        }
    }

    /// Reachability probe for health checks. `NoOp` reports an error so
    /// the health endpoint can distinguish "disabled" from "healthy";
    /// callers that only care about degradation ignore this.
    pub async fn ping(&self) -> CacheResult<()> {
        match self {
            CacheProvider::Redis(store) => store.ping().await,
            CacheProvider::Memory(_) => Ok(()),
            CacheProvider::NoOp => Err(CacheError::Redis(redis::RedisError::from((
                redis::ErrorKind::IoError,
                "cache disabled",
            )))),
        }
    }
}

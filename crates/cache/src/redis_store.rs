//! Redis-backed cache store using a multiplexed connection manager.

use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::entry::CacheEntry;
use crate::error::CacheResult;

/// Async Redis store. Values are stored as JSON-serialized
/// [`CacheEntry`] envelopes; the Redis-side `EX` bound is set as well so
/// entries that are never read again do not accumulate server-side.
#[derive(Clone)]
pub struct RedisCacheStore {
    manager: ConnectionManager,
}

impl RedisCacheStore {
    /// Connect to Redis and establish the connection manager.
    ///
    /// The manager transparently reconnects on connection loss; individual
    /// commands fail while the connection is down, which the provider layer
    /// treats as misses.
    pub async fn connect(url: &str) -> CacheResult<Self> {
        let client = redis::Client::open(url)?;
        let manager = client.get_connection_manager().await?;
        Ok(Self { manager })
    }

    /// Fetch and unwrap an entry. Expired entries are deleted and reported
    /// as absent.
    pub async fn get<T: DeserializeOwned>(&self, key: &str) -> CacheResult<Option<T>> {
        let mut conn = self.manager.clone();
        let raw: Option<String> = conn.get(key).await?;
        let Some(raw) = raw else {
            return Ok(None);
        };

        let entry: CacheEntry<T> = serde_json::from_str(&raw)?;
        if entry.is_expired() {
            let _: () = conn.del(key).await?;
            return Ok(None);
        }
        Ok(Some(entry.data))
    }

    /// Store a value under `key` with the given TTL (seconds). A zero TTL
    /// is a no-op: the entry would be expired before any read.
    pub async fn set<T: Serialize>(&self, key: &str, value: &T, ttl_secs: u64) -> CacheResult<()> {
        if ttl_secs == 0 {
            return Ok(());
        }
        let raw = serde_json::to_string(&CacheEntry::new(value, ttl_secs))?;
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(key, raw, ttl_secs).await?;
        Ok(())
    }

    pub async fn delete(&self, key: &str) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.del(key).await?;
        Ok(())
    }

    /// Whether a non-expired entry exists for `key`.
    pub async fn exists(&self, key: &str) -> CacheResult<bool> {
        // Round-trips the value so the envelope expiry check applies; a
        // key that exists server-side but is past its envelope TTL counts
        // as absent.
        Ok(self.get::<serde_json::Value>(key).await?.is_some())
    }

    /// Batch fetch. Each slot has the same expiry semantics as [`Self::get`].
    pub async fn mget<T: DeserializeOwned>(&self, keys: &[&str]) -> CacheResult<Vec<Option<T>>> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }
        let mut conn = self.manager.clone();
        let raws: Vec<Option<String>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await?;

        let mut out = Vec::with_capacity(keys.len());
        for (key, raw) in keys.iter().zip(raws) {
            match raw {
                Some(raw) => {
                    let entry: CacheEntry<T> = serde_json::from_str(&raw)?;
                    if entry.is_expired() {
                        let _: () = conn.del(*key).await?;
                        out.push(None);
                    } else {
                        out.push(Some(entry.data));
                    }
                }
                None => out.push(None),
            }
        }
        Ok(out)
    }

    /// Batch store with a shared TTL. Pipelined `SET EX` per key because
    /// Redis `MSET` cannot carry expiries.
    pub async fn mset<T: Serialize>(&self, pairs: &[(&str, &T)], ttl_secs: u64) -> CacheResult<()> {
        if pairs.is_empty() || ttl_secs == 0 {
            return Ok(());
        }
        let mut pipe = redis::pipe();
        for (key, value) in pairs {
            let raw = serde_json::to_string(&CacheEntry::new(*value, ttl_secs))?;
            pipe.set_ex(*key, raw, ttl_secs).ignore();
        }
        let mut conn = self.manager.clone();
        let _: () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    /// Round-trip a PING to check reachability.
    pub async fn ping(&self) -> CacheResult<()> {
        let mut conn = self.manager.clone();
        let _: String = redis::cmd("PING").query_async(&mut conn).await?;
        Ok(())
    }
}


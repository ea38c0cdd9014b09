/// Errors internal to the cache layer.
///
/// These never cross the crate boundary on the read/write path -- the
/// provider logs them and degrades to a miss/no-op -- but `ping` exposes
/// them so health checks can report cache reachability.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type CacheResult<T> = Result<T, CacheError>;

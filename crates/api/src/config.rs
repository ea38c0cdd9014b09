use crate::auth::jwt::JwtConfig;

/// One rate-limit scope: at most `max_requests` per client IP within a
/// `window_secs` fixed window.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_secs: u64,
}

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`). Must exceed the AI
    /// call timeout or every slow upstream call turns into a 408.
    pub request_timeout_secs: u64,
    /// Redis URL for the response cache; caching is disabled when unset.
    pub cache_url: Option<String>,
    /// TTL for cached analysis results, in seconds (default: `300`).
    pub cache_ttl_secs: u64,
    /// Maximum accepted message length in characters (default: `1000`).
    pub max_message_chars: usize,
    /// Rewrite-history retention window in days (default: `90`).
    pub history_retention_days: i64,
    /// Rate limit for the analyze operation (default: 10 per 60s).
    pub analyze_rate_limit: RateLimitConfig,
    /// Rate limit for pattern reporting (default: 5 per 60s).
    pub report_rate_limit: RateLimitConfig,
    /// Rate limit for all other traffic (default: 100 per 60s).
    pub general_rate_limit: RateLimitConfig,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                      | Default                  |
    /// |------------------------------|--------------------------|
    /// | `HOST`                       | `0.0.0.0`                |
    /// | `PORT`                       | `3000`                   |
    /// | `CORS_ORIGINS`               | `http://localhost:5173`  |
    /// | `REQUEST_TIMEOUT_SECS`       | `60`                     |
    /// | `REDIS_URL`                  | unset (cache disabled)   |
    /// | `CACHE_TTL_SECS`             | `300`                    |
    /// | `MAX_MESSAGE_CHARS`          | `1000`                   |
    /// | `HISTORY_RETENTION_DAYS`     | `90`                     |
    /// | `RATE_LIMIT_ANALYZE_MAX`     | `10`                     |
    /// | `RATE_LIMIT_REPORT_MAX`      | `5`                      |
    /// | `RATE_LIMIT_GENERAL_MAX`     | `100`                    |
    /// | `RATE_LIMIT_WINDOW_SECS`     | `60`                     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let cache_url = std::env::var("REDIS_URL").ok().filter(|s| !s.is_empty());

        let cache_ttl_secs: u64 = std::env::var("CACHE_TTL_SECS")
            .unwrap_or_else(|_| "300".into())
            .parse()
            .expect("CACHE_TTL_SECS must be a valid u64");

        let max_message_chars: usize = std::env::var("MAX_MESSAGE_CHARS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("MAX_MESSAGE_CHARS must be a valid usize");

        let history_retention_days: i64 = std::env::var("HISTORY_RETENTION_DAYS")
            .unwrap_or_else(|_| "90".into())
            .parse()
            .expect("HISTORY_RETENTION_DAYS must be a valid i64");

        let window_secs: u64 = std::env::var("RATE_LIMIT_WINDOW_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("RATE_LIMIT_WINDOW_SECS must be a valid u64");

        let limit = |var: &str, default: &str| -> u32 {
            std::env::var(var)
                .unwrap_or_else(|_| default.into())
                .parse()
                .unwrap_or_else(|_| panic!("{var} must be a valid u32"))
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            cache_url,
            cache_ttl_secs,
            max_message_chars,
            history_retention_days,
            analyze_rate_limit: RateLimitConfig {
                max_requests: limit("RATE_LIMIT_ANALYZE_MAX", "10"),
                window_secs,
            },
            report_rate_limit: RateLimitConfig {
                max_requests: limit("RATE_LIMIT_REPORT_MAX", "5"),
                window_secs,
            },
            general_rate_limit: RateLimitConfig {
                max_requests: limit("RATE_LIMIT_GENERAL_MAX", "100"),
                window_secs,
            },
            jwt: JwtConfig::from_env(),
        }
    }
}

//! In-process per-IP rate limiting with per-operation scopes.
//!
//! Fixed-window counting: each (scope, client IP) pair gets a counter
//! that resets when its window elapses. Limits come from
//! [`crate::config::ServerConfig`]; the analyze and pattern-report
//! operations carry their own (stricter) scopes on top of the general
//! limit applied to the whole API tree.

use std::collections::HashMap;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Mutex;
use std::time::Instant;

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;

use scamshield_core::error::CoreError;

use crate::config::RateLimitConfig;
use crate::error::AppError;

/// Rate-limit scope, one per distinct limit in the config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateScope {
    Analyze,
    Report,
    General,
}

struct Window {
    started: Instant,
    count: u32,
}

/// Fixed-window counters for all scopes.
pub struct RateLimiter {
    analyze: RateLimitConfig,
    report: RateLimitConfig,
    general: RateLimitConfig,
    windows: Mutex<HashMap<(RateScope, IpAddr), Window>>,
}

impl RateLimiter {
    pub fn new(analyze: RateLimitConfig, report: RateLimitConfig, general: RateLimitConfig) -> Self {
        Self {
            analyze,
            report,
            general,
            windows: Mutex::new(HashMap::new()),
        }
    }

    fn config_for(&self, scope: RateScope) -> RateLimitConfig {
        match scope {
            RateScope::Analyze => self.analyze,
            RateScope::Report => self.report,
            RateScope::General => self.general,
        }
    }

    /// Count one request against `(scope, ip)`.
    ///
    /// Returns `Err(retry_after_secs)` when the window's budget is spent.
    pub fn check(&self, scope: RateScope, ip: IpAddr) -> Result<(), u64> {
        let config = self.config_for(scope);
        let now = Instant::now();

        let mut windows = self.windows.lock().expect("rate limiter lock poisoned");
        let window = windows.entry((scope, ip)).or_insert(Window {
            started: now,
            count: 0,
        });

        let elapsed = now.duration_since(window.started).as_secs();
        if elapsed >= config.window_secs {
            window.started = now;
            window.count = 0;
        }

        window.count += 1;
        if window.count > config.max_requests {
            let retry_after = config.window_secs.saturating_sub(elapsed).max(1);
            return Err(retry_after);
        }
        Ok(())
    }
}

/// State handed to the middleware layer: the shared limiter plus which
/// scope this layer enforces.
#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: std::sync::Arc<RateLimiter>,
    pub scope: RateScope,
}

/// Axum middleware enforcing one rate-limit scope.
pub async fn enforce(
    State(rl): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ip = client_ip(&request);
    rl.limiter.check(rl.scope, ip).map_err(|retry_after_secs| {
        tracing::warn!(%ip, scope = ?rl.scope, "Rate limit exceeded");
        AppError::Core(CoreError::RateLimited { retry_after_secs })
    })?;
    Ok(next.run(request).await)
}

/// Best-effort client IP: first `x-forwarded-for` hop, else the socket
/// peer address, else unspecified (all un-attributable clients then share
/// one bucket).
fn client_ip(request: &Request) -> IpAddr {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            if let Ok(ip) = first.trim().parse() {
                return ip;
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
}

/// Errors from the AI gateway.
///
/// One variant per branch of the closed taxonomy the request surface maps
/// to HTTP responses. A single failed call is surfaced as-is; the gateway
/// never retries.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// The input message failed precondition checks; no network call was made.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The upstream rejected the request as malformed (HTTP 400), which
    /// includes a malformed or missing API key parameter.
    #[error("AI service rejected the request: {0}")]
    InvalidRequest(String),

    /// The upstream rejected our credentials (HTTP 401/403).
    #[error("AI service authentication failed: {0}")]
    Auth(String),

    /// The upstream throttled us (HTTP 429).
    #[error("AI service rate limit hit, retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u64 },

    /// The upstream failed internally (HTTP 5xx).
    #[error("AI service error (status {status})")]
    Upstream { status: u16 },

    /// No response was received (timeout, DNS, connection refused).
    #[error("Network error calling AI service: {0}")]
    Network(String),

    /// The response arrived but its envelope or embedded payload did not
    /// have the expected shape.
    #[error("Failed to parse AI response: {0}")]
    Parse(String),
}

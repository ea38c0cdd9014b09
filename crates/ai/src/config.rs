//! AI gateway configuration.

/// Generation endpoint configuration, passed explicitly to [`crate::AiGateway`].
///
/// The sampling parameters are fixed per process: every rewrite call uses
/// the same generation config so cached results stay comparable.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// API key for the generative-language endpoint.
    pub api_key: String,
    /// Base URL (default: the public generativelanguage endpoint).
    pub base_url: String,
    /// Model name (default: `gemini-1.5-flash`).
    pub model: String,
    /// Sampling temperature (default: `0.7`).
    pub temperature: f64,
    /// Nucleus sampling bound (default: `0.95`).
    pub top_p: f64,
    /// Top-k sampling bound (default: `40`).
    pub top_k: u32,
    /// Response token cap (default: `1024`).
    pub max_output_tokens: u32,
    /// Request timeout in seconds; a timeout is treated as a network
    /// failure (default: `30`).
    pub timeout_secs: u64,
    /// Maximum accepted message length in characters (default: `1000`).
    pub max_message_chars: usize,
}

/// Default retry-after hint (seconds) when the upstream 429 carries none.
pub const DEFAULT_RETRY_AFTER_SECS: u64 = 30;

impl AiConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Required | Default                                             |
    /// |------------------------|----------|-----------------------------------------------------|
    /// | `GEMINI_API_KEY`       | **yes**  | --                                                  |
    /// | `AI_BASE_URL`          | no       | `https://generativelanguage.googleapis.com/v1beta`  |
    /// | `AI_MODEL`             | no       | `gemini-1.5-flash`                                  |
    /// | `AI_TEMPERATURE`       | no       | `0.7`                                               |
    /// | `AI_TOP_P`             | no       | `0.95`                                              |
    /// | `AI_TOP_K`             | no       | `40`                                                |
    /// | `AI_MAX_OUTPUT_TOKENS` | no       | `1024`                                              |
    /// | `AI_TIMEOUT_SECS`      | no       | `30`                                                |
    /// | `MAX_MESSAGE_CHARS`    | no       | `1000`                                              |
    ///
    /// # Panics
    ///
    /// Panics if `GEMINI_API_KEY` is unset or a numeric variable fails to
    /// parse -- misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set in the environment");

        let base_url = std::env::var("AI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());

        let model = std::env::var("AI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".into());

        let temperature: f64 = std::env::var("AI_TEMPERATURE")
            .unwrap_or_else(|_| "0.7".into())
            .parse()
            .expect("AI_TEMPERATURE must be a valid f64");

        let top_p: f64 = std::env::var("AI_TOP_P")
            .unwrap_or_else(|_| "0.95".into())
            .parse()
            .expect("AI_TOP_P must be a valid f64");

        let top_k: u32 = std::env::var("AI_TOP_K")
            .unwrap_or_else(|_| "40".into())
            .parse()
            .expect("AI_TOP_K must be a valid u32");

        let max_output_tokens: u32 = std::env::var("AI_MAX_OUTPUT_TOKENS")
            .unwrap_or_else(|_| "1024".into())
            .parse()
            .expect("AI_MAX_OUTPUT_TOKENS must be a valid u32");

        let timeout_secs: u64 = std::env::var("AI_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("AI_TIMEOUT_SECS must be a valid u64");

        let max_message_chars: usize = std::env::var("MAX_MESSAGE_CHARS")
            .unwrap_or_else(|_| "1000".into())
            .parse()
            .expect("MAX_MESSAGE_CHARS must be a valid usize");

        Self {
            api_key,
            base_url,
            model,
            temperature,
            top_p,
            top_k,
            max_output_tokens,
            timeout_secs,
            max_message_chars,
        }
    }
}

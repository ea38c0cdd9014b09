//! HTTP gateway to the generative-language endpoint.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde::Deserialize;

use scamshield_core::analysis::AnalysisResult;
use scamshield_core::region::Region;
use scamshield_core::validate::validate_message;

use crate::config::{AiConfig, DEFAULT_RETRY_AFTER_SECS};
use crate::error::AiError;
use crate::parse::parse_analysis;
use crate::prompt::build_prompt;

/// Seam between the orchestrator and the concrete AI vendor.
///
/// Production wires [`AiGateway`]; tests substitute scripted fakes.
#[async_trait]
pub trait RewriteService: Send + Sync {
    /// Rewrite a suspicious message into its official form.
    async fn rewrite(&self, message: &str, region: Region) -> Result<AnalysisResult, AiError>;

    /// Reachability probe for health checks. Defaults to healthy so fakes
    /// need not implement it.
    async fn healthy(&self) -> bool {
        true
    }
}

/// Client for one generative-language endpoint.
pub struct AiGateway {
    client: reqwest::Client,
    config: AiConfig,
}

/// Response envelope of the `generateContent` endpoint. Only the fields
/// the gateway reads are modelled.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl AiGateway {
    /// Build a gateway with its own pooled HTTP client. The request
    /// timeout comes from the config; a timed-out call is reported as a
    /// network failure.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be constructed (TLS backend
    /// missing), which should fail at startup.
    pub fn new(config: AiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .expect("Failed to build HTTP client for AI gateway");
        Self { client, config }
    }

    /// Reachability probe for health checks. Any response below 500
    /// counts as reachable; the probe spends no tokens.
    pub async fn probe(&self) -> bool {
        match self.client.get(&self.config.base_url).send().await {
            Ok(response) => response.status().as_u16() < 500,
            Err(_) => false,
        }
    }

    /// Issue the single generation call and parse the result.
    async fn call(&self, prompt: &str) -> Result<AnalysisResult, AiError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url, self.config.model, self.config.api_key
        );

        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.config.temperature,
                "topP": self.config.top_p,
                "topK": self.config.top_k,
                "maxOutputTokens": self.config.max_output_tokens,
            },
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Self::error_for_status(status.as_u16(), response).await);
        }

        let envelope: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AiError::Parse(format!("response envelope did not parse: {e}")))?;

        let text = envelope
            .candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|c| c.parts.first())
            .and_then(|p| p.text.as_deref())
            .ok_or_else(|| AiError::Parse("response contained no text candidates".into()))?;

        parse_analysis(text).map_err(AiError::Parse)
    }

    /// Map a non-2xx upstream status to the error taxonomy.
    async fn error_for_status(status: u16, response: reqwest::Response) -> AiError {
        match status {
            400 => {
                let body = response.text().await.unwrap_or_default();
                AiError::InvalidRequest(truncate(&body, 200))
            }
            401 | 403 => {
                let body = response.text().await.unwrap_or_default();
                AiError::Auth(truncate(&body, 200))
            }
            429 => {
                let retry_after_secs = response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_RETRY_AFTER_SECS);
                AiError::RateLimited { retry_after_secs }
            }
            s => AiError::Upstream { status: s },
        }
    }
}

#[async_trait]
impl RewriteService for AiGateway {
    async fn rewrite(&self, message: &str, region: Region) -> Result<AnalysisResult, AiError> {
        validate_message(message, self.config.max_message_chars)
            .map_err(|e| AiError::Validation(e.to_string()))?;

        let request_id = uuid::Uuid::new_v4();
        let prompt = build_prompt(message, region);
        let prompt_chars = prompt.chars().count();

        let started = Instant::now();
        let result = self.call(&prompt).await;
        let latency_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(analysis) => tracing::info!(
                %request_id,
                prompt_chars,
                latency_ms,
                success = true,
                red_flags_fixed = analysis.red_flags_fixed,
                "AI rewrite completed"
            ),
            Err(e) => tracing::warn!(
                %request_id,
                prompt_chars,
                latency_ms,
                success = false,
                error = %e,
                "AI rewrite failed"
            ),
        }

        result
    }

    async fn healthy(&self) -> bool {
        self.probe().await
    }
}

/// Cap an error body at `max` characters for log/message hygiene.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        text.chars().take(max).collect()
    }
}

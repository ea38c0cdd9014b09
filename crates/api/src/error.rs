use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use scamshield_ai::AiError;
use scamshield_core::error::CoreError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`AiError`] for gateway
/// errors, and adds HTTP-specific variants. Implements [`IntoResponse`];
/// this is the single place any error maps to an HTTP status and a
/// taxonomy code.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `scamshield_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An AI gateway error, propagated unchanged from the orchestrator.
    #[error(transparent)]
    Ai(#[from] AiError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matched the request path.
    #[error("Route not found")]
    RouteNotFound,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, retry_after_secs) = classify(&self);

        let mut body = json!({
            "code": code,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        });
        if let Some(secs) = retry_after_secs {
            body["retry_after_secs"] = json!(secs);
        }

        (status, axum::Json(body)).into_response()
    }
}

/// Map an error to `(status, taxonomy code, message, retry-after)`.
fn classify(err: &AppError) -> (StatusCode, &'static str, String, Option<u64>) {
    match err {
        // --- CoreError variants ---
        AppError::Core(core) => match core {
            CoreError::NotFound { entity, id } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{entity} with id {id} not found"),
                None,
            ),
            CoreError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            CoreError::Unauthorized(msg) => (
                StatusCode::UNAUTHORIZED,
                "AUTHENTICATION_ERROR",
                msg.clone(),
                None,
            ),
            CoreError::Forbidden(msg) => (
                StatusCode::FORBIDDEN,
                "AUTHORIZATION_ERROR",
                msg.clone(),
                None,
            ),
            CoreError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT_EXCEEDED",
                "Too many requests, slow down".to_string(),
                Some(*retry_after_secs),
            ),
            CoreError::Internal(msg) => internal(msg),
        },

        // --- AI gateway errors ---
        AppError::Ai(ai) => match ai {
            AiError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg.clone(),
                None,
            ),
            AiError::RateLimited { retry_after_secs } => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT_EXCEEDED",
                "The AI service is throttling requests, try again shortly".to_string(),
                Some(*retry_after_secs),
            ),
            AiError::Network(msg) => {
                tracing::error!(error = %msg, "AI network error");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "NETWORK_ERROR",
                    "Could not reach the AI service".to_string(),
                    None,
                )
            }
            AiError::InvalidRequest(_) | AiError::Auth(_) | AiError::Upstream { .. }
            | AiError::Parse(_) => {
                tracing::error!(error = %ai, "AI service error");
                (
                    StatusCode::BAD_GATEWAY,
                    "AI_SERVICE_ERROR",
                    "The AI service failed to process the message".to_string(),
                    None,
                )
            }
        },

        // --- Database errors ---
        AppError::Database(err) => classify_sqlx_error(err),

        // --- HTTP-specific errors ---
        AppError::BadRequest(msg) => (
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            msg.clone(),
            None,
        ),
        AppError::RouteNotFound => (
            StatusCode::NOT_FOUND,
            "ROUTE_NOT_FOUND",
            "No such route".to_string(),
            None,
        ),
        AppError::InternalError(msg) => internal(msg),
    }
}

/// Classify a sqlx error into a status, taxonomy code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Everything else maps to 503 DATABASE_SERVICE_ERROR with a sanitized
///   message; the underlying error goes to the log, not the client.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String, Option<u64>) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
            None,
        ),
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "DATABASE_SERVICE_ERROR",
                "The data store is currently unavailable".to_string(),
                None,
            )
        }
    }
}

/// 500 response. Debug builds carry the underlying message; release
/// builds replace it with a generic string so internals never leak.
fn internal(msg: &str) -> (StatusCode, &'static str, String, Option<u64>) {
    tracing::error!(error = %msg, "Internal error");
    let message = if cfg!(debug_assertions) {
        msg.to_string()
    } else {
        "An internal error occurred".to_string()
    };
    (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", message, None)
}

//! Unified error type for the AnyVod API.
//!
//! Upstream failures keep the provider's status code and raw body so the
//! front end sees exactly what the catalog or embed provider returned.
//! Route handlers return `Result<T, Error>` directly.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

/// Result alias used by the catalog and embed clients.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The catalog API key is not configured.
    #[error("TMDB_API_KEY not set in environment")]
    MissingApiKey,

    /// An upstream provider answered with a non-success status.
    #[error("upstream returned HTTP {status}")]
    Upstream {
        /// Status code returned by the provider.
        status: u16,
        /// Raw response body, forwarded untouched.
        body: String,
    },

    /// The upstream could not be reached (timeout, DNS, connection reset).
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The upstream answered 2xx but the body was not JSON.
    #[error("failed to decode upstream response: {0}")]
    Decode(String),

    /// Request parameters failed validation.
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// HTTP status this error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            Error::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Upstream { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Error::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Decode(_) => StatusCode::BAD_GATEWAY,
            Error::Validation(_) => StatusCode::BAD_REQUEST,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Error::MissingApiKey => "configuration_error",
            Error::Upstream { .. } => "upstream_error",
            Error::Transport(_) => "transport_error",
            Error::Decode(_) => "decode_error",
            Error::Validation(_) => "validation_error",
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %self, "Server error in API handler");
        }

        match self {
            Error::Upstream { body, .. } => {
                let content_type = if serde_json::from_str::<serde_json::Value>(&body).is_ok() {
                    "application/json"
                } else {
                    "text/plain; charset=utf-8"
                };
                (status, [(header::CONTENT_TYPE, content_type)], body).into_response()
            }
            other => {
                let body = json!({
                    "error": other.to_string(),
                    "code": other.code(),
                });
                (status, axum::Json(body)).into_response()
            }
        }
    }
}

//! Proxy error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::error::{ErrorBody, ErrorResponse};

/// Errors raised while forwarding a request upstream
#[derive(Error, Debug)]
pub enum ProxyError {
    /// Rule target is not an absolute http(s) URL
    #[error("Invalid proxy target '{target}': {reason}")]
    InvalidTarget { target: String, reason: String },

    /// Rule prefix does not start with '/'
    #[error("Invalid proxy prefix '{0}': must start with '/'")]
    InvalidPrefix(String),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    Client(String),

    /// Incoming body exceeded the configured limit or could not be read
    #[error("Request body rejected: {0}")]
    Body(String),

    /// Upstream did not answer in time
    #[error("Upstream timed out: {0}")]
    Timeout(String),

    /// Upstream connection or protocol failure
    #[error("Upstream request failed: {0}")]
    Upstream(String),
}

impl ProxyError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ProxyError::Body(_) => (StatusCode::PAYLOAD_TOO_LARGE, "BODY_REJECTED"),
            ProxyError::Timeout(_) => (StatusCode::GATEWAY_TIMEOUT, "UPSTREAM_TIMEOUT"),
            ProxyError::Upstream(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR"),
            ProxyError::InvalidTarget { .. }
            | ProxyError::InvalidPrefix(_)
            | ProxyError::Client(_) => (StatusCode::INTERNAL_SERVER_ERROR, "PROXY_CONFIG_ERROR"),
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ProxyError::Timeout(err.to_string())
        } else {
            ProxyError::Upstream(err.to_string())
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let request_id = uuid::Uuid::new_v4().to_string();

        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "Proxy error"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

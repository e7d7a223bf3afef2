//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::bills::StoreError;
use crate::receipt::ReceiptError;
use crate::social::SocialError;

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Bill store error
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Friends / leaderboard store error
    #[error(transparent)]
    Social(#[from] SocialError),

    /// Receipt upload rejected or unreadable
    #[error(transparent)]
    Receipt(#[from] ReceiptError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// HTTP status and machine-readable code for this error
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::Store(StoreError::BillNotFound) => {
                (StatusCode::NOT_FOUND, "BILL_NOT_FOUND")
            }
            ApiError::Store(StoreError::InvalidItem(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            ApiError::Social(SocialError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR")
            }
            ApiError::Social(SocialError::DuplicateFriend(_)) => {
                (StatusCode::CONFLICT, "FRIEND_EXISTS")
            }
            ApiError::Social(_) => (StatusCode::INTERNAL_SERVER_ERROR, "DATABASE_ERROR"),
            ApiError::Receipt(
                ReceiptError::MissingFile
                | ReceiptError::EmptyFilename
                | ReceiptError::UnsupportedFormat,
            ) => (StatusCode::BAD_REQUEST, "INVALID_UPLOAD"),
            ApiError::Receipt(ReceiptError::InvalidImage(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "IMAGE_PROCESSING_ERROR")
            }
            ApiError::Receipt(_) => (StatusCode::INTERNAL_SERVER_ERROR, "RECEIPT_ERROR"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();

        let request_id = uuid::Uuid::new_v4().to_string();

        if status.is_server_error() {
            tracing::error!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                request_id = %request_id,
                error_code = %code,
                error_message = %self,
                "Request rejected"
            );
        }

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

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_http() {
        let err = ApiError::from(StoreError::BillNotFound);
        assert_eq!(err.status_and_code().0, StatusCode::NOT_FOUND);
        assert_eq!(err.to_string(), "Bill not found");
    }

    #[test]
    fn test_receipt_messages_pass_through() {
        let err = ApiError::from(ReceiptError::MissingFile);
        assert_eq!(err.status_and_code(), (StatusCode::BAD_REQUEST, "INVALID_UPLOAD"));
        assert_eq!(err.to_string(), "No file part in the request");

        let err = ApiError::from(ReceiptError::InvalidImage("bad".into()));
        assert_eq!(err.status_and_code().0, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_duplicate_friend_is_conflict() {
        let err = ApiError::from(SocialError::DuplicateFriend("a@b.c".into()));
        assert_eq!(err.status_and_code().0, StatusCode::CONFLICT);
    }
}

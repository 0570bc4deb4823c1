//! # HTTP API Errors
//!
//! Maps catalog failures onto status codes and the `{"error": ...}` body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use crate::store::CatalogError;

/// Message returned for every server-side failure
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// Client-visible API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Malformed or missing input
    #[error("{0}")]
    Validation(String),

    /// Write would duplicate a unique row
    #[error("{0}")]
    Conflict(String),

    /// Referenced entity absent, or no route matches the path
    #[error("{0}")]
    NotFound(String),

    /// Route exists but not for this method
    #[error("Method Not Allowed")]
    MethodNotAllowed,

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Storage failure; detail stays in the server log
    #[error("{}", INTERNAL_ERROR_MESSAGE)]
    Internal,

    /// Store did not answer the readiness check
    #[error("Service Unavailable")]
    Unavailable,
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    pub fn joke_not_found() -> Self {
        ApiError::NotFound("Joke not found".to_string())
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Validation(msg) => ApiError::Validation(msg),
            CatalogError::Conflict(msg) => ApiError::Conflict(msg),
            CatalogError::NotFound(msg) => ApiError::NotFound(msg),
            CatalogError::Storage(detail) => {
                error!(error = %detail, "catalog operation failed");
                ApiError::Internal
            }
        }
    }
}

/// Error response body
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Conflict("x".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::joke_not_found().status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::MethodNotAllowed.status_code(),
            StatusCode::METHOD_NOT_ALLOWED
        );
        assert_eq!(
            ApiError::Internal.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_detail_is_not_exposed() {
        let err = ApiError::from(CatalogError::Storage("disk I/O error at page 7".to_string()));
        assert_eq!(err, ApiError::Internal);
        assert_eq!(err.to_string(), INTERNAL_ERROR_MESSAGE);
    }

    #[test]
    fn test_catalog_messages_pass_through() {
        let err = ApiError::from(CatalogError::joke_not_found());
        assert_eq!(err.to_string(), "Joke not found");
    }
}

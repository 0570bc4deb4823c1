//! Request body extraction
//!
//! Bodies are read as raw bytes and parsed as JSON regardless of the
//! `Content-Type` header. An absent or blank body is the request type's
//! default, so missing fields are reported by the handler's own validation.

use axum::async_trait;
use axum::body::Bytes;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use super::errors::ApiError;

/// JSON request body whose failures render as [`ApiError`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| invalid_body(e.body_text()))?;
        parse_body(&bytes).map(JsonBody)
    }
}

fn parse_body<T>(bytes: &[u8]) -> Result<T, ApiError>
where
    T: DeserializeOwned + Default,
{
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(T::default());
    }
    serde_json::from_slice(bytes).map_err(|e| invalid_body(e.to_string()))
}

fn invalid_body(detail: impl std::fmt::Display) -> ApiError {
    ApiError::Validation(format!("Invalid request body: {}", detail))
}

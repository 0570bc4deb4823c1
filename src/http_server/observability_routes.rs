//! Observability HTTP Routes
//!
//! Health check backed by a store readiness query.

use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::errors::{ApiError, ApiResult};
use super::state::SharedState;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check route
pub fn health_routes(state: SharedState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

async fn health_handler(State(state): State<SharedState>) -> ApiResult<Json<HealthResponse>> {
    state.run(|store| store.readiness()).await.map_err(|e| {
        warn!(error = %e, "store readiness check failed");
        ApiError::Unavailable
    })?;

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    }))
}

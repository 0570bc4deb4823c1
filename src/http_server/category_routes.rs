//! Category HTTP Routes
//!
//! Listing and creating joke categories.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use super::extract::JsonBody;
use super::state::SharedState;
use crate::store::Category;

// ==================
// Request Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
}

// ==================
// Category Routes
// ==================

/// Create category routes
pub fn category_routes(state: SharedState) -> Router {
    Router::new()
        .route("/categories", get(list_categories_handler))
        .route("/api/categories", post(create_category_handler))
        .with_state(state)
}

async fn list_categories_handler(
    State(state): State<SharedState>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.run(|store| store.list_categories()).await?;
    Ok(Json(categories))
}

async fn create_category_handler(
    State(state): State<SharedState>,
    JsonBody(request): JsonBody<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let name = match request.name {
        Some(name) if !name.trim().is_empty() => name,
        _ => return Err(ApiError::Validation("Category name is required".to_string())),
    };

    let category = state.run(move |store| store.create_category(&name)).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

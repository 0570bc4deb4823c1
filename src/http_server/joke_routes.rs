//! Joke HTTP Routes
//!
//! Random picks, per-category listings, joke creation, category links and
//! voting.

use axum::{
    extract::{Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;

use super::errors::{ApiError, ApiResult};
use super::extract::JsonBody;
use super::state::SharedState;
use crate::store::{CreatedJoke, Joke, JokeLink, VoteReceipt, VoteTally, VoteType};

// ==================
// Request Types
// ==================

#[derive(Debug, Default, Deserialize)]
pub struct CreateJokeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct VoteRequest {
    #[serde(default, rename = "type")]
    pub vote_type: Option<String>,
}

// ==================
// Joke Routes
// ==================

/// Create joke routes
///
/// `/jokes/:key` carries a category name on its own and a joke id when
/// followed by `/categories/:category`; the router needs one parameter name
/// per position. The static `/jokes/random` segment shadows `:key`, so it
/// repeats the create handler for a category literally named "random".
pub fn joke_routes(state: SharedState) -> Router {
    Router::new()
        .route(
            "/jokes/random",
            get(random_joke_handler).post(create_random_category_joke_handler),
        )
        .route("/jokes/random/:category", get(random_joke_in_category_handler))
        .route(
            "/jokes/:key",
            get(jokes_in_category_handler).post(create_joke_handler),
        )
        .route("/jokes/:key/categories/:category", post(link_joke_handler))
        .route("/joke/:id", get(get_joke_handler))
        .route("/api/jokes/:id/vote", post(vote_handler))
        .route("/api/jokes/:id/votes", get(vote_tally_handler))
        .with_state(state)
}

// ==================
// Helper Functions
// ==================

/// Name of the category whose create route collides with `/jokes/random`.
const RANDOM_CATEGORY: &str = "random";

/// Ids that are not integers cannot name a joke.
fn parse_joke_id(raw: &str) -> ApiResult<i64> {
    raw.parse().map_err(|_| ApiError::joke_not_found())
}

// ==================
// Read Handlers
// ==================

async fn random_joke_handler(State(state): State<SharedState>) -> ApiResult<Json<Option<Joke>>> {
    let joke = state.run(|store| store.random_joke()).await?;
    Ok(Json(joke))
}

async fn random_joke_in_category_handler(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> ApiResult<Json<Option<Joke>>> {
    let joke = state
        .run(move |store| store.random_joke_in_category(&category))
        .await?;
    Ok(Json(joke))
}

async fn jokes_in_category_handler(
    State(state): State<SharedState>,
    Path(category): Path<String>,
) -> ApiResult<Json<Vec<Joke>>> {
    let jokes = state
        .run(move |store| store.jokes_in_category(&category))
        .await?;
    Ok(Json(jokes))
}

async fn get_joke_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Joke>> {
    let id = parse_joke_id(&id)?;
    let joke = state.run(move |store| store.joke_by_id(id)).await?;
    Ok(Json(joke))
}

async fn vote_tally_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<VoteTally>> {
    let id = parse_joke_id(&id)?;
    let tally = state.run(move |store| store.vote_tally(id)).await?;
    Ok(Json(tally))
}

// ==================
// Write Handlers
// ==================

async fn create_joke_handler(
    State(state): State<SharedState>,
    Path(category): Path<String>,
    JsonBody(request): JsonBody<CreateJokeRequest>,
) -> ApiResult<Json<CreatedJoke>> {
    create_joke(&state, category, request).await
}

async fn create_random_category_joke_handler(
    State(state): State<SharedState>,
    JsonBody(request): JsonBody<CreateJokeRequest>,
) -> ApiResult<Json<CreatedJoke>> {
    create_joke(&state, RANDOM_CATEGORY.to_string(), request).await
}

async fn create_joke(
    state: &SharedState,
    category: String,
    request: CreateJokeRequest,
) -> ApiResult<Json<CreatedJoke>> {
    let text = match request.text {
        Some(text) if !text.trim().is_empty() => text,
        _ => return Err(ApiError::Validation("Joke text is required".to_string())),
    };

    let created = state
        .run(move |store| store.create_joke_in_category(&category, &text))
        .await?;
    Ok(Json(created))
}

async fn link_joke_handler(
    State(state): State<SharedState>,
    Path((id, category)): Path<(String, String)>,
) -> ApiResult<Json<JokeLink>> {
    let id = parse_joke_id(&id)?;
    let link = state
        .run(move |store| store.link_joke_to_category(id, &category))
        .await?;
    Ok(Json(link))
}

async fn vote_handler(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    JsonBody(request): JsonBody<VoteRequest>,
) -> ApiResult<Json<VoteReceipt>> {
    let vote: VoteType = request.vote_type.as_deref().unwrap_or_default().parse()?;
    let id = parse_joke_id(&id)?;

    let receipt = state.run(move |store| store.vote(id, vote)).await?;
    Ok(Json(receipt))
}

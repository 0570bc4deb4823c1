//! Shared router state
//!
//! Handlers receive the store through axum state rather than a global, so
//! tests can build a router around an isolated in-memory store.

use std::sync::Arc;

use tracing::error;

use super::errors::{ApiError, ApiResult};
use crate::store::{CatalogResult, JokeStore};

/// Catalog state shared across handlers
#[derive(Debug, Clone)]
pub struct CatalogState {
    pub store: JokeStore,
}

/// State handle passed to routers
pub type SharedState = Arc<CatalogState>;

impl CatalogState {
    pub fn new(store: JokeStore) -> Self {
        Self { store }
    }

    /// Runs one store operation on the blocking pool and maps its failure.
    pub async fn run<T, F>(&self, op: F) -> ApiResult<T>
    where
        F: FnOnce(&JokeStore) -> CatalogResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.store.clone();
        tokio::task::spawn_blocking(move || op(&store))
            .await
            .map_err(|e| {
                error!(error = %e, "store task did not complete");
                ApiError::Internal
            })?
            .map_err(ApiError::from)
    }
}

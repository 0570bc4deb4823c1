//! # jokebox HTTP Server Module
//!
//! Thin request handlers over the catalog store. Each handler extracts its
//! input, calls exactly one store operation, and maps the result or failure
//! to a JSON response.
//!
//! # Endpoints
//!
//! - `GET /jokes/random`, `GET /jokes/random/:category` - Random joke or null
//! - `GET /jokes/:category`, `POST /jokes/:category` - List / create jokes
//!   (`POST /jokes/random` creates in the category named "random")
//! - `POST /jokes/:id/categories/:category` - Link a joke to a category
//! - `GET /joke/:id` - Joke by id
//! - `GET /categories`, `POST /api/categories` - List / create categories
//! - `POST /api/jokes/:id/vote`, `GET /api/jokes/:id/votes` - Votes
//! - `GET /health` - Health check
//!
//! Unknown paths answer 404 and known paths with the wrong method answer 405,
//! both with the usual `{"error": ...}` body.

pub mod category_routes;
pub mod config;
pub mod errors;
pub mod extract;
pub mod joke_routes;
pub mod observability_routes;
pub mod server;
pub mod state;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use extract::JsonBody;
pub use server::HttpServer;
pub use state::{CatalogState, SharedState};

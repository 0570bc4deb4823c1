//! Joke catalog store
//!
//! The relational core of jokebox: jokes, categories, the many-to-many link
//! between them, and a vote log. Everything persists in one SQLite file.
//!
//! # Invariants
//!
//! - Category names are unique
//! - A (joke, category) pair is linked at most once
//! - Links and votes reference existing rows and cascade on delete
//! - Vote counters start at zero and only grow, one UPDATE per vote

mod catalog;
mod errors;
mod model;
pub mod schema;

pub use catalog::{JokeStore, DEFAULT_READ_CONNECTIONS};
pub use errors::{CatalogError, CatalogResult};
pub use model::{Category, CreatedJoke, Joke, JokeLink, VoteReceipt, VoteTally, VoteType};

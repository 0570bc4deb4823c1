//! jokebox - a joke catalog served over HTTP
//!
//! Jokes, categories, the links between them and like/dislike votes, kept in
//! a single SQLite file.

pub mod cli;
pub mod http_server;
pub mod observability;
pub mod store;

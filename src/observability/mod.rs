//! Observability for jokebox
//!
//! Structured logging through `tracing`. Request-level spans come from
//! `tower-http`'s trace layer in the HTTP server.

pub mod logger;

pub use logger::{init as init_logging, LogInitError};

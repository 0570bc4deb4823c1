//! Logging setup for jokebox
//!
//! Installs a `tracing-subscriber` fmt subscriber:
//! - `RUST_LOG` wins when set, otherwise the configured level
//! - human-readable lines by default, JSON lines on request
//! - one log line = one event

use tracing_subscriber::EnvFilter;

/// Errors raised while installing the global subscriber
#[derive(Debug, thiserror::Error)]
pub enum LogInitError {
    #[error("invalid log filter '{0}'")]
    InvalidFilter(String),

    #[error("global subscriber already installed")]
    AlreadyInstalled,
}

/// Builds the event filter: `RUST_LOG` first, then `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LogInitError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(level).map_err(|_| LogInitError::InvalidFilter(level.to_string())),
    }
}

/// Install the global subscriber. Call once at startup.
pub fn init(level: &str, json: bool) -> Result<(), LogInitError> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(false);

    let installed = if json {
        builder.json().flatten_event(true).try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|_| LogInitError::AlreadyInstalled)
}

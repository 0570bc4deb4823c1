//! CLI module for jokebox
//!
//! Provides command-line interface for:
//! - serve: open the catalog and run the HTTP server
//! - init: create the catalog file and schema

mod args;
mod commands;
mod errors;

pub use args::{Cli, Command};
pub use commands::{init, resolve_config, run, run_command, serve};
pub use errors::{CliError, CliErrorCode, CliResult};

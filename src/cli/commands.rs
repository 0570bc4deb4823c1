//! CLI command implementations
//!
//! `serve` resolves configuration (file, then environment, then flags),
//! installs logging, opens the store and runs the HTTP server on a tokio
//! runtime. `init` only opens the store, which creates the schema.

use std::path::{Path, PathBuf};

use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::observability;
use crate::store::JokeStore;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};

/// Parse arguments and run the selected command
pub fn run() -> CliResult<()> {
    run_command(Cli::parse_args().command)
}

/// Dispatch a parsed command
pub fn run_command(command: Command) -> CliResult<()> {
    match command {
        Command::Serve {
            config,
            port,
            database,
            log_json,
        } => {
            let config = resolve_config(config.as_deref(), port, database, log_json)?;
            serve(config)
        }
        Command::Init { database } => init(&database),
    }
}

/// Merge config sources: file (if any), then environment, then CLI flags.
pub fn resolve_config(
    path: Option<&Path>,
    port: Option<u16>,
    database: Option<PathBuf>,
    log_json: bool,
) -> CliResult<HttpServerConfig> {
    let mut config = match path {
        Some(path) => HttpServerConfig::load(path)?,
        None => HttpServerConfig::default(),
    }
    .apply_env()?;

    if let Some(port) = port {
        config.port = port;
    }
    if let Some(database) = database {
        config.database_path = database;
    }
    config.log_json |= log_json;
    Ok(config)
}

/// Open the store and serve HTTP until interrupted
pub fn serve(config: HttpServerConfig) -> CliResult<()> {
    observability::init_logging(&config.log_level, config.log_json)?;

    let store = JokeStore::open_with_readers(&config.database_path, config.read_connections)?;
    info!(
        path = %config.database_path.display(),
        read_connections = config.read_connections,
        "catalog store opened"
    );

    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::serve_failed(format!("Failed to start runtime: {}", e)))?;
    runtime.block_on(HttpServer::new(config, store).start())?;
    Ok(())
}

/// Create the database file and schema
pub fn init(database: &Path) -> CliResult<()> {
    JokeStore::open_with_readers(database, 0)?;
    println!("Initialized catalog at {}", database.display());
    Ok(())
}

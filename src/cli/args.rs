//! CLI argument definitions using clap
//!
//! Commands:
//! - jokebox serve [--config <path>] [--port <port>] [--database <path>]
//! - jokebox init [--database <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jokebox - a joke catalog over HTTP
#[derive(Parser, Debug)]
#[command(name = "jokebox")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP server
    Serve {
        /// Path to a JSON configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Port to listen on (overrides config and PORT)
        #[arg(long)]
        port: Option<u16>,

        /// SQLite database file (overrides config and JOKEBOX_DB)
        #[arg(long)]
        database: Option<PathBuf>,

        /// Emit logs as JSON lines
        #[arg(long)]
        log_json: bool,
    },

    /// Create the database file and schema, then exit
    Init {
        /// SQLite database file
        #[arg(long, env = "JOKEBOX_DB", default_value = "joke.db")]
        database: PathBuf,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

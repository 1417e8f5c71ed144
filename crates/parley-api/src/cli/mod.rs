//! CLI definitions for the `parley` binary.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;

use parley_types::config::AppConfig;

/// Minimal chat server: users, chats and messages over HTTP.
#[derive(Parser)]
#[command(name = "parley", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to a TOML configuration file.
    #[arg(long, global = true, env = "PARLEY_CONFIG", default_value = "parley.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve(ServeArgs),

    /// Apply database migrations and exit.
    Migrate(StorageArgs),

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

#[derive(Args)]
pub struct ServeArgs {
    /// Address to bind to.
    #[arg(long, env = "HOST")]
    pub host: Option<String>,

    /// Port to listen on.
    #[arg(long, env = "PORT")]
    pub port: Option<u16>,

    #[command(flatten)]
    pub storage: StorageArgs,
}

#[derive(Args)]
pub struct StorageArgs {
    /// SQLite database URL, e.g. `sqlite:///var/lib/parley/parley.db`.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

impl Cli {
    /// Default filter directives derived from `-v` / `--quiet`.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "info",
            1 => "info,parley_api=debug,parley_core=debug,parley_infra=debug",
            _ => "trace",
        }
    }
}

impl StorageArgs {
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(url) = &self.database_url {
            config.storage.database_url = Some(url.clone());
        }
    }
}

impl ServeArgs {
    /// Overlay flags (and their environment fallbacks) onto file config.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        self.storage.apply(config);
    }
}

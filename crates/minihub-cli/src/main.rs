//! # minihub-admin
//!
//! Administration CLI for a MiniHub job board deployment.
//!
//! ## Usage
//!
//! ```bash
//! # Configuration
//! minihub-admin config init --network testnet --package 0x... \
//!     --job-board 0x... --user-registry 0x... --employer-registry 0x...
//! minihub-admin config show
//!
//! # Reports
//! minihub-admin stats --detailed
//! minihub-admin jobs list --active --limit 5
//! minihub-admin users search rust move --all
//! minihub-admin events hires
//!
//! # Exports and live view
//! minihub-admin export all --dir exports
//! minihub-admin monitor --interval 10
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use error::CliError;

use commands::Context;

/// MiniHub admin CLI
#[derive(Parser, Debug)]
#[command(name = "minihub-admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Configuration file
    #[arg(long, global = true, default_value = config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// RPC endpoint URL, overrides the configured network
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Create, show or change the configuration
    #[command(subcommand)]
    Config(commands::config::ConfigCommand),
    /// Platform statistics
    Stats {
        /// Also show network and object ids
        #[arg(long)]
        detailed: bool,
    },
    /// Browse jobs
    #[command(subcommand)]
    Jobs(commands::jobs::JobsCommand),
    /// Browse user profiles
    #[command(subcommand)]
    Users(commands::users::UsersCommand),
    /// Browse employer profiles
    #[command(subcommand)]
    Employers(commands::employers::EmployersCommand),
    /// Recent contract events
    #[command(subcommand)]
    Events(commands::events::EventsCommand),
    /// Write records to JSON files
    #[command(subcommand)]
    Export(commands::export::ExportCommand),
    /// Refresh statistics until interrupted
    Monitor {
        /// Seconds between refreshes
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// Print a usage guide
    HelpGuide,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    if let Err(e) = run(cli.command, &cli.config, cli.rpc_url.as_deref(), cli.json).await {
        tracing::debug!(error = ?e, "command failed");
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
    }
}

async fn run(
    command: Commands,
    config_path: &std::path::Path,
    rpc_url: Option<&str>,
    json: bool,
) -> Result<(), CliError> {
    let load = || Context::load(config_path, rpc_url, json);
    match command {
        Commands::Config(cmd) => cmd.execute(config_path, json),
        Commands::HelpGuide => {
            commands::guide::execute();
            Ok(())
        }
        Commands::Stats { detailed } => commands::stats::execute(&load()?, detailed).await,
        Commands::Jobs(cmd) => cmd.execute(&load()?).await,
        Commands::Users(cmd) => cmd.execute(&load()?).await,
        Commands::Employers(cmd) => cmd.execute(&load()?).await,
        Commands::Events(cmd) => cmd.execute(&load()?).await,
        Commands::Export(cmd) => cmd.execute(&load()?).await,
        Commands::Monitor { interval } => commands::monitor::execute(&load()?, interval).await,
    }
}

//! Configuration commands

use std::path::Path;

use clap::Subcommand;
use minihub_sdk::Network;

use crate::config::Config;
use crate::output::{Output, Report};
use crate::CliError;

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a new configuration file
    Init {
        /// Network: mainnet, testnet, devnet or localnet
        #[arg(long)]
        network: Network,

        /// Published package id
        #[arg(long = "package")]
        package_id: String,

        /// Shared JobBoard object id
        #[arg(long = "job-board")]
        job_board_id: String,

        /// Shared UserRegistry object id
        #[arg(long = "user-registry")]
        user_registry_id: String,

        /// Shared EmployerRegistry object id
        #[arg(long = "employer-registry")]
        employer_registry_id: String,

        /// Clock object id (defaults to 0x6)
        #[arg(long = "clock")]
        clock_id: Option<String>,
    },

    /// Show the current configuration
    Show,

    /// Change individual settings
    Update {
        #[arg(long)]
        network: Option<Network>,

        #[arg(long = "package")]
        package_id: Option<String>,

        #[arg(long = "job-board")]
        job_board_id: Option<String>,

        #[arg(long = "user-registry")]
        user_registry_id: Option<String>,

        #[arg(long = "employer-registry")]
        employer_registry_id: Option<String>,

        #[arg(long = "clock")]
        clock_id: Option<String>,
    },
}

impl ConfigCommand {
    pub fn execute(self, path: &Path, json: bool) -> Result<(), CliError> {
        match self {
            ConfigCommand::Init {
                network,
                package_id,
                job_board_id,
                user_registry_id,
                employer_registry_id,
                clock_id,
            } => {
                let config = Config {
                    network,
                    package_id,
                    job_board_id,
                    user_registry_id,
                    employer_registry_id,
                    clock_id,
                };
                config.package_config()?;
                config.save(path)?;
                print_saved(&config, path, json, "Configuration saved");
                Ok(())
            }

            ConfigCommand::Show => {
                let config = Config::load(path)?;
                Output::new(json)
                    .field_value("config", &config)
                    .field("path", &path.display().to_string())
                    .message(render_config(&config, path))
                    .print();
                Ok(())
            }

            ConfigCommand::Update {
                network,
                package_id,
                job_board_id,
                user_registry_id,
                employer_registry_id,
                clock_id,
            } => {
                let mut config = Config::load(path)?;
                if let Some(network) = network {
                    config.network = network;
                }
                if let Some(id) = package_id {
                    config.package_id = id;
                }
                if let Some(id) = job_board_id {
                    config.job_board_id = id;
                }
                if let Some(id) = user_registry_id {
                    config.user_registry_id = id;
                }
                if let Some(id) = employer_registry_id {
                    config.employer_registry_id = id;
                }
                if clock_id.is_some() {
                    config.clock_id = clock_id;
                }
                config.package_config()?;
                config.save(path)?;
                print_saved(&config, path, json, "Configuration updated");
                Ok(())
            }
        }
    }
}

fn print_saved(config: &Config, path: &Path, json: bool, headline: &str) {
    Output::new(json)
        .field("status", "saved")
        .field("path", &path.display().to_string())
        .field_value("config", config)
        .message(format!("{}\n\n{}", headline, render_config(config, path)))
        .print();
}

/// Human-readable configuration block
pub fn render_config(config: &Config, path: &Path) -> String {
    let mut report = Report::new();
    report
        .kv("Config file", path.display())
        .kv("Network", config.network)
        .kv("RPC URL", config.network.fullnode_url())
        .kv("Package", &config.package_id)
        .kv("JobBoard", &config.job_board_id)
        .kv("UserRegistry", &config.user_registry_id)
        .kv("EmployerRegistry", &config.employer_registry_id)
        .kv("Clock", config.clock_id.as_deref().unwrap_or("0x6"));
    report.finish()
}

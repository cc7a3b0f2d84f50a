//! CLI configuration management

use std::path::Path;

use minihub_sdk::{Address, Network, PackageConfig};
use serde::{Deserialize, Serialize};

use crate::CliError;

/// Default config file name, resolved against the working directory
pub const DEFAULT_CONFIG_FILE: &str = "minihub.config.json";

/// CLI configuration, stored as camelCase JSON
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Network whose public fullnode is queried
    pub network: Network,
    /// Published `minihub` package
    pub package_id: String,
    /// Shared job board object
    pub job_board_id: String,
    /// Shared user registry object
    pub user_registry_id: String,
    /// Shared employer registry object
    pub employer_registry_id: String,
    /// Clock object, `0x6` when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clock_id: Option<String>,
}

impl Config {
    /// Load config from `path`
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "config not readable");
                return Err(CliError::ConfigMissing(path.to_path_buf()));
            }
        };
        serde_json::from_str(&content)
            .map_err(|e| CliError::Config(format!("{}: {}", path.display(), e)))
    }

    /// Save config to `path`
    pub fn save(&self, path: &Path) -> Result<(), CliError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), "configuration saved");
        Ok(())
    }

    /// Parse the stored ids
    pub fn package_config(&self) -> Result<PackageConfig, CliError> {
        let config = PackageConfig::new(
            parse_id("packageId", &self.package_id)?,
            parse_id("jobBoardId", &self.job_board_id)?,
            parse_id("userRegistryId", &self.user_registry_id)?,
            parse_id("employerRegistryId", &self.employer_registry_id)?,
        );
        match &self.clock_id {
            Some(clock) => Ok(config.with_clock(parse_id("clockId", clock)?)),
            None => Ok(config),
        }
    }

    /// Endpoint to use: the override if given, else the network's fullnode
    pub fn rpc_url(&self, override_url: Option<&str>) -> String {
        override_url
            .map(str::to_string)
            .unwrap_or_else(|| self.network.fullnode_url().to_string())
    }
}

fn parse_id(field: &str, value: &str) -> Result<Address, CliError> {
    Address::from_hex(value)
        .map_err(|e| CliError::Config(format!("invalid {} '{}': {}", field, value, e)))
}

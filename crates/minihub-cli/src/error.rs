//! CLI error types

use std::path::PathBuf;

use minihub_sdk::SdkError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// No configuration file at the expected path
    #[error("Configuration not found at {}. Run `minihub-admin config init` first.", .0.display())]
    ConfigMissing(PathBuf),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid address format
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// SDK error
    #[error("SDK error: {0}")]
    Sdk(#[from] SdkError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

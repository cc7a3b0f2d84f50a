//! CLI integration tests for minihub-admin
//!
//! Tests command parsing, config handling and error reporting.

use std::path::Path;
use std::process::Command;

/// Helper to run the CLI with arguments
fn run_admin(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_minihub-admin"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn config_arg(dir: &Path) -> String {
    dir.join("minihub.config.json").display().to_string()
}

fn init_config(config: &str, network: &str) -> std::process::Output {
    run_admin(&[
        "--config",
        config,
        "config",
        "init",
        "--network",
        network,
        "--package",
        "0xabc",
        "--job-board",
        "0x1",
        "--user-registry",
        "0x2",
        "--employer-registry",
        "0x3",
    ])
}

// ==================== Help & Version Tests ====================

#[test]
fn test_cli_help() {
    let output = run_admin(&["--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("minihub-admin"));
    let commands = [
        "config",
        "stats",
        "jobs",
        "users",
        "employers",
        "events",
        "export",
        "monitor",
        "help-guide",
    ];
    for cmd in commands {
        assert!(stdout.contains(cmd), "help is missing {}", cmd);
    }
}

#[test]
fn test_cli_version() {
    let output = run_admin(&["--version"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("minihub-admin"));
}

#[test]
fn test_cli_jobs_help() {
    let output = run_admin(&["jobs", "--help"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("list"));
    assert!(stdout.contains("view"));
    assert!(stdout.contains("search"));
}

#[test]
fn test_cli_help_guide() {
    let output = run_admin(&["help-guide"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Getting started"));
}

// ==================== Config Tests ====================

#[test]
fn test_config_init_show_update() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());

    let output = init_config(&config, "devnet");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Configuration saved"));

    let saved: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(saved["network"], "devnet");
    assert_eq!(saved["jobBoardId"], "0x1");

    let output = run_admin(&["--config", &config, "config", "update", "--network", "mainnet"]);
    assert!(output.status.success());

    let output = run_admin(&["--config", &config, "--json", "config", "show"]);
    assert!(output.status.success());
    let shown: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(shown["config"]["network"], "mainnet");
    assert_eq!(shown["config"]["packageId"], "0xabc");
}

#[test]
fn test_config_init_invalid_network() {
    let dir = tempfile::tempdir().unwrap();
    let output = init_config(&config_arg(dir.path()), "moonnet");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("unknown network"));
}

// ==================== Error Reporting Tests ====================

#[test]
fn test_missing_config_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());

    for args in [vec!["stats"], vec!["jobs", "list"], vec!["export", "all"]] {
        let mut full = vec!["--config", config.as_str()];
        full.extend(args);
        let output = run_admin(&full);
        assert!(output.status.success());
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Error: Configuration not found"), "stderr: {}", stderr);
        assert!(stderr.contains("config init"));
    }
    assert!(!dir.path().join("exports").exists());
}

#[test]
fn test_missing_config_json_error() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_admin(&["--config", &config_arg(dir.path()), "--json", "stats"]);
    assert!(output.status.success());
    let body: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("Configuration not found"));
}

#[test]
fn test_unreachable_node_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());
    assert!(init_config(&config, "localnet").status.success());

    let output = run_admin(&["--config", &config, "--rpc-url", "http://127.0.0.1:1", "stats"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_invalid_job_id_reported() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_arg(dir.path());
    assert!(init_config(&config, "localnet").status.success());

    let output = run_admin(&["--config", &config, "jobs", "view", "not-an-id"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error: Invalid address"));
}

//! JSON exports

use std::path::{Path, PathBuf};

use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;
use serde_json::json;

use super::Context;
use crate::output::Output;
use crate::CliError;

#[derive(Debug, Subcommand)]
pub enum ExportCommand {
    /// Export every job
    Jobs {
        #[arg(long, short, default_value = "jobs.json")]
        output: PathBuf,
    },

    /// Export every user profile
    Users {
        #[arg(long, short, default_value = "users.json")]
        output: PathBuf,
    },

    /// Export every employer profile
    Employers {
        #[arg(long, short, default_value = "employers.json")]
        output: PathBuf,
    },

    /// Export everything plus a statistics report into one directory
    All {
        #[arg(long, default_value = "exports")]
        dir: PathBuf,
    },
}

impl ExportCommand {
    pub async fn execute(self, ctx: &Context) -> Result<(), CliError> {
        match self {
            ExportCommand::Jobs { output } => {
                let jobs = ctx.hub.get_all_jobs().await?;
                write_json(&output, &jobs).await?;
                print_exported(ctx.json, "jobs", jobs.len(), &output);
            }
            ExportCommand::Users { output } => {
                let users = ctx.hub.get_all_user_profiles().await?;
                write_json(&output, &users).await?;
                print_exported(ctx.json, "users", users.len(), &output);
            }
            ExportCommand::Employers { output } => {
                let employers = ctx.hub.get_all_employer_profiles().await?;
                write_json(&output, &employers).await?;
                print_exported(ctx.json, "employers", employers.len(), &output);
            }
            ExportCommand::All { dir } => {
                let files = export_all(ctx, &dir).await?;
                let listing: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
                Output::new(ctx.json)
                    .field("directory", &dir.display().to_string())
                    .field_value("files", &listing)
                    .message(format!(
                        "Exported {} files to {}\n - {}",
                        files.len(),
                        dir.display(),
                        listing.join("\n - ")
                    ))
                    .print();
            }
        }
        Ok(())
    }
}

/// Write jobs, users, employers, statistics and `report.json` into `dir`.
///
/// Returns the written paths, report last.
pub async fn export_all(ctx: &Context, dir: &Path) -> Result<Vec<PathBuf>, CliError> {
    let (jobs, users, employers, stats) = tokio::try_join!(
        ctx.hub.get_all_jobs(),
        ctx.hub.get_all_user_profiles(),
        ctx.hub.get_all_employer_profiles(),
        ctx.hub.get_statistics(),
    )?;

    tokio::fs::create_dir_all(dir).await?;
    let jobs_path = dir.join("jobs.json");
    let users_path = dir.join("users.json");
    let employers_path = dir.join("employers.json");
    let stats_path = dir.join("stats.json");
    let report_path = dir.join("report.json");

    write_json(&jobs_path, &jobs).await?;
    write_json(&users_path, &users).await?;
    write_json(&employers_path, &employers).await?;
    write_json(&stats_path, &stats).await?;

    let report = json!({
        "exportDate": Utc::now().to_rfc3339(),
        "network": ctx.config.network,
        "packageId": ctx.config.package_id,
        "statistics": stats,
        "files": {
            "jobs": jobs_path.display().to_string(),
            "users": users_path.display().to_string(),
            "employers": employers_path.display().to_string(),
            "stats": stats_path.display().to_string(),
        },
    });
    write_json(&report_path, &report).await?;

    tracing::info!(
        dir = %dir.display(),
        jobs = jobs.len(),
        users = users.len(),
        employers = employers.len(),
        "export complete"
    );
    Ok(vec![jobs_path, users_path, employers_path, stats_path, report_path])
}

async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), CliError> {
    let content = serde_json::to_string_pretty(value)?;
    tokio::fs::write(path, content).await?;
    Ok(())
}

fn print_exported(json: bool, what: &str, count: usize, path: &Path) {
    Output::new(json)
        .field("kind", what)
        .field_u64("count", count as u64)
        .field("path", &path.display().to_string())
        .message(format!("Exported {} {} to {}", count, what, path.display()))
        .print();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{context, seed_employers, seed_jobs, seed_users};
    use minihub_sdk::{EmployerProfile, Job, MockTransport, Statistics, UserProfile};
    use serde_json::Value;

    fn seeded() -> MockTransport {
        let mock = MockTransport::new();
        seed_jobs(
            &mock,
            &[
                ("0x10", "Rust dev", 3, None, 4_000_000_000_000),
                ("0x11", "Designer", 1, Some("0xc2"), 4_000_000_000_000),
            ],
        );
        seed_users(&mock);
        seed_employers(&mock);
        mock
    }

    fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> T {
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_export_all_writes_report() {
        let mock = seeded();
        let ctx = context(&mock);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");

        let files = export_all(&ctx, &out).await.unwrap();
        assert_eq!(files.len(), 5);
        assert_eq!(files[4], out.join("report.json"));

        let jobs: Vec<Job> = read_json(&out.join("jobs.json"));
        assert_eq!(jobs, ctx.hub.get_all_jobs().await.unwrap());
        assert_eq!(jobs.len(), 2);

        let users: Vec<UserProfile> = read_json(&out.join("users.json"));
        assert_eq!(users, ctx.hub.get_all_user_profiles().await.unwrap());

        let employers: Vec<EmployerProfile> = read_json(&out.join("employers.json"));
        assert_eq!(employers, ctx.hub.get_all_employer_profiles().await.unwrap());

        let stats: Statistics = read_json(&out.join("stats.json"));
        assert_eq!(stats.total_users, 2);
        assert_eq!(stats.total_employers, 1);

        let report: Value = read_json(&out.join("report.json"));
        assert_eq!(report["network"], "localnet");
        assert_eq!(report["packageId"], "0xabc");
        assert_eq!(report["statistics"]["totalJobs"], 2);
        assert_eq!(report["statistics"]["filledJobs"], 1);
        assert_eq!(report["statistics"]["totalApplications"], 4);
        assert!(report["exportDate"].as_str().is_some());
    }

    #[tokio::test]
    async fn test_export_report_lists_files_by_kind() {
        let mock = seeded();
        let ctx = context(&mock);
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("exports");

        export_all(&ctx, &out).await.unwrap();
        let report: Value = read_json(&out.join("report.json"));
        let files = report["files"].as_object().unwrap();
        assert_eq!(files.len(), 4);
        for (kind, name) in [
            ("jobs", "jobs.json"),
            ("users", "users.json"),
            ("employers", "employers.json"),
            ("stats", "stats.json"),
        ] {
            let expected = out.join(name).display().to_string();
            assert_eq!(files[kind], expected.as_str(), "files.{}", kind);
        }
    }

    #[tokio::test]
    async fn test_export_single_file() {
        let mock = seeded();
        let ctx = context(&mock);
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employers.json");

        ExportCommand::Employers {
            output: path.clone(),
        }
        .execute(&ctx)
        .await
        .unwrap();
        let employers: Value = read_json(&path);
        assert_eq!(employers[0]["companyName"], "Acme");
    }
}

//! Job commands

use clap::Subcommand;
use minihub_sdk::format::{
    format_salary, format_timestamp, now_ms, relative_time, time_until_deadline,
};
use minihub_sdk::query::search_jobs;
use minihub_sdk::{ApplicationProfile, Job, TimestampMs};

use super::{job_status, not_found, parse_address, Context};
use crate::output::{Output, Report, RULE};
use crate::CliError;

#[derive(Debug, Subcommand)]
pub enum JobsCommand {
    /// List jobs on the board
    List {
        /// Only jobs still open for applications
        #[arg(long)]
        active: bool,

        /// Only jobs with a hired candidate
        #[arg(long)]
        filled: bool,

        /// Maximum number of jobs to show
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },

    /// Show one job
    View {
        /// Job object id
        id: String,

        /// Also list the applications
        #[arg(long)]
        show_applications: bool,
    },

    /// Search titles and descriptions
    Search {
        /// Text to look for
        query: String,
    },
}

impl JobsCommand {
    pub async fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx).await?.print();
        Ok(())
    }

    /// Fetch and render without printing
    pub async fn run(self, ctx: &Context) -> Result<Output, CliError> {
        let now = now_ms();
        match self {
            JobsCommand::List {
                active,
                filled,
                limit,
            } => {
                let jobs = select_jobs(ctx.hub.get_all_jobs().await?, active, filled, limit, now);
                let heading = match (active, filled) {
                    (true, true) => "Active filled jobs",
                    (true, false) => "Active jobs",
                    (false, true) => "Filled jobs",
                    (false, false) => "All jobs",
                };
                Ok(Output::new(ctx.json)
                    .field_u64("count", jobs.len() as u64)
                    .field_value("jobs", &jobs)
                    .message(render_job_list(heading, &jobs, now)))
            }

            JobsCommand::View {
                id,
                show_applications,
            } => {
                let id = parse_address(&id)?;
                let job = match ctx.hub.get_job(&id).await? {
                    Some(job) => job,
                    None => return Ok(not_found(ctx.json, "Job", &id)),
                };
                let applications = if show_applications {
                    Some(ctx.hub.get_job_applications(&id).await?)
                } else {
                    None
                };

                let mut text = render_job(&job, now);
                if let Some(apps) = &applications {
                    text.push_str("\n\n");
                    text.push_str(&render_applications(apps, now));
                }

                let mut output = Output::new(ctx.json)
                    .field_value("found", true)
                    .field_value("job", &job)
                    .field("status", job_status(&job, now));
                if let Some(apps) = &applications {
                    output = output.field_value("applications", apps);
                }
                Ok(output.message(text))
            }

            JobsCommand::Search { query } => {
                let jobs = search_jobs(&ctx.hub.get_all_jobs().await?, &query);
                let heading = format!("Jobs matching \"{}\"", query);
                Ok(Output::new(ctx.json)
                    .field("query", &query)
                    .field_u64("count", jobs.len() as u64)
                    .field_value("jobs", &jobs)
                    .message(render_job_list(&heading, &jobs, now)))
            }
        }
    }
}

/// Apply the list filters in board order, then truncate to `limit`
pub fn select_jobs(
    jobs: Vec<Job>,
    active: bool,
    filled: bool,
    limit: usize,
    now: TimestampMs,
) -> Vec<Job> {
    jobs.into_iter()
        .filter(|j| !active || j.is_active_at(now))
        .filter(|j| !filled || j.is_filled())
        .take(limit)
        .collect()
}

fn render_job_list(heading: &str, jobs: &[Job], now: TimestampMs) -> String {
    let mut report = Report::new();
    report.line(format!("{} ({})", heading, jobs.len())).line(RULE);
    if jobs.is_empty() {
        report.line("No jobs found.");
    }
    for (i, job) in jobs.iter().enumerate() {
        let deadline = format!(
            "{} ({})",
            format_timestamp(job.deadline),
            time_until_deadline(job.deadline, now)
        );
        report
            .blank()
            .line(format!("{}. {}", i + 1, job.title))
            .item("ID", job.id)
            .item("Salary", format_salary(job.salary))
            .item("Applications", job.application_count)
            .item("Deadline", deadline)
            .item("Status", job_status(job, now));
    }
    report.finish()
}

fn render_job(job: &Job, now: TimestampMs) -> String {
    let mut report = Report::new();
    report
        .line(&job.title)
        .line(RULE)
        .kv("ID", job.id)
        .kv("Employer", job.employer)
        .kv("Employer profile", job.employer_profile_id)
        .kv("Salary", format_salary(job.salary))
        .kv("Applications", job.application_count)
        .kv("Deadline", format_timestamp(job.deadline))
        .kv("Time left", time_until_deadline(job.deadline, now))
        .kv("Status", job_status(job, now));
    if let Some(candidate) = job.hired_candidate {
        report.kv("Hired candidate", candidate);
    }
    report
        .blank()
        .line("Description:")
        .line(&job.description)
        .line(RULE);
    report.finish()
}

fn render_applications(apps: &[ApplicationProfile], now: TimestampMs) -> String {
    let mut report = Report::new();
    report.line(format!("Applications ({})", apps.len()));
    if apps.is_empty() {
        report.line("No applications yet.");
    }
    for (i, app) in apps.iter().enumerate() {
        report
            .blank()
            .line(format!("{}. {}", i + 1, app.candidate))
            .item("Profile", app.user_profile_id)
            .item("Submitted", relative_time(app.timestamp, now))
            .item("CV", &app.cv_url)
            .item("Message", &app.cover_message);
    }
    report.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{addr, context, json_context, rendered_json, seed_jobs};
    use minihub_sdk::MockTransport;

    const NOW: u64 = 2_000_000_000_000;
    const FUTURE: u64 = 4_000_000_000_000;
    const PAST: u64 = 1_000_000_000_000;

    fn job(id: &str, hired: bool, deadline: u64) -> Job {
        Job {
            id: addr(id),
            employer: addr("0xe"),
            employer_profile_id: addr("0x81"),
            title: format!("job {}", id),
            description: String::new(),
            salary: None,
            application_count: 0,
            hired_candidate: hired.then(|| addr("0xc1")),
            deadline,
        }
    }

    fn sample() -> Vec<Job> {
        vec![
            job("0x1", false, FUTURE),
            job("0x2", true, FUTURE),
            job("0x3", false, FUTURE),
            job("0x4", false, PAST),
            job("0x5", false, FUTURE),
        ]
    }

    fn seeded() -> MockTransport {
        let mock = MockTransport::new();
        seed_jobs(
            &mock,
            &[
                ("0x10", "Rust dev", 1, None, FUTURE),
                ("0x11", "Designer", 0, None, FUTURE),
                ("0x12", "Rust lead", 2, Some("0xc1"), FUTURE),
            ],
        );
        mock
    }

    #[test]
    fn test_select_active_with_limit() {
        let ids: Vec<_> = select_jobs(sample(), true, false, 2, NOW)
            .into_iter()
            .map(|j| j.id)
            .collect();
        assert_eq!(ids, vec![addr("0x1"), addr("0x3")]);
    }

    #[test]
    fn test_select_filled() {
        let jobs = select_jobs(sample(), false, true, 10, NOW);
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, addr("0x2"));
    }

    #[test]
    fn test_select_active_and_filled_chain() {
        assert!(select_jobs(sample(), true, true, 10, NOW).is_empty());
    }

    #[test]
    fn test_select_all() {
        assert_eq!(select_jobs(sample(), false, false, 10, NOW).len(), 5);
        assert!(select_jobs(sample(), false, false, 0, NOW).is_empty());
    }

    #[test]
    fn test_render_job_list_status() {
        let text = render_job_list("All jobs", &sample(), NOW);
        assert!(text.starts_with("All jobs (5)"));
        assert!(text.contains("Status: Filled"));
        assert!(text.contains("Status: Expired"));
        assert!(text.contains("Salary: Not specified"));
    }

    #[test]
    fn test_active_and_filled_flags_parse_together() {
        use clap::Parser;

        #[derive(Parser)]
        struct Harness {
            #[command(subcommand)]
            cmd: JobsCommand,
        }

        let parsed = Harness::try_parse_from(["jobs", "list", "--active", "--filled"]).unwrap();
        assert!(matches!(
            parsed.cmd,
            JobsCommand::List {
                active: true,
                filled: true,
                limit: 10
            }
        ));
    }

    #[tokio::test]
    async fn test_view_missing_job() {
        let mock = seeded();

        let text = JobsCommand::View {
            id: "0x404".to_string(),
            show_applications: false,
        }
        .run(&context(&mock))
        .await
        .unwrap()
        .render();
        assert!(text.contains("not found"));

        let output = JobsCommand::View {
            id: "0x404".to_string(),
            show_applications: false,
        }
        .run(&json_context(&mock))
        .await
        .unwrap();
        let json = rendered_json(&output);
        assert_eq!(json["found"], false);
        assert_eq!(json["id"], addr("0x404").to_hex());
    }

    #[tokio::test]
    async fn test_view_job() {
        let mock = seeded();
        let output = JobsCommand::View {
            id: "0x12".to_string(),
            show_applications: true,
        }
        .run(&json_context(&mock))
        .await
        .unwrap();
        let json = rendered_json(&output);
        assert_eq!(json["found"], true);
        assert_eq!(json["job"]["title"], "Rust lead");
        assert_eq!(json["status"], "Filled");
        assert_eq!(json["applications"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let mock = seeded();
        let ctx = json_context(&mock);

        let output = JobsCommand::List {
            active: true,
            filled: false,
            limit: 1,
        }
        .run(&ctx)
        .await
        .unwrap();
        let json = rendered_json(&output);
        assert_eq!(json["count"], 1);
        assert_eq!(json["jobs"][0]["title"], "Rust dev");

        let output = JobsCommand::Search {
            query: "rust".to_string(),
        }
        .run(&ctx)
        .await
        .unwrap();
        let json = rendered_json(&output);
        assert_eq!(json["count"], 2);
        assert_eq!(json["jobs"][1]["title"], "Rust lead");

        let text = JobsCommand::Search {
            query: "design".to_string(),
        }
        .run(&context(&mock))
        .await
        .unwrap()
        .render();
        assert!(text.starts_with("Jobs matching \"design\" (1)"));
        assert!(text.contains("1. Designer"));
    }
}

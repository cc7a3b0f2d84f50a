//! Recent contract events

use clap::Subcommand;
use minihub_sdk::format::{format_timestamp, now_ms, relative_time};
use minihub_sdk::TimestampMs;

use super::Context;
use crate::output::{Output, Report, RULE};
use crate::CliError;

const DEFAULT_LIMIT: usize = 10;

#[derive(Debug, Subcommand)]
pub enum EventsCommand {
    /// Recently posted jobs
    Jobs {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Recent applications
    Applications {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Recent hires
    Hires {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },

    /// Recently created user and employer profiles
    Profiles {
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: usize,
    },
}

impl EventsCommand {
    pub async fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx).await?.print();
        Ok(())
    }

    /// Fetch and render without printing
    pub async fn run(self, ctx: &Context) -> Result<Output, CliError> {
        let now = now_ms();
        let mut report = Report::new();
        let output = Output::new(ctx.json);

        let output = match self {
            EventsCommand::Jobs { limit } => {
                let events = ctx.hub.get_job_posted_events(limit).await?;
                report.line(format!("Job postings ({})", events.len())).line(RULE);
                for e in &events {
                    report
                        .blank()
                        .line(&e.data.title)
                        .item("Job", e.data.job_id)
                        .item("Employer", e.data.employer)
                        .item("Deadline", format_timestamp(e.data.deadline))
                        .item("When", when(e.timestamp_ms, now));
                }
                output.field_value("events", &events)
            }

            EventsCommand::Applications { limit } => {
                let events = ctx.hub.get_application_submitted_events(limit).await?;
                report.line(format!("Applications ({})", events.len())).line(RULE);
                for e in &events {
                    report
                        .blank()
                        .line(format!("{} applied", e.data.candidate))
                        .item("Job", e.data.job_id)
                        .item("Application", e.data.application_id)
                        .item("When", relative_time(e.data.timestamp, now));
                }
                output.field_value("events", &events)
            }

            EventsCommand::Hires { limit } => {
                let events = ctx.hub.get_candidate_hired_events(limit).await?;
                report.line(format!("Hires ({})", events.len())).line(RULE);
                for e in &events {
                    report
                        .blank()
                        .line(format!("{} hired", e.data.candidate))
                        .item("Job", e.data.job_id)
                        .item("Employer", e.data.employer)
                        .item("When", when(e.timestamp_ms, now));
                }
                output.field_value("events", &events)
            }

            EventsCommand::Profiles { limit } => {
                let (users, employers) = tokio::try_join!(
                    ctx.hub.get_user_profile_created_events(limit),
                    ctx.hub.get_employer_profile_created_events(limit),
                )?;
                report.line(format!("New users ({})", users.len())).line(RULE);
                for e in &users {
                    report
                        .item(&e.data.name, e.data.user_address)
                        .item("When", when(e.timestamp_ms, now));
                }
                report
                    .blank()
                    .line(format!("New employers ({})", employers.len()))
                    .line(RULE);
                for e in &employers {
                    report
                        .item(&e.data.company_name, e.data.employer_address)
                        .item("When", when(e.timestamp_ms, now));
                }
                output
                    .field_value("users", &users)
                    .field_value("employers", &employers)
            }
        };

        Ok(output.message(report.finish()))
    }
}

fn when(timestamp: Option<TimestampMs>, now: TimestampMs) -> String {
    timestamp
        .map(|ms| relative_time(ms, now))
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::{addr, context, json_context, rendered_json, ty};
    use minihub_sdk::MockTransport;
    use serde_json::json;

    #[test]
    fn test_when_unknown() {
        assert_eq!(when(None, 0), "unknown");
        assert_eq!(when(Some(0), 30_000), "just now");
    }

    #[tokio::test]
    async fn test_event_commands() {
        let mock = MockTransport::new();
        mock.push_event(
            &ty("JobPosted"),
            json!({
                "job_id": "0x10",
                "employer": "0xe",
                "title": "Rust dev",
                "has_salary": true,
                "deadline": "4000000000000",
            }),
            1_000,
        );
        mock.push_event(
            &ty("CandidateHired"),
            json!({ "job_id": "0x10", "employer": "0xe", "candidate": "0xc1" }),
            2_000,
        );
        let ctx = json_context(&mock);

        let json = rendered_json(&EventsCommand::Jobs { limit: 5 }.run(&ctx).await.unwrap());
        let events = json["events"].as_array().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0]["title"], "Rust dev");
        assert_eq!(events[0]["timestampMs"], 1_000);

        let json = rendered_json(&EventsCommand::Hires { limit: 5 }.run(&ctx).await.unwrap());
        assert_eq!(json["events"][0]["candidate"], addr("0xc1").to_hex());

        let json =
            rendered_json(&EventsCommand::Applications { limit: 5 }.run(&ctx).await.unwrap());
        assert_eq!(json["events"].as_array().unwrap().len(), 0);

        let text = EventsCommand::Profiles { limit: 5 }
            .run(&context(&mock))
            .await
            .unwrap()
            .render();
        assert!(text.starts_with("New users (0)"));
        assert!(text.contains("New employers (0)"));

        let text = EventsCommand::Hires { limit: 5 }
            .run(&context(&mock))
            .await
            .unwrap()
            .render();
        assert!(text.starts_with("Hires (1)"));
        assert!(text.contains(&format!("{} hired", addr("0xc1"))));
    }
}

//! Employer profile commands

use clap::Subcommand;
use minihub_sdk::format::format_timestamp;
use minihub_sdk::query::filter_employers_by_industry;
use minihub_sdk::EmployerProfile;

use super::{not_found, parse_address, Context};
use crate::output::{Output, Report, RULE};
use crate::CliError;

#[derive(Debug, Subcommand)]
pub enum EmployersCommand {
    /// List registered employers
    List {
        /// Maximum number of employers to show
        #[arg(long, default_value_t = 20)]
        limit: usize,
    },

    /// Show an employer by object id or owner address, with its jobs
    View {
        /// Profile id, or the address that owns it
        id: String,
    },

    /// Find employers by industry
    Search {
        /// Industry text, matched case-insensitively
        industry: String,
    },
}

impl EmployersCommand {
    pub async fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx).await?.print();
        Ok(())
    }

    /// Fetch and render without printing
    pub async fn run(self, ctx: &Context) -> Result<Output, CliError> {
        match self {
            EmployersCommand::List { limit } => {
                let all = ctx.hub.get_all_employer_profiles().await?;
                let total = all.len();
                let employers: Vec<EmployerProfile> = all.into_iter().take(limit).collect();
                let heading = format!("Employers ({} of {})", employers.len(), total);
                Ok(Output::new(ctx.json)
                    .field_u64("total", total as u64)
                    .field_value("employers", &employers)
                    .message(render_employer_list(&heading, &employers)))
            }

            EmployersCommand::View { id } => {
                let id = parse_address(&id)?;
                let profile = match ctx.hub.get_employer_profile(&id).await? {
                    Some(profile) => Some(profile),
                    None => ctx.hub.get_employer_profile_by_address(&id).await?,
                };
                let profile = match profile {
                    Some(profile) => profile,
                    None => return Ok(not_found(ctx.json, "Employer profile", &id)),
                };
                let jobs = ctx.hub.get_jobs_by_employer(&profile.employer_address).await?;

                let mut text = render_employer(&profile);
                text.push_str(&format!("\n\nPosted jobs ({})", jobs.len()));
                for job in &jobs {
                    text.push_str(&format!("\n - {} ({})", job.title, job.id));
                }
                Ok(Output::new(ctx.json)
                    .field_value("found", true)
                    .field_value("employer", &profile)
                    .field_value("jobs", &jobs)
                    .message(text))
            }

            EmployersCommand::Search { industry } => {
                let profiles = ctx.hub.get_all_employer_profiles().await?;
                let employers = filter_employers_by_industry(&profiles, &industry);
                let heading = format!("Employers in \"{}\" ({})", industry, employers.len());
                Ok(Output::new(ctx.json)
                    .field("industry", &industry)
                    .field_u64("count", employers.len() as u64)
                    .field_value("employers", &employers)
                    .message(render_employer_list(&heading, &employers)))
            }
        }
    }
}

fn render_employer_list(heading: &str, employers: &[EmployerProfile]) -> String {
    let mut report = Report::new();
    report.line(heading).line(RULE);
    if employers.is_empty() {
        report.line("No employers found.");
    }
    for (i, e) in employers.iter().enumerate() {
        report
            .blank()
            .line(format!("{}. {}", i + 1, e.company_name))
            .item("ID", e.id)
            .item("Industry", &e.industry)
            .item("Employees", e.employee_count)
            .item("Website", &e.website);
    }
    report.finish()
}

fn render_employer(e: &EmployerProfile) -> String {
    let mut report = Report::new();
    report
        .line(&e.company_name)
        .line(RULE)
        .kv("ID", e.id)
        .kv("Address", e.employer_address)
        .kv("Industry", &e.industry)
        .kv("Employees", e.employee_count)
        .kv("Founded", e.founded_year)
        .kv("Website", &e.website)
        .kv("Created", format_timestamp(e.created_at));
    if !e.description.is_empty() {
        report.blank().line("About:").line(&e.description);
    }
    report.line(RULE);
    report.finish()
}

//! Platform statistics

use minihub_sdk::Statistics;

use super::Context;
use crate::config::Config;
use crate::output::{Output, Report, RULE};
use crate::CliError;

pub async fn execute(ctx: &Context, detailed: bool) -> Result<(), CliError> {
    run(ctx, detailed).await?.print();
    Ok(())
}

/// Statistics output; `detailed` adds the deployment ids
pub async fn run(ctx: &Context, detailed: bool) -> Result<Output, CliError> {
    let stats = ctx.hub.get_statistics().await?;

    let mut text = render_statistics(&stats);
    if detailed {
        text.push_str("\n\n");
        text.push_str(&render_deployment(&ctx.config));
    }

    let mut output = Output::new(ctx.json).field_value("statistics", stats);
    if detailed {
        output = output
            .field("network", ctx.config.network.as_str())
            .field("packageId", &ctx.config.package_id)
            .field("jobBoardId", &ctx.config.job_board_id)
            .field("userRegistryId", &ctx.config.user_registry_id)
            .field("employerRegistryId", &ctx.config.employer_registry_id);
    }
    Ok(output.message(text))
}

/// Statistics block; rates only when there is at least one job
pub fn render_statistics(stats: &Statistics) -> String {
    let mut report = Report::new();
    report
        .line("MiniHub Platform Statistics")
        .line(RULE)
        .kv("Total jobs", stats.total_jobs)
        .kv("Active jobs", stats.active_jobs)
        .kv("Filled jobs", stats.filled_jobs)
        .kv("Total applications", stats.total_applications)
        .kv("Registered users", stats.total_users)
        .kv("Registered employers", stats.total_employers);

    if let (Some(fill), Some(active), Some(avg)) =
        (stats.fill_rate(), stats.active_rate(), stats.average_applications())
    {
        report
            .blank()
            .kv("Fill rate", format!("{:.1}%", fill))
            .kv("Active rate", format!("{:.1}%", active))
            .kv("Avg applications/job", format!("{:.1}", avg));
    }
    report.line(RULE);
    report.finish()
}

fn render_deployment(config: &Config) -> String {
    let mut report = Report::new();
    report
        .line("Deployment")
        .kv("Network", config.network)
        .kv("Package", &config.package_id)
        .kv("JobBoard", &config.job_board_id)
        .kv("UserRegistry", &config.user_registry_id)
        .kv("EmployerRegistry", &config.employer_registry_id);
    report.finish()
}

//! User profile commands

use clap::Subcommand;
use minihub_sdk::format::{format_timestamp, now_ms, relative_time};
use minihub_sdk::query::search_user_profiles_by_skills;
use minihub_sdk::{SkillMatch, TimestampMs, UserProfile};

use super::{not_found, parse_address, Context};
use crate::output::{Output, Report, RULE};
use crate::CliError;

/// Default page size for `users list`
pub const DEFAULT_USER_LIMIT: usize = 20;

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List registered users
    List {
        /// Maximum number of users to show
        #[arg(long, default_value_t = DEFAULT_USER_LIMIT)]
        limit: usize,
    },

    /// Show a profile by object id or owner address
    View {
        /// Profile id, or the address that owns it
        id: String,
    },

    /// Find users by skill
    Search {
        /// Skills to look for
        #[arg(required = true)]
        skills: Vec<String>,

        /// Require every skill instead of any
        #[arg(long)]
        all: bool,
    },
}

impl UsersCommand {
    pub async fn execute(self, ctx: &Context) -> Result<(), CliError> {
        self.run(ctx).await?.print();
        Ok(())
    }

    /// Fetch and render without printing
    pub async fn run(self, ctx: &Context) -> Result<Output, CliError> {
        let now = now_ms();
        match self {
            UsersCommand::List { limit } => {
                let all = ctx.hub.get_all_user_profiles().await?;
                let total = all.len();
                let users: Vec<UserProfile> = all.into_iter().take(limit).collect();
                let heading = format!("Users ({} of {})", users.len(), total);
                Ok(Output::new(ctx.json)
                    .field_u64("total", total as u64)
                    .field_value("users", &users)
                    .message(render_user_list(&heading, &users)))
            }

            UsersCommand::View { id } => {
                let id = parse_address(&id)?;
                let profile = match ctx.hub.get_user_profile(&id).await? {
                    Some(profile) => Some(profile),
                    None => ctx.hub.get_user_profile_by_address(&id).await?,
                };
                let profile = match profile {
                    Some(profile) => profile,
                    None => return Ok(not_found(ctx.json, "User profile", &id)),
                };
                Ok(Output::new(ctx.json)
                    .field_value("found", true)
                    .field_value("user", &profile)
                    .message(render_user(&profile, now)))
            }

            UsersCommand::Search { skills, all } => {
                let mode = if all { SkillMatch::All } else { SkillMatch::Any };
                let profiles = ctx.hub.get_all_user_profiles().await?;
                let users = search_user_profiles_by_skills(&profiles, &skills, mode);
                let heading = format!(
                    "Users with {} of: {} ({})",
                    if all { "all" } else { "any" },
                    skills.join(", "),
                    users.len()
                );
                Ok(Output::new(ctx.json)
                    .field_value("skills", &skills)
                    .field_u64("count", users.len() as u64)
                    .field_value("users", &users)
                    .message(render_user_list(&heading, &users)))
            }
        }
    }
}

fn render_user_list(heading: &str, users: &[UserProfile]) -> String {
    let mut report = Report::new();
    report.line(heading).line(RULE);
    if users.is_empty() {
        report.line("No users found.");
    }
    for (i, user) in users.iter().enumerate() {
        report
            .blank()
            .line(format!("{}. {}", i + 1, user.name))
            .item("ID", user.id)
            .item("Address", user.user_address)
            .item("Skills", skills_or_none(&user.skills))
            .item("Experience", format!("{} years", user.experience_years));
    }
    report.finish()
}

fn render_user(user: &UserProfile, now: TimestampMs) -> String {
    let mut report = Report::new();
    report
        .line(&user.name)
        .line(RULE)
        .kv("ID", user.id)
        .kv("Address", user.user_address)
        .kv("Skills", skills_or_none(&user.skills))
        .kv("Experience", format!("{} years", user.experience_years))
        .kv("Portfolio", or_dash(&user.portfolio_url))
        .kv("Avatar", or_dash(&user.avatar_url))
        .kv("Created", format_timestamp(user.created_at))
        .kv("Updated", relative_time(user.updated_at, now));
    if !user.bio.is_empty() {
        report.blank().line("Bio:").line(&user.bio);
    }
    report.line(RULE);
    report.finish()
}

fn skills_or_none(skills: &[String]) -> String {
    if skills.is_empty() {
        "none".to_string()
    } else {
        skills.join(", ")
    }
}

fn or_dash(s: &str) -> &str {
    if s.is_empty() {
        "-"
    } else {
        s
    }
}

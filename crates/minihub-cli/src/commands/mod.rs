//! CLI commands

pub mod config;
pub mod employers;
pub mod events;
pub mod export;
pub mod guide;
pub mod jobs;
pub mod monitor;
pub mod stats;
pub mod users;

use std::path::Path;

use minihub_sdk::{Address, Job, MiniHub, SuiClient, TimestampMs};

use crate::config::Config;
use crate::output::Output;
use crate::CliError;

/// Everything a read command needs
pub struct Context {
    /// Loaded configuration
    pub config: Config,
    /// Facade over the configured deployment
    pub hub: MiniHub,
    /// Print JSON instead of text
    pub json: bool,
}

impl Context {
    /// Load the config at `path` and connect to its network, or to `rpc_override`
    pub fn load(path: &Path, rpc_override: Option<&str>, json: bool) -> Result<Self, CliError> {
        let config = Config::load(path)?;
        let url = config.rpc_url(rpc_override);
        tracing::debug!(%url, network = %config.network, "connecting");
        Self::with_client(config, SuiClient::connect(&url), json)
    }

    /// Build a context over an existing client
    pub fn with_client(config: Config, client: SuiClient, json: bool) -> Result<Self, CliError> {
        let package = config.package_config()?;
        Ok(Self {
            config,
            hub: MiniHub::new(client, package),
            json,
        })
    }
}

/// Parse an object id or address argument
pub fn parse_address(s: &str) -> Result<Address, CliError> {
    Address::from_hex(s).map_err(|e| CliError::InvalidAddress(format!("{}: {}", s, e)))
}

/// Output for a lookup that matched nothing
pub fn not_found(json: bool, what: &str, id: &Address) -> Output {
    Output::new(json)
        .field_value("found", false)
        .field("id", &id.to_hex())
        .message(format!("{} {} not found", what, id))
}

/// `Active`, `Filled` or `Expired`
pub fn job_status(job: &Job, now: TimestampMs) -> &'static str {
    if job.is_filled() {
        "Filled"
    } else if job.is_deadline_passed_at(now) {
        "Expired"
    } else {
        "Active"
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use minihub_sdk::contract::struct_type;
    use minihub_sdk::{Address, MockTransport, Network, SuiClient};
    use serde_json::{json, Value};

    use super::Context;
    use crate::config::Config;

    pub fn addr(s: &str) -> Address {
        Address::from_hex(s).unwrap()
    }

    pub fn config() -> Config {
        Config {
            network: Network::Localnet,
            package_id: "0xabc".to_string(),
            job_board_id: "0xb0a4d".to_string(),
            user_registry_id: "0x5e4".to_string(),
            employer_registry_id: "0xe4".to_string(),
            clock_id: None,
        }
    }

    pub fn ty(name: &str) -> String {
        struct_type(&addr("0xabc"), name)
    }

    pub fn context(mock: &MockTransport) -> Context {
        Context::with_client(config(), SuiClient::with_transport(mock.clone()), false).unwrap()
    }

    pub fn json_context(mock: &MockTransport) -> Context {
        Context::with_client(config(), SuiClient::with_transport(mock.clone()), true).unwrap()
    }

    /// Parse `Output::render()` of a JSON-mode command
    pub fn rendered_json(output: &crate::output::Output) -> Value {
        serde_json::from_str(&output.render()).unwrap()
    }

    pub fn job_fields(title: &str, applications: u64, hired: Value, deadline: u64) -> Value {
        json!({
            "employer": "0xe",
            "employer_profile_id": "0x81",
            "title": title,
            "description": format!("{} role", title),
            "salary": { "vec": ["5000"] },
            "application_count": applications.to_string(),
            "hired_candidate": hired,
            "deadline": deadline.to_string(),
        })
    }

    /// Board with `jobs`, each `(id, title, applications, hired, deadline)`
    pub fn seed_jobs(mock: &MockTransport, jobs: &[(&str, &str, u64, Option<&str>, u64)]) {
        let ids: Vec<String> = jobs.iter().map(|j| addr(j.0).to_hex()).collect();
        mock.insert_object(
            addr("0xb0a4d"),
            &ty("JobBoard"),
            json!({ "jobs": ids, "job_count": jobs.len().to_string() }),
        );
        for (id, title, applications, hired, deadline) in jobs {
            let hired = match hired {
                Some(h) => json!({ "vec": [h] }),
                None => json!({ "vec": [] }),
            };
            let fields = job_fields(title, *applications, hired, *deadline);
            mock.insert_object(addr(id), &ty("Job"), fields);
        }
    }

    pub fn seed_users(mock: &MockTransport) {
        let profiles = [
            ("0x71", "0xc1", "Ada", vec!["Rust", "Move"]),
            ("0x72", "0xc2", "Linus", vec!["C"]),
        ];
        let ids: Vec<String> = profiles.iter().map(|p| addr(p.0).to_hex()).collect();
        mock.insert_object(
            addr("0x5e4"),
            &ty("UserRegistry"),
            json!({ "user_profiles": ids, "user_count": "2" }),
        );
        for (id, owner, name, skills) in profiles {
            mock.insert_object(
                addr(id),
                &ty("UserProfile"),
                json!({
                    "user_address": owner,
                    "name": name,
                    "bio": "",
                    "avatar_url": "",
                    "skills": skills,
                    "experience_years": "3",
                    "portfolio_url": "",
                    "created_at": "1",
                    "updated_at": "2",
                }),
            );
        }
    }

    pub fn seed_employers(mock: &MockTransport) {
        mock.insert_object(
            addr("0xe4"),
            &ty("EmployerRegistry"),
            json!({ "employer_profiles": [addr("0x81").to_hex()], "employer_count": "1" }),
        );
        mock.insert_object(
            addr("0x81"),
            &ty("EmployerProfile"),
            json!({
                "employer_address": "0xe",
                "company_name": "Acme",
                "description": "Widgets",
                "logo_url": "",
                "website": "https://acme.test",
                "industry": "Manufacturing",
                "employee_count": "50",
                "founded_year": "1999",
                "created_at": "1",
                "updated_at": "2",
            }),
        );
    }
}

//! # minihub-sdk
//!
//! Rust SDK for the MiniHub job board `minihub` Move package.
//!
//! ## Features
//!
//! - **SuiClient**: JSON-RPC client for fullnodes
//! - **MiniHub**: Read facade over jobs, profiles, registries, applications and events
//! - **MoveCallBuilder**: Fluent API for building unsigned entry calls
//! - **query**: Search, filter and sort helpers over fetched records
//! - **format** / **validation**: Display and input checks
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minihub_sdk::{Address, MiniHub, Network, PackageConfig, SuiClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = SuiClient::connect(Network::Testnet.fullnode_url());
//!     let config = PackageConfig::new(
//!         Address::from_hex("0x1a2b")?,
//!         Address::from_hex("0x3c4d")?,
//!         Address::from_hex("0x5e6f")?,
//!         Address::from_hex("0x7a8b")?,
//!     );
//!     let hub = MiniHub::new(client, config);
//!
//!     let stats = hub.get_statistics().await?;
//!     println!("{} jobs, {} active", stats.total_jobs, stats.active_jobs);
//!
//!     for job in hub.get_active_jobs().await? {
//!         println!("{}: {}", job.title, minihub_sdk::format::format_salary(job.salary));
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Building a transaction
//!
//! ```rust,no_run
//! use minihub_sdk::{Address, MiniHub, PackageConfig, PostJobParams, SuiClient, MockTransport};
//! use minihub_sdk::DEFAULT_GAS_BUDGET;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let id = Address::from_hex("0x1")?;
//!     let hub = MiniHub::new(
//!         SuiClient::with_transport(MockTransport::new()),
//!         PackageConfig::new(id, id, id, id),
//!     );
//!
//!     let call = hub.post_job_transaction(PostJobParams {
//!         employer_profile_id: Address::from_hex("0x2")?,
//!         title: "Rust engineer".into(),
//!         description: "Indexer and tooling".into(),
//!         salary: Some(12_500),
//!         deadline: 1_900_000_000_000,
//!     })?;
//!
//!     let sender = Address::from_hex("0x5")?;
//!     let unsigned = hub.client().move_call(&call, &sender, None, DEFAULT_GAS_BUDGET).await?;
//!     println!("tx bytes: {}", unsigned.tx_bytes);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod client;
pub mod contract;
pub mod decode;
mod error;
pub mod format;
mod minihub;
pub mod models;
pub mod query;
mod transport;
mod tx_builder;
pub mod types;
pub mod validation;

// Re-export main types
pub use client::{OwnedObjectsPage, SuiClient};
pub use error::SdkError;
pub use minihub::{EventQuery, MiniHub, PackageConfig, DEFAULT_EVENT_LIMIT};
pub use models::{
    ApplicationProfile, EmployerCap, EmployerProfile, EmployerRegistry, Job, JobBoard, Statistics,
    TypedEvent, UserProfile, UserRegistry,
};
pub use query::SkillMatch;
pub use transport::{MockTransport, MAX_MULTI_GET_BATCH};
pub use types::Network;

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use tx_builder::{
    ApplyToJobParams, CallArg, EmployerProfileParams, HireCandidateParams, MoveCall,
    MoveCallBuilder, PostJobParams, PureArg, UserProfileParams, DEFAULT_GAS_BUDGET,
};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use minihub_primitives::{Address, AddressError, ObjectId, TimestampMs};

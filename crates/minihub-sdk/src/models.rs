//! Typed records mirroring the on-chain `minihub` objects and events

use minihub_primitives::{Address, ObjectId, TimestampMs};
use serde::{Deserialize, Serialize};

use crate::contract::{events, structs};
use crate::decode::{MoveFields, MoveStruct};
use crate::SdkError;

/// Job posting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Object id
    pub id: ObjectId,
    /// Address that posted the job
    pub employer: Address,
    /// Employer profile the job was posted under
    pub employer_profile_id: ObjectId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Salary in SUI, if disclosed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary: Option<u64>,
    /// Number of applications received
    pub application_count: u64,
    /// Hired candidate once the position is filled
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hired_candidate: Option<Address>,
    /// Application deadline
    pub deadline: TimestampMs,
}

impl Job {
    /// `now` is strictly after the deadline
    pub fn is_deadline_passed_at(&self, now: TimestampMs) -> bool {
        now > self.deadline
    }

    /// A candidate has been hired
    pub fn is_filled(&self) -> bool {
        self.hired_candidate.is_some()
    }

    /// Open for applications at `now`: deadline not passed and not filled
    pub fn is_active_at(&self, now: TimestampMs) -> bool {
        !self.is_deadline_passed_at(now) && !self.is_filled()
    }
}

impl MoveStruct for Job {
    const STRUCT_NAME: &'static str = structs::JOB;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            id: f.id("id")?,
            employer: f.address("employer")?,
            employer_profile_id: f.id("employer_profile_id")?,
            title: f.string("title")?,
            description: f.string("description")?,
            salary: f.opt_u64("salary")?,
            application_count: f.u64("application_count")?,
            hired_candidate: f.opt_address("hired_candidate")?,
            deadline: f.u64("deadline")?,
        })
    }
}

/// Application submitted to a job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationProfile {
    /// Application id
    pub id: ObjectId,
    /// Applicant address
    pub candidate: Address,
    /// Applicant's user profile
    pub user_profile_id: ObjectId,
    /// Job applied to
    pub job_id: ObjectId,
    /// Cover letter
    pub cover_message: String,
    /// Submission time
    pub timestamp: TimestampMs,
    /// Link to the CV
    pub cv_url: String,
}

impl MoveStruct for ApplicationProfile {
    const STRUCT_NAME: &'static str = structs::APPLICATION;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            id: f.id("id")?,
            candidate: f.address("candidate")?,
            user_profile_id: f.id("user_profile_id")?,
            job_id: f.id("job_id")?,
            cover_message: f.string("cover_message")?,
            timestamp: f.u64("timestamp")?,
            cv_url: f.string("cv_url")?,
        })
    }
}

/// Candidate profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Object id
    pub id: ObjectId,
    /// Owner
    pub user_address: Address,
    /// Display name
    pub name: String,
    /// Short biography
    pub bio: String,
    /// Avatar image
    pub avatar_url: String,
    /// Skills, free text
    pub skills: Vec<String>,
    /// Years of professional experience
    pub experience_years: u64,
    /// Portfolio link
    pub portfolio_url: String,
    /// Creation time
    pub created_at: TimestampMs,
    /// Last update time
    pub updated_at: TimestampMs,
}

impl MoveStruct for UserProfile {
    const STRUCT_NAME: &'static str = structs::USER_PROFILE;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            id: f.id("id")?,
            user_address: f.address("user_address")?,
            name: f.string("name")?,
            bio: f.string("bio")?,
            avatar_url: f.string("avatar_url")?,
            skills: f.strings("skills")?,
            experience_years: f.u64("experience_years")?,
            portfolio_url: f.string("portfolio_url")?,
            created_at: f.u64("created_at")?,
            updated_at: f.u64("updated_at")?,
        })
    }
}

/// Company profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfile {
    /// Object id
    pub id: ObjectId,
    /// Owner
    pub employer_address: Address,
    /// Company name
    pub company_name: String,
    /// Company description
    pub description: String,
    /// Logo image
    pub logo_url: String,
    /// Website
    pub website: String,
    /// Industry, free text
    pub industry: String,
    /// Head count
    pub employee_count: u64,
    /// Year the company was founded
    pub founded_year: u64,
    /// Creation time
    pub created_at: TimestampMs,
    /// Last update time
    pub updated_at: TimestampMs,
}

impl MoveStruct for EmployerProfile {
    const STRUCT_NAME: &'static str = structs::EMPLOYER_PROFILE;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            id: f.id("id")?,
            employer_address: f.address("employer_address")?,
            company_name: f.string("company_name")?,
            description: f.string("description")?,
            logo_url: f.string("logo_url")?,
            website: f.string("website")?,
            industry: f.string("industry")?,
            employee_count: f.u64("employee_count")?,
            founded_year: f.u64("founded_year")?,
            created_at: f.u64("created_at")?,
            updated_at: f.u64("updated_at")?,
        })
    }
}

/// Registry of all job postings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobBoard {
    /// Object id
    pub id: ObjectId,
    /// Number of jobs posted
    pub job_count: u64,
    /// Job ids in posting order
    pub job_ids: Vec<ObjectId>,
}

impl MoveStruct for JobBoard {
    const STRUCT_NAME: &'static str = structs::JOB_BOARD;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            id: f.id("id")?,
            job_count: f.u64("job_count")?,
            job_ids: f.ids("jobs")?,
        })
    }
}

/// Registry of user profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistry {
    /// Object id
    pub id: ObjectId,
    /// Profile ids in registration order
    pub user_profiles: Vec<ObjectId>,
    /// Number of registered users
    pub user_count: u64,
}

impl MoveStruct for UserRegistry {
    const STRUCT_NAME: &'static str = structs::USER_REGISTRY;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            id: f.id("id")?,
            user_profiles: f.ids("user_profiles")?,
            user_count: f.u64("user_count")?,
        })
    }
}

/// Registry of employer profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerRegistry {
    /// Object id
    pub id: ObjectId,
    /// Profile ids in registration order
    pub employer_profiles: Vec<ObjectId>,
    /// Number of registered employers
    pub employer_count: u64,
}

impl MoveStruct for EmployerRegistry {
    const STRUCT_NAME: &'static str = structs::EMPLOYER_REGISTRY;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            id: f.id("id")?,
            employer_profiles: f.ids("employer_profiles")?,
            employer_count: f.u64("employer_count")?,
        })
    }
}

/// Capability allowing its owner to hire for one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerCap {
    /// Object id
    pub id: ObjectId,
    /// Job this capability controls
    pub job_id: ObjectId,
}

impl MoveStruct for EmployerCap {
    const STRUCT_NAME: &'static str = structs::EMPLOYER_CAP;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            id: f.id("id")?,
            job_id: f.id("job_id")?,
        })
    }
}

/// Aggregate counters over the whole board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    /// Jobs in the registry
    pub total_jobs: u64,
    /// Jobs open for applications
    pub active_jobs: u64,
    /// Applications across all jobs
    pub total_applications: u64,
    /// Registered users
    pub total_users: u64,
    /// Registered employers
    pub total_employers: u64,
    /// Jobs with a hired candidate
    pub filled_jobs: u64,
}

impl Statistics {
    /// Count over fetched records; `now` decides which jobs are active
    pub fn from_records(
        jobs: &[Job],
        total_users: u64,
        total_employers: u64,
        now: TimestampMs,
    ) -> Self {
        Self {
            total_jobs: jobs.len() as u64,
            active_jobs: jobs.iter().filter(|j| j.is_active_at(now)).count() as u64,
            total_applications: jobs.iter().map(|j| j.application_count).sum(),
            total_users,
            total_employers,
            filled_jobs: jobs.iter().filter(|j| j.is_filled()).count() as u64,
        }
    }

    /// Share of jobs filled, in percent. `None` without jobs.
    pub fn fill_rate(&self) -> Option<f64> {
        self.ratio(self.filled_jobs).map(|r| r * 100.0)
    }

    /// Share of jobs still active, in percent. `None` without jobs.
    pub fn active_rate(&self) -> Option<f64> {
        self.ratio(self.active_jobs).map(|r| r * 100.0)
    }

    /// Mean applications per job. `None` without jobs.
    pub fn average_applications(&self) -> Option<f64> {
        self.ratio(self.total_applications)
    }

    fn ratio(&self, numerator: u64) -> Option<f64> {
        (self.total_jobs > 0).then(|| numerator as f64 / self.total_jobs as f64)
    }
}

/// Decoded event payload with its log metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypedEvent<T> {
    /// Transaction that emitted the event
    pub tx_digest: String,
    /// Emission time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp_ms: Option<TimestampMs>,
    /// Payload
    #[serde(flatten)]
    pub data: T,
}

/// `JobPosted` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPostedEvent {
    /// New job
    pub job_id: ObjectId,
    /// Poster
    pub employer: Address,
    /// Title at posting time
    pub title: String,
    /// Whether a salary was disclosed
    pub has_salary: bool,
    /// Deadline
    pub deadline: TimestampMs,
}

impl MoveStruct for JobPostedEvent {
    const STRUCT_NAME: &'static str = events::JOB_POSTED;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            job_id: f.id("job_id")?,
            employer: f.address("employer")?,
            title: f.string("title")?,
            has_salary: f.bool("has_salary")?,
            deadline: f.u64("deadline")?,
        })
    }
}

/// `ApplicationSubmitted` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSubmittedEvent {
    /// Job applied to
    pub job_id: ObjectId,
    /// Applicant
    pub candidate: Address,
    /// Submission time
    pub timestamp: TimestampMs,
    /// New application
    pub application_id: ObjectId,
}

impl MoveStruct for ApplicationSubmittedEvent {
    const STRUCT_NAME: &'static str = events::APPLICATION_SUBMITTED;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            job_id: f.id("job_id")?,
            candidate: f.address("candidate")?,
            timestamp: f.u64("timestamp")?,
            application_id: f.id("application_id")?,
        })
    }
}

/// `CandidateHired` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateHiredEvent {
    /// Filled job
    pub job_id: ObjectId,
    /// Hiring employer
    pub employer: Address,
    /// Hired candidate
    pub candidate: Address,
}

impl MoveStruct for CandidateHiredEvent {
    const STRUCT_NAME: &'static str = events::CANDIDATE_HIRED;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            job_id: f.id("job_id")?,
            employer: f.address("employer")?,
            candidate: f.address("candidate")?,
        })
    }
}

/// `UserProfileCreated` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileCreatedEvent {
    /// New profile
    pub user_profile_id: ObjectId,
    /// Owner
    pub user_address: Address,
    /// Display name
    pub name: String,
}

impl MoveStruct for UserProfileCreatedEvent {
    const STRUCT_NAME: &'static str = events::USER_PROFILE_CREATED;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            user_profile_id: f.id("user_profile_id")?,
            user_address: f.address("user_address")?,
            name: f.string("name")?,
        })
    }
}

/// `EmployerProfileCreated` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfileCreatedEvent {
    /// New profile
    pub employer_profile_id: ObjectId,
    /// Owner
    pub employer_address: Address,
    /// Company name
    pub company_name: String,
}

impl MoveStruct for EmployerProfileCreatedEvent {
    const STRUCT_NAME: &'static str = events::EMPLOYER_PROFILE_CREATED;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            employer_profile_id: f.id("employer_profile_id")?,
            employer_address: f.address("employer_address")?,
            company_name: f.string("company_name")?,
        })
    }
}

/// `ProfileUpdated` event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdatedEvent {
    /// Edited profile
    pub profile_id: ObjectId,
    /// `user` or `employer`
    pub profile_type: String,
    /// Edit time
    pub updated_at: TimestampMs,
}

impl MoveStruct for ProfileUpdatedEvent {
    const STRUCT_NAME: &'static str = events::PROFILE_UPDATED;

    fn from_fields(f: &MoveFields<'_>) -> Result<Self, SdkError> {
        Ok(Self {
            profile_id: f.id("profile_id")?,
            profile_type: f.string("profile_type")?,
            updated_at: f.u64("updated_at")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::decode_struct;
    use serde_json::json;

    fn job(deadline: u64, hired: Option<&str>) -> Job {
        Job {
            id: Address::from_hex("0x10").unwrap(),
            employer: Address::from_hex("0xe").unwrap(),
            employer_profile_id: Address::from_hex("0xe1").unwrap(),
            title: "Backend Engineer".to_string(),
            description: "Rust services".to_string(),
            salary: None,
            application_count: 0,
            hired_candidate: hired.map(|h| Address::from_hex(h).unwrap()),
            deadline,
        }
    }

    #[test]
    fn test_job_active_truth_table() {
        assert!(job(1_000, None).is_active_at(1_000));
        assert!(!job(1_000, None).is_active_at(1_001));
        assert!(!job(1_000, Some("0xc")).is_active_at(999));
        assert!(!job(1_000, Some("0xc")).is_active_at(2_000));
    }

    #[test]
    fn test_decode_job() {
        let fields = json!({
            "id": { "id": "0x10" },
            "employer": "0xe",
            "employer_profile_id": "0xe1",
            "title": "Backend Engineer",
            "description": "Rust services",
            "salary": "5000",
            "application_count": "3",
            "hired_candidate": null,
            "deadline": "1700000000000",
        });
        let job: Job = decode_struct(&fields).unwrap();
        assert_eq!(job.salary, Some(5000));
        assert_eq!(job.application_count, 3);
        assert_eq!(job.hired_candidate, None);
        assert_eq!(job.deadline, 1_700_000_000_000);
    }

    #[test]
    fn test_decode_job_missing_title() {
        let fields = json!({ "id": { "id": "0x10" }, "employer": "0xe" });
        assert!(decode_struct::<Job>(&fields).is_err());
    }

    #[test]
    fn test_job_json_is_camel_case() {
        let mut j = job(5, None);
        j.salary = Some(10);
        let json = serde_json::to_value(&j).unwrap();
        assert!(json.get("employerProfileId").is_some());
        assert!(json.get("applicationCount").is_some());
        assert!(json.get("hiredCandidate").is_none());
        assert_eq!(json["salary"], 10);
    }

    #[test]
    fn test_statistics_rates() {
        let stats = Statistics {
            total_jobs: 10,
            active_jobs: 6,
            total_applications: 25,
            total_users: 3,
            total_employers: 2,
            filled_jobs: 4,
        };
        assert_eq!(format!("{:.1}", stats.fill_rate().unwrap()), "40.0");
        assert_eq!(format!("{:.1}", stats.active_rate().unwrap()), "60.0");
        assert_eq!(format!("{:.1}", stats.average_applications().unwrap()), "2.5");
        assert_eq!(Statistics::default().fill_rate(), None);
    }

    #[test]
    fn test_statistics_from_records() {
        let mut filled = job(5_000, Some("0xc"));
        filled.application_count = 4;
        let mut open = job(5_000, None);
        open.application_count = 1;
        let expired = job(10, None);

        let stats = Statistics::from_records(&[filled, open, expired], 7, 2, 1_000);
        assert_eq!(stats.total_jobs, 3);
        assert_eq!(stats.active_jobs, 1);
        assert_eq!(stats.filled_jobs, 1);
        assert_eq!(stats.total_applications, 5);
        assert_eq!(stats.total_users, 7);
    }

    #[test]
    fn test_decode_events() {
        let posted: JobPostedEvent = decode_struct(&json!({
            "job_id": "0x10", "employer": "0xe", "title": "T", "has_salary": true, "deadline": "99"
        }))
        .unwrap();
        assert!(posted.has_salary);
        assert_eq!(posted.deadline, 99);

        let updated: ProfileUpdatedEvent = decode_struct(&json!({
            "profile_id": "0x3", "profile_type": "user", "updated_at": "5"
        }))
        .unwrap();
        assert_eq!(updated.profile_type, "user");
    }
}

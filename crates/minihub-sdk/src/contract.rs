//! Constants describing the on-chain `minihub` Move module

use std::fmt;

use minihub_primitives::Address;

/// Module name inside the published package
pub const MODULE_NAME: &str = "minihub";

/// Shared clock object present on every network
pub const DEFAULT_CLOCK_ID: Address = Address::from_bytes({
    let mut bytes = [0u8; 32];
    bytes[31] = 0x6;
    bytes
});

/// Entry function names
pub mod entry {
    /// Post a job on the job board
    pub const POST_JOB: &str = "post_job";
    /// Apply to a job
    pub const APPLY_TO_JOB: &str = "apply_to_job";
    /// Hire one of the applicants
    pub const HIRE_CANDIDATE: &str = "hire_candidate";
    /// Register a user profile
    pub const CREATE_USER_PROFILE: &str = "create_user_profile";
    /// Register an employer profile
    pub const CREATE_EMPLOYER_PROFILE: &str = "create_employer_profile";
    /// Edit a user profile
    pub const UPDATE_USER_PROFILE: &str = "update_user_profile";
    /// Edit an employer profile
    pub const UPDATE_EMPLOYER_PROFILE: &str = "update_employer_profile";
}

/// Struct names of the stored objects
pub mod structs {
    /// Registry of all jobs
    pub const JOB_BOARD: &str = "JobBoard";
    /// Job posting
    pub const JOB: &str = "Job";
    /// Application stored under a job
    pub const APPLICATION: &str = "ApplicationProfile";
    /// Candidate profile
    pub const USER_PROFILE: &str = "UserProfile";
    /// Company profile
    pub const EMPLOYER_PROFILE: &str = "EmployerProfile";
    /// Registry of user profiles
    pub const USER_REGISTRY: &str = "UserRegistry";
    /// Registry of employer profiles
    pub const EMPLOYER_REGISTRY: &str = "EmployerRegistry";
    /// Hiring capability for one job
    pub const EMPLOYER_CAP: &str = "EmployerCap";
}

/// Event struct names
pub mod events {
    /// A job was posted
    pub const JOB_POSTED: &str = "JobPosted";
    /// An application was submitted
    pub const APPLICATION_SUBMITTED: &str = "ApplicationSubmitted";
    /// A candidate was hired
    pub const CANDIDATE_HIRED: &str = "CandidateHired";
    /// A user profile was created
    pub const USER_PROFILE_CREATED: &str = "UserProfileCreated";
    /// An employer profile was created
    pub const EMPLOYER_PROFILE_CREATED: &str = "EmployerProfileCreated";
    /// A profile was edited
    pub const PROFILE_UPDATED: &str = "ProfileUpdated";
}

/// Fully qualified Move type `<package>::minihub::<name>`
pub fn struct_type(package: &Address, name: &str) -> String {
    format!("{}::{}::{}", package.to_hex(), MODULE_NAME, name)
}

/// Whether `move_type` names `minihub::<name>`, ignoring the package address
/// (it changes on upgrades) and any type parameters.
pub fn is_struct_type(move_type: &str, name: &str) -> bool {
    let base = move_type.split('<').next().unwrap_or(move_type);
    let mut parts = base.rsplitn(3, "::");
    let struct_name = parts.next();
    let module = parts.next();
    struct_name == Some(name) && module == Some(MODULE_NAME)
}

/// Abort codes raised by the Move module
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u64)]
pub enum ContractErrorCode {
    /// Caller does not hold the required capability
    NotAuthorized = 1,
    /// The job already has a hired candidate
    JobAlreadyFilled = 2,
    /// Application index or candidate mismatch
    InvalidApplication = 3,
    /// The job deadline has passed
    DeadlinePassed = 4,
}

impl ContractErrorCode {
    /// Map an abort code to a known error
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::NotAuthorized),
            2 => Some(Self::JobAlreadyFilled),
            3 => Some(Self::InvalidApplication),
            4 => Some(Self::DeadlinePassed),
            _ => None,
        }
    }

    /// Numeric abort code
    pub fn code(&self) -> u64 {
        *self as u64
    }

    /// Human-readable message
    pub fn message(&self) -> &'static str {
        match self {
            Self::NotAuthorized => "You are not authorized to perform this action",
            Self::JobAlreadyFilled => "This position has already been filled",
            Self::InvalidApplication => "Invalid application",
            Self::DeadlinePassed => "The application deadline has passed",
        }
    }

    /// Extract a minihub abort code from an execution error message such as
    /// `MoveAbort(MoveLocation { module: ModuleId { .., name: Identifier("minihub") }, .. }, 2)
    /// in command 0`.
    pub fn from_abort_message(message: &str) -> Option<Self> {
        if !message.contains("MoveAbort") || !message.contains(MODULE_NAME) {
            return None;
        }
        let tail = message.rsplit_once("},")?.1;
        let digits: String = tail
            .trim_start()
            .chars()
            .take_while(char::is_ascii_digit)
            .collect();
        digits.parse().ok().and_then(Self::from_code)
    }
}

impl fmt::Display for ContractErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code {})", self.message(), self.code())
    }
}

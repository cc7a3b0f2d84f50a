//! Move call builder
//!
//! Builds unsigned `minihub` entry calls. Signing and submission happen
//! outside this crate; [`MoveCall::to_rpc_params`] produces the parameter
//! list for `unsafe_moveCall`, which returns the unsigned transaction bytes.

use minihub_primitives::{Address, ObjectId, TimestampMs};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::contract::MODULE_NAME;
use crate::SdkError;

/// Gas budget used when the caller does not pick one (0.01 SUI)
pub const DEFAULT_GAS_BUDGET: u64 = 10_000_000;

/// Pure (non-object) argument
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PureArg {
    /// `u64`
    U64(u64),
    /// `address`
    Address(Address),
    /// `String`
    String(String),
    /// `vector<String>`
    VecString(Vec<String>),
    /// `Option<u64>`
    OptionU64(Option<u64>),
}

impl PureArg {
    /// JSON form accepted by `unsafe_moveCall`
    pub fn to_json(&self) -> Value {
        match self {
            // u64 travels as a decimal string to survive JSON number precision
            PureArg::U64(v) => Value::String(v.to_string()),
            PureArg::Address(a) => Value::String(a.to_hex()),
            PureArg::String(s) => Value::String(s.clone()),
            PureArg::VecString(v) => Value::Array(v.iter().cloned().map(Value::String).collect()),
            PureArg::OptionU64(opt) => Value::Array(
                opt.iter().map(|v| Value::String(v.to_string())).collect(),
            ),
        }
    }
}

/// Argument of a Move call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallArg {
    /// Shared or owned object, passed by id
    Object(ObjectId),
    /// Pure value
    Pure(PureArg),
}

impl CallArg {
    /// JSON form accepted by `unsafe_moveCall`
    pub fn to_json(&self) -> Value {
        match self {
            CallArg::Object(id) => Value::String(id.to_hex()),
            CallArg::Pure(p) => p.to_json(),
        }
    }
}

/// Unsigned Move call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveCall {
    /// Package holding the module
    pub package: ObjectId,
    /// Module name
    pub module: String,
    /// Entry function
    pub function: String,
    /// Type arguments
    pub type_arguments: Vec<String>,
    /// Call arguments in declaration order
    pub arguments: Vec<CallArg>,
}

impl MoveCall {
    /// `package::module::function`
    pub fn target(&self) -> String {
        format!("{}::{}::{}", self.package.to_hex(), self.module, self.function)
    }

    /// Parameters for `unsafe_moveCall`: signer, package, module, function,
    /// type arguments, arguments, gas object (node picks one if `None`), budget.
    pub fn to_rpc_params(
        &self,
        sender: &Address,
        gas: Option<ObjectId>,
        gas_budget: u64,
    ) -> Vec<Value> {
        vec![
            Value::String(sender.to_hex()),
            Value::String(self.package.to_hex()),
            Value::String(self.module.clone()),
            Value::String(self.function.clone()),
            Value::Array(self.type_arguments.iter().cloned().map(Value::String).collect()),
            Value::Array(self.arguments.iter().map(CallArg::to_json).collect()),
            gas.map_or(Value::Null, |g| Value::String(g.to_hex())),
            Value::String(gas_budget.to_string()),
        ]
    }
}

/// Move call builder with fluent API
#[derive(Debug, Clone)]
pub struct MoveCallBuilder {
    package: ObjectId,
    module: String,
    function: Option<String>,
    type_arguments: Vec<String>,
    arguments: Vec<CallArg>,
}

impl MoveCallBuilder {
    /// Create a builder targeting the `minihub` module of `package`
    pub fn new(package: ObjectId) -> Self {
        Self {
            package,
            module: MODULE_NAME.to_string(),
            function: None,
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        }
    }

    /// Set the module
    pub fn module(mut self, module: impl Into<String>) -> Self {
        self.module = module.into();
        self
    }

    /// Set the entry function
    pub fn function(mut self, function: impl Into<String>) -> Self {
        self.function = Some(function.into());
        self
    }

    /// Add a type argument
    pub fn type_argument(mut self, ty: impl Into<String>) -> Self {
        self.type_arguments.push(ty.into());
        self
    }

    /// Add an object argument
    pub fn object(mut self, id: ObjectId) -> Self {
        self.arguments.push(CallArg::Object(id));
        self
    }

    /// Add a `u64` argument
    pub fn pure_u64(self, value: u64) -> Self {
        self.pure(PureArg::U64(value))
    }

    /// Add an `address` argument
    pub fn pure_address(self, value: Address) -> Self {
        self.pure(PureArg::Address(value))
    }

    /// Add a `String` argument
    pub fn pure_string(self, value: impl Into<String>) -> Self {
        self.pure(PureArg::String(value.into()))
    }

    /// Add a `vector<String>` argument
    pub fn pure_strings(self, values: Vec<String>) -> Self {
        self.pure(PureArg::VecString(values))
    }

    /// Add an `Option<u64>` argument
    pub fn pure_option_u64(self, value: Option<u64>) -> Self {
        self.pure(PureArg::OptionU64(value))
    }

    fn pure(mut self, arg: PureArg) -> Self {
        self.arguments.push(CallArg::Pure(arg));
        self
    }

    /// Build the call
    pub fn build(self) -> Result<MoveCall, SdkError> {
        let function = self
            .function
            .filter(|f| !f.is_empty())
            .ok_or_else(|| SdkError::MissingField("function".to_string()))?;
        if self.module.is_empty() {
            return Err(SdkError::TxBuild("module name cannot be empty".to_string()));
        }
        if self.package.is_zero() {
            return Err(SdkError::TxBuild("package id cannot be zero".to_string()));
        }

        Ok(MoveCall {
            package: self.package,
            module: self.module,
            function,
            type_arguments: self.type_arguments,
            arguments: self.arguments,
        })
    }
}

/// Arguments of `post_job`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostJobParams {
    /// Employer profile posting the job
    pub employer_profile_id: ObjectId,
    /// Title
    pub title: String,
    /// Description
    pub description: String,
    /// Salary in SUI
    #[serde(default)]
    pub salary: Option<u64>,
    /// Application deadline
    pub deadline: TimestampMs,
}

/// Arguments of `apply_to_job`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyToJobParams {
    /// Job to apply to
    pub job_id: ObjectId,
    /// Applicant's profile
    pub user_profile_id: ObjectId,
    /// Cover letter
    pub cover_message: String,
    /// Link to the CV
    pub cv_url: String,
}

/// Arguments of `hire_candidate`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HireCandidateParams {
    /// Job to fill
    pub job_id: ObjectId,
    /// Capability for that job
    pub employer_cap_id: ObjectId,
    /// Candidate to hire
    pub candidate: Address,
    /// Position of the candidate's application
    pub candidate_index: u64,
}

/// Fields of a user profile, for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileParams {
    /// Display name
    pub name: String,
    /// Biography
    pub bio: String,
    /// Avatar image
    pub avatar_url: String,
    /// Skills
    pub skills: Vec<String>,
    /// Years of experience
    pub experience_years: u64,
    /// Portfolio link
    pub portfolio_url: String,
}

/// Fields of an employer profile, for create and update
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployerProfileParams {
    /// Company name
    pub company_name: String,
    /// Description
    pub description: String,
    /// Logo image
    pub logo_url: String,
    /// Website
    pub website: String,
    /// Industry
    pub industry: String,
    /// Head count
    pub employee_count: u64,
    /// Founding year
    pub founded_year: u64,
}

impl UserProfileParams {
    pub(crate) fn append_to(self, builder: MoveCallBuilder) -> MoveCallBuilder {
        builder
            .pure_string(self.name)
            .pure_string(self.bio)
            .pure_string(self.avatar_url)
            .pure_strings(self.skills)
            .pure_u64(self.experience_years)
            .pure_string(self.portfolio_url)
    }
}

impl EmployerProfileParams {
    pub(crate) fn append_to(self, builder: MoveCallBuilder) -> MoveCallBuilder {
        builder
            .pure_string(self.company_name)
            .pure_string(self.description)
            .pure_string(self.logo_url)
            .pure_string(self.website)
            .pure_string(self.industry)
            .pure_u64(self.employee_count)
            .pure_u64(self.founded_year)
    }
}

//! MiniHub - data-access facade over the `minihub` package

use minihub_primitives::{Address, ObjectId};
use serde::{Deserialize, Serialize};

use crate::client::SuiClient;
use crate::contract::{entry, is_struct_type, struct_type, structs, DEFAULT_CLOCK_ID, MODULE_NAME};
use crate::decode::{MoveFields, MoveStruct};
use crate::format::now_ms;
use crate::models::{
    ApplicationProfile, ApplicationSubmittedEvent, CandidateHiredEvent, EmployerCap,
    EmployerProfile, EmployerProfileCreatedEvent, EmployerRegistry, Job, JobBoard,
    JobPostedEvent, ProfileUpdatedEvent, Statistics, TypedEvent, UserProfile,
    UserProfileCreatedEvent, UserRegistry,
};
use crate::tx_builder::{
    ApplyToJobParams, EmployerProfileParams, HireCandidateParams, MoveCall, MoveCallBuilder,
    PostJobParams, UserProfileParams,
};
use crate::types::{
    DynamicFieldName, EventFilter, EventId, EventPage, ObjectDataOptions, ObjectFilter,
    ObjectResponse, OwnedObjectsQuery,
};
use crate::SdkError;

/// Default number of events per page
pub const DEFAULT_EVENT_LIMIT: usize = 50;

/// Object ids of a `minihub` deployment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageConfig {
    /// Published package
    pub package_id: ObjectId,
    /// Shared job board
    pub job_board_id: ObjectId,
    /// Shared user registry
    pub user_registry_id: ObjectId,
    /// Shared employer registry
    pub employer_registry_id: ObjectId,
    /// Clock object, `0x6` on every network
    #[serde(default = "default_clock_id")]
    pub clock_id: ObjectId,
}

fn default_clock_id() -> ObjectId {
    DEFAULT_CLOCK_ID
}

impl PackageConfig {
    /// Config using the shared system clock
    pub fn new(
        package_id: ObjectId,
        job_board_id: ObjectId,
        user_registry_id: ObjectId,
        employer_registry_id: ObjectId,
    ) -> Self {
        Self {
            package_id,
            job_board_id,
            user_registry_id,
            employer_registry_id,
            clock_id: DEFAULT_CLOCK_ID,
        }
    }

    /// Override the clock object
    pub fn with_clock(mut self, clock_id: ObjectId) -> Self {
        self.clock_id = clock_id;
        self
    }
}

/// Event query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventQuery {
    /// Struct name such as `JobPosted`, or a fully qualified event type
    pub event_type: String,
    /// Page size
    pub limit: Option<usize>,
    /// Resume after this event
    pub cursor: Option<EventId>,
}

impl EventQuery {
    /// First page of `event_type` events
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            limit: None,
            cursor: None,
        }
    }

    /// Set the page size
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Set the cursor
    pub fn cursor(mut self, cursor: EventId) -> Self {
        self.cursor = Some(cursor);
        self
    }
}

/// Read and transaction-building facade for one deployment.
///
/// Holds no state besides the client and the object ids; every read goes
/// to the node.
pub struct MiniHub {
    client: SuiClient,
    config: PackageConfig,
}

impl MiniHub {
    /// Create a facade over `client`
    pub fn new(client: SuiClient, config: PackageConfig) -> Self {
        Self { client, config }
    }

    /// Underlying RPC client
    pub fn client(&self) -> &SuiClient {
        &self.client
    }

    /// Deployment ids
    pub fn config(&self) -> &PackageConfig {
        &self.config
    }

    // ==================== Single objects ====================

    /// Fetch a job. `None` if it does not exist or is not a job.
    pub async fn get_job(&self, id: &ObjectId) -> Result<Option<Job>, SdkError> {
        self.fetch_object(id).await
    }

    /// Fetch a user profile
    pub async fn get_user_profile(&self, id: &ObjectId) -> Result<Option<UserProfile>, SdkError> {
        self.fetch_object(id).await
    }

    /// Fetch an employer profile
    pub async fn get_employer_profile(
        &self,
        id: &ObjectId,
    ) -> Result<Option<EmployerProfile>, SdkError> {
        self.fetch_object(id).await
    }

    /// Fetch the configured job board
    pub async fn get_job_board(&self) -> Result<Option<JobBoard>, SdkError> {
        self.fetch_object(&self.config.job_board_id).await
    }

    /// Fetch the configured user registry
    pub async fn get_user_registry(&self) -> Result<Option<UserRegistry>, SdkError> {
        self.fetch_object(&self.config.user_registry_id).await
    }

    /// Fetch the configured employer registry
    pub async fn get_employer_registry(&self) -> Result<Option<EmployerRegistry>, SdkError> {
        self.fetch_object(&self.config.employer_registry_id).await
    }

    // ==================== Collections ====================

    /// All jobs in job board order
    pub async fn get_all_jobs(&self) -> Result<Vec<Job>, SdkError> {
        match self.get_job_board().await? {
            Some(board) => self.fetch_many(&board.job_ids).await,
            None => {
                tracing::warn!(id = %self.config.job_board_id, "job board not found");
                Ok(Vec::new())
            }
        }
    }

    /// All user profiles in registration order
    pub async fn get_all_user_profiles(&self) -> Result<Vec<UserProfile>, SdkError> {
        match self.get_user_registry().await? {
            Some(registry) => self.fetch_many(&registry.user_profiles).await,
            None => {
                tracing::warn!(id = %self.config.user_registry_id, "user registry not found");
                Ok(Vec::new())
            }
        }
    }

    /// All employer profiles in registration order
    pub async fn get_all_employer_profiles(&self) -> Result<Vec<EmployerProfile>, SdkError> {
        match self.get_employer_registry().await? {
            Some(registry) => self.fetch_many(&registry.employer_profiles).await,
            None => {
                tracing::warn!(
                    id = %self.config.employer_registry_id,
                    "employer registry not found"
                );
                Ok(Vec::new())
            }
        }
    }

    /// Jobs still open for applications
    pub async fn get_active_jobs(&self) -> Result<Vec<Job>, SdkError> {
        let now = now_ms();
        let jobs = self.get_all_jobs().await?;
        Ok(jobs.into_iter().filter(|j| j.is_active_at(now)).collect())
    }

    /// Jobs posted by `employer`
    pub async fn get_jobs_by_employer(&self, employer: &Address) -> Result<Vec<Job>, SdkError> {
        let jobs = self.get_all_jobs().await?;
        Ok(jobs.into_iter().filter(|j| j.employer == *employer).collect())
    }

    /// First user profile owned by `owner`
    pub async fn get_user_profile_by_address(
        &self,
        owner: &Address,
    ) -> Result<Option<UserProfile>, SdkError> {
        let profiles = self.get_all_user_profiles().await?;
        Ok(profiles.into_iter().find(|p| p.user_address == *owner))
    }

    /// First employer profile owned by `owner`
    pub async fn get_employer_profile_by_address(
        &self,
        owner: &Address,
    ) -> Result<Option<EmployerProfile>, SdkError> {
        let profiles = self.get_all_employer_profiles().await?;
        Ok(profiles.into_iter().find(|p| p.employer_address == *owner))
    }

    // ==================== Applications ====================

    /// Application at `index` of `job_id`, if it belongs to `candidate`
    pub async fn get_application(
        &self,
        job_id: &ObjectId,
        candidate: &Address,
        index: u64,
    ) -> Result<Option<ApplicationProfile>, SdkError> {
        let application = self.fetch_application(job_id, index).await?;
        Ok(application.filter(|a| a.candidate == *candidate))
    }

    /// All applications of a job, in submission order
    pub async fn get_job_applications(
        &self,
        job_id: &ObjectId,
    ) -> Result<Vec<ApplicationProfile>, SdkError> {
        let job = match self.get_job(job_id).await? {
            Some(job) => job,
            None => return Ok(Vec::new()),
        };

        let mut applications = Vec::with_capacity(job.application_count as usize);
        for index in 0..job.application_count {
            match self.fetch_application(job_id, index).await? {
                Some(application) => applications.push(application),
                None => tracing::debug!(job = %job_id, index, "no application at index"),
            }
        }
        Ok(applications)
    }

    /// Whether `user` applied to `job_id`
    pub async fn has_user_applied_to_job(
        &self,
        job_id: &ObjectId,
        user: &Address,
    ) -> Result<bool, SdkError> {
        let applications = self.get_job_applications(job_id).await?;
        Ok(applications.iter().any(|a| a.candidate == *user))
    }

    /// Every application `user` submitted, across all jobs
    pub async fn get_user_applications(
        &self,
        user: &Address,
    ) -> Result<Vec<ApplicationProfile>, SdkError> {
        let mut out = Vec::new();
        for job in self.get_all_jobs().await? {
            let applications = self.get_job_applications(&job.id).await?;
            out.extend(applications.into_iter().filter(|a| a.candidate == *user));
        }
        Ok(out)
    }

    /// Hiring capabilities owned by `owner`
    pub async fn get_employer_caps(&self, owner: &Address) -> Result<Vec<EmployerCap>, SdkError> {
        let query = OwnedObjectsQuery {
            filter: Some(ObjectFilter::StructType(struct_type(
                &self.config.package_id,
                structs::EMPLOYER_CAP,
            ))),
            options: ObjectDataOptions::full(),
        };
        let responses = self.client.get_all_owned_objects(owner, &query).await?;
        Ok(decode_all(responses))
    }

    // ==================== Statistics ====================

    /// Counters over the whole board. Jobs, users and employers are fetched
    /// concurrently; any failure fails the call.
    pub async fn get_statistics(&self) -> Result<Statistics, SdkError> {
        let (jobs, users, employers) = tokio::try_join!(
            self.get_all_jobs(),
            self.get_all_user_profiles(),
            self.get_all_employer_profiles(),
        )?;
        Ok(Statistics::from_records(
            &jobs,
            users.len() as u64,
            employers.len() as u64,
            now_ms(),
        ))
    }

    // ==================== Events ====================

    /// One page of events, newest first
    pub async fn get_events(&self, query: EventQuery) -> Result<EventPage, SdkError> {
        let event_type = if query.event_type.contains("::") {
            query.event_type
        } else {
            struct_type(&self.config.package_id, &query.event_type)
        };
        self.client
            .query_events(
                &EventFilter::MoveEventType(event_type),
                query.cursor,
                Some(query.limit.unwrap_or(DEFAULT_EVENT_LIMIT)),
                true,
            )
            .await
    }

    /// Latest `JobPosted` events
    pub async fn get_job_posted_events(
        &self,
        limit: usize,
    ) -> Result<Vec<TypedEvent<JobPostedEvent>>, SdkError> {
        self.typed_events(limit).await
    }

    /// Latest `ApplicationSubmitted` events
    pub async fn get_application_submitted_events(
        &self,
        limit: usize,
    ) -> Result<Vec<TypedEvent<ApplicationSubmittedEvent>>, SdkError> {
        self.typed_events(limit).await
    }

    /// Latest `CandidateHired` events
    pub async fn get_candidate_hired_events(
        &self,
        limit: usize,
    ) -> Result<Vec<TypedEvent<CandidateHiredEvent>>, SdkError> {
        self.typed_events(limit).await
    }

    /// Latest `UserProfileCreated` events
    pub async fn get_user_profile_created_events(
        &self,
        limit: usize,
    ) -> Result<Vec<TypedEvent<UserProfileCreatedEvent>>, SdkError> {
        self.typed_events(limit).await
    }

    /// Latest `EmployerProfileCreated` events
    pub async fn get_employer_profile_created_events(
        &self,
        limit: usize,
    ) -> Result<Vec<TypedEvent<EmployerProfileCreatedEvent>>, SdkError> {
        self.typed_events(limit).await
    }

    /// Latest `ProfileUpdated` events
    pub async fn get_profile_updated_events(
        &self,
        limit: usize,
    ) -> Result<Vec<TypedEvent<ProfileUpdatedEvent>>, SdkError> {
        self.typed_events(limit).await
    }

    // ==================== Job state ====================

    /// Deadline of `job` is in the past
    pub fn is_job_deadline_passed(&self, job: &Job) -> bool {
        job.is_deadline_passed_at(now_ms())
    }

    /// `job` is open for applications
    pub fn is_job_active(&self, job: &Job) -> bool {
        job.is_active_at(now_ms())
    }

    // ==================== Transactions ====================

    /// `post_job(job_board, employer_profile, title, description, salary, deadline, clock)`
    pub fn post_job_transaction(&self, params: PostJobParams) -> Result<MoveCall, SdkError> {
        self.call(entry::POST_JOB)
            .object(self.config.job_board_id)
            .object(params.employer_profile_id)
            .pure_string(params.title)
            .pure_string(params.description)
            .pure_option_u64(params.salary)
            .pure_u64(params.deadline)
            .object(self.config.clock_id)
            .build()
    }

    /// `apply_to_job(job, user_profile, cover_message, cv_url, clock)`
    pub fn apply_to_job_transaction(&self, params: ApplyToJobParams) -> Result<MoveCall, SdkError> {
        self.call(entry::APPLY_TO_JOB)
            .object(params.job_id)
            .object(params.user_profile_id)
            .pure_string(params.cover_message)
            .pure_string(params.cv_url)
            .object(self.config.clock_id)
            .build()
    }

    /// `hire_candidate(job, employer_cap, candidate, candidate_index)`
    pub fn hire_candidate_transaction(
        &self,
        params: HireCandidateParams,
    ) -> Result<MoveCall, SdkError> {
        self.call(entry::HIRE_CANDIDATE)
            .object(params.job_id)
            .object(params.employer_cap_id)
            .pure_address(params.candidate)
            .pure_u64(params.candidate_index)
            .build()
    }

    /// `create_user_profile(user_registry, ..fields, clock)`
    pub fn create_user_profile_transaction(
        &self,
        params: UserProfileParams,
    ) -> Result<MoveCall, SdkError> {
        let builder = self
            .call(entry::CREATE_USER_PROFILE)
            .object(self.config.user_registry_id);
        params
            .append_to(builder)
            .object(self.config.clock_id)
            .build()
    }

    /// `create_employer_profile(employer_registry, ..fields, clock)`
    pub fn create_employer_profile_transaction(
        &self,
        params: EmployerProfileParams,
    ) -> Result<MoveCall, SdkError> {
        let builder = self
            .call(entry::CREATE_EMPLOYER_PROFILE)
            .object(self.config.employer_registry_id);
        params
            .append_to(builder)
            .object(self.config.clock_id)
            .build()
    }

    /// `update_user_profile(user_profile, ..fields, clock)`
    pub fn update_user_profile_transaction(
        &self,
        profile_id: ObjectId,
        params: UserProfileParams,
    ) -> Result<MoveCall, SdkError> {
        let builder = self.call(entry::UPDATE_USER_PROFILE).object(profile_id);
        params
            .append_to(builder)
            .object(self.config.clock_id)
            .build()
    }

    /// `update_employer_profile(employer_profile, ..fields, clock)`
    pub fn update_employer_profile_transaction(
        &self,
        profile_id: ObjectId,
        params: EmployerProfileParams,
    ) -> Result<MoveCall, SdkError> {
        let builder = self.call(entry::UPDATE_EMPLOYER_PROFILE).object(profile_id);
        params
            .append_to(builder)
            .object(self.config.clock_id)
            .build()
    }

    // ==================== Helpers ====================

    fn call(&self, function: &str) -> MoveCallBuilder {
        MoveCallBuilder::new(self.config.package_id)
            .module(MODULE_NAME)
            .function(function)
    }

    async fn fetch_object<T: MoveStruct>(&self, id: &ObjectId) -> Result<Option<T>, SdkError> {
        let response = self.client.get_object(id).await?;
        decode_response(response)
    }

    async fn fetch_many<T: MoveStruct>(&self, ids: &[ObjectId]) -> Result<Vec<T>, SdkError> {
        let responses = self.client.multi_get_objects(ids).await?;
        Ok(decode_all(responses))
    }

    async fn fetch_application(
        &self,
        job_id: &ObjectId,
        index: u64,
    ) -> Result<Option<ApplicationProfile>, SdkError> {
        let response = self
            .client
            .get_dynamic_field_object(job_id, DynamicFieldName::u64(index))
            .await?;
        let data = match response.into_data() {
            Some(data) => data,
            None => return Ok(None),
        };
        if !data.move_type().map_or(false, |t| is_field_of(t, structs::APPLICATION)) {
            return Ok(None);
        }
        let decoded = data
            .fields()
            .ok_or_else(|| SdkError::MissingField("content.fields".to_string()))
            .and_then(|fields| {
                ApplicationProfile::from_fields(&MoveFields::new(fields).unwrap_dynamic_field())
            });
        match decoded {
            Ok(application) => Ok(Some(application)),
            Err(e) => {
                tracing::warn!(
                    job = %job_id,
                    index,
                    error = %e,
                    "undecodable application, skipping"
                );
                Ok(None)
            }
        }
    }

    async fn typed_events<T: MoveStruct>(
        &self,
        limit: usize,
    ) -> Result<Vec<TypedEvent<T>>, SdkError> {
        let page = self
            .get_events(EventQuery::new(T::STRUCT_NAME).limit(limit))
            .await?;
        let mut out = Vec::with_capacity(page.data.len());
        for event in page.data {
            let decoded =
                MoveFields::from_value(&event.parsed_json).and_then(|f| T::from_fields(&f));
            match decoded {
                Ok(data) => out.push(TypedEvent {
                    tx_digest: event.id.tx_digest.clone(),
                    timestamp_ms: event.timestamp(),
                    data,
                }),
                Err(e) => tracing::warn!(
                    tx = %event.id.tx_digest,
                    error = %e,
                    "skipping undecodable event"
                ),
            }
        }
        Ok(out)
    }
}

/// Decode one object response. Missing objects and objects of another
/// type are `None`.
fn decode_response<T: MoveStruct>(response: ObjectResponse) -> Result<Option<T>, SdkError> {
    let data = match response.into_data() {
        Some(data) => data,
        None => return Ok(None),
    };
    match data.move_type() {
        Some(t) if is_struct_type(t, T::STRUCT_NAME) => {}
        other => {
            tracing::debug!(
                id = %data.object_id,
                found = ?other,
                expected = T::STRUCT_NAME,
                "type mismatch"
            );
            return Ok(None);
        }
    }
    let fields = data
        .fields()
        .ok_or_else(|| SdkError::MissingField("content.fields".to_string()))?;
    T::from_fields(&MoveFields::new(fields)).map(Some)
}

/// Decode a batch, skipping entries that are missing or undecodable
fn decode_all<T: MoveStruct>(responses: Vec<ObjectResponse>) -> Vec<T> {
    let mut out = Vec::with_capacity(responses.len());
    for response in responses {
        let id = response.data.as_ref().map(|d| d.object_id);
        match decode_response::<T>(response) {
            Ok(Some(record)) => out.push(record),
            Ok(None) => tracing::warn!(id = ?id, kind = T::STRUCT_NAME, "object missing, skipping"),
            Err(e) => tracing::warn!(
                id = ?id,
                kind = T::STRUCT_NAME,
                error = %e,
                "undecodable object, skipping"
            ),
        }
    }
    out
}

/// `0x2::dynamic_field::Field<K, V>` whose value is `minihub::<name>`
fn is_field_of(move_type: &str, name: &str) -> bool {
    move_type
        .split_once('<')
        .and_then(|(_, args)| args.strip_suffix('>'))
        .and_then(|args| args.rsplit(',').next())
        .map_or(false, |value| is_struct_type(value.trim(), name))
}

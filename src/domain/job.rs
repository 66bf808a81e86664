//! The job aggregate and its wire decoding
//!
//! Decoding walks the top-level object field by field so that failures
//! name the exact field path (e.g. `existing_pull_requests[0].dependencies[1].dependency_version`).
//! Unknown keys are ignored. Missing keys and explicit `null` behave alike:
//! - booleans resolve to `false`
//! - sequences and maps resolve to empty
//! - optional records resolve to `None`

use super::{
    Advisory, AllowedUpdate, CommitOptions, Condition, Cooldown, DependencyGroup, JobSource,
    PackageVersion, PullRequest, RequirementsUpdateStrategy, UpdateType,
};
use crate::error::JobError;
use crate::normalize;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Package manager assumed when the wire form does not name one
pub const DEFAULT_PACKAGE_MANAGER: &str = "bundler";

/// Open-ended key/value settings (experiments, credential metadata)
pub type Settings = BTreeMap<String, Value>;

/// Configuration of a single dependency-update run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Value")]
pub struct Job {
    /// Package manager (e.g. "bundler", "nuget"); never empty
    pub package_manager: String,
    pub source: JobSource,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub allowed_updates: Vec<AllowedUpdate>,
    #[serde(skip_serializing_if = "normalize::is_false")]
    pub debug: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependency_groups: Vec<DependencyGroup>,
    /// Names of the dependencies this run should update
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dependency_group_to_refresh: Option<String>,
    /// Ungrouped pull requests; their group name is never consulted
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub existing_pull_requests: Vec<PullRequest>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub existing_group_pull_requests: Vec<PullRequest>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub experiments: Settings,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub ignore_conditions: Vec<Condition>,
    #[serde(skip_serializing_if = "normalize::is_false")]
    pub lockfile_only: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requirements_update_strategy: Option<RequirementsUpdateStrategy>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub security_advisories: Vec<Advisory>,
    #[serde(skip_serializing_if = "normalize::is_false")]
    pub security_updates_only: bool,
    #[serde(skip_serializing_if = "normalize::is_false")]
    pub update_subdependencies: bool,
    #[serde(skip_serializing_if = "normalize::is_false")]
    pub updating_a_pull_request: bool,
    #[serde(skip_serializing_if = "normalize::is_false")]
    pub vendor_dependencies: bool,
    #[serde(skip_serializing_if = "normalize::is_false")]
    pub reject_external_code: bool,
    #[serde(skip_serializing_if = "normalize::is_false")]
    pub repo_private: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message_options: Option<CommitOptions>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub credentials_metadata: Vec<Settings>,
    /// Maximum updater run time in seconds, 0 when unlimited
    #[serde(skip_serializing_if = "is_zero")]
    pub max_updater_run_time: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooldown: Option<Cooldown>,
}

fn is_zero(value: &u64) -> bool {
    *value == 0
}

impl Job {
    /// Creates a job for `source` with every other field at its default
    pub fn new(source: JobSource) -> Self {
        Self {
            package_manager: DEFAULT_PACKAGE_MANAGER.to_string(),
            source,
            allowed_updates: Vec::new(),
            debug: false,
            dependency_groups: Vec::new(),
            dependencies: Vec::new(),
            dependency_group_to_refresh: None,
            existing_pull_requests: Vec::new(),
            existing_group_pull_requests: Vec::new(),
            experiments: Settings::new(),
            ignore_conditions: Vec::new(),
            lockfile_only: false,
            requirements_update_strategy: None,
            security_advisories: Vec::new(),
            security_updates_only: false,
            update_subdependencies: false,
            updating_a_pull_request: false,
            vendor_dependencies: false,
            reject_external_code: false,
            repo_private: false,
            commit_message_options: None,
            credentials_metadata: Vec::new(),
            max_updater_run_time: 0,
            cooldown: None,
        }
    }

    /// Sets the package manager (builder pattern)
    ///
    /// # Panics
    ///
    /// Panics if `package_manager` is blank; use
    /// [`Job::try_with_package_manager`] for untrusted input.
    pub fn with_package_manager(mut self, package_manager: impl Into<String>) -> Self {
        let package_manager = package_manager.into();
        assert!(!package_manager.trim().is_empty(), "package manager must not be empty");
        self.package_manager = package_manager;
        self
    }

    /// Sets the package manager, rejecting a blank one
    pub fn try_with_package_manager(
        mut self,
        package_manager: impl Into<String>,
    ) -> Result<Self, JobError> {
        self.package_manager = non_blank("package_manager", package_manager.into())?;
        Ok(self)
    }

    /// Sets the dependencies to update (builder pattern)
    pub fn with_dependencies<I, S>(mut self, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = dependencies.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the dependency groups (builder pattern)
    pub fn with_dependency_groups(mut self, groups: Vec<DependencyGroup>) -> Self {
        self.dependency_groups = groups;
        self
    }

    /// Sets the ignore conditions (builder pattern)
    pub fn with_ignore_conditions(mut self, conditions: Vec<Condition>) -> Self {
        self.ignore_conditions = conditions;
        self
    }

    /// Sets the existing ungrouped pull requests (builder pattern)
    pub fn with_existing_pull_requests(mut self, pull_requests: Vec<PullRequest>) -> Self {
        self.existing_pull_requests = pull_requests;
        self
    }

    /// Sets the existing group pull requests (builder pattern)
    pub fn with_existing_group_pull_requests(mut self, pull_requests: Vec<PullRequest>) -> Self {
        self.existing_group_pull_requests = pull_requests;
        self
    }

    /// Restricts the run to security updates (builder pattern)
    pub fn for_security_updates(mut self) -> Self {
        self.security_updates_only = true;
        self
    }

    /// Decodes a job from JSON text
    pub fn from_json(json: &str) -> Result<Self, JobError> {
        let value: Value = serde_json::from_str(json).map_err(JobError::Syntax)?;
        Self::from_value(value)
    }

    /// Decodes a job from an already parsed JSON value
    pub fn from_value(value: Value) -> Result<Self, JobError> {
        let Value::Object(fields) = value else {
            return Err(JobError::invalid("job", "expected a JSON object"));
        };
        let job = decode_job(fields)?;
        tracing::debug!(
            package_manager = %job.package_manager,
            provider = %job.source.provider,
            "decoded job"
        );
        Ok(job)
    }

    /// Serializes the job, omitting fields that hold their default
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Serializes the job like [`Job::to_json`], with indentation
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl TryFrom<Value> for Job {
    type Error = JobError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn decode_job(mut fields: Map<String, Value>) -> Result<Job, JobError> {
    let mut take = |key: &str| fields.remove(key).unwrap_or(Value::Null);

    Ok(Job {
        package_manager: decode_package_manager(take("package_manager"))?,
        source: decode_source(take("source"))?,
        allowed_updates: decode_list(
            "allowed_updates",
            take("allowed_updates"),
            check_allowed_update,
        )?,
        debug: normalize::coerce_bool(&take("debug")),
        dependency_groups: decode_list("dependency_groups", take("dependency_groups"), |p, v| {
            require_keys(p, v, &[("name", Leaf::Text)])
        })?,
        dependencies: normalize::coerce_string_seq(&take("dependencies")),
        dependency_group_to_refresh: decode_optional(
            "dependency_group_to_refresh",
            take("dependency_group_to_refresh"),
            no_checks,
        )?,
        existing_pull_requests: decode_list(
            "existing_pull_requests",
            take("existing_pull_requests"),
            check_pull_request,
        )?,
        existing_group_pull_requests: decode_list(
            "existing_group_pull_requests",
            take("existing_group_pull_requests"),
            check_pull_request,
        )?,
        experiments: decode_settings("experiments", take("experiments"))?,
        ignore_conditions: decode_list("ignore_conditions", take("ignore_conditions"), |p, v| {
            require_keys(p, v, &[("dependency_name", Leaf::Text)])
        })?,
        lockfile_only: normalize::coerce_bool(&take("lockfile_only")),
        requirements_update_strategy: decode_strategy(take("requirements_update_strategy"))?,
        security_advisories: decode_list(
            "security_advisories",
            take("security_advisories"),
            |p, v| require_keys(p, v, &[("id", Leaf::Text)]),
        )?,
        security_updates_only: normalize::coerce_bool(&take("security_updates_only")),
        update_subdependencies: normalize::coerce_bool(&take("update_subdependencies")),
        updating_a_pull_request: normalize::coerce_bool(&take("updating_a_pull_request")),
        vendor_dependencies: normalize::coerce_bool(&take("vendor_dependencies")),
        reject_external_code: normalize::coerce_bool(&take("reject_external_code")),
        repo_private: normalize::coerce_bool(&take("repo_private")),
        commit_message_options: decode_optional(
            "commit_message_options",
            take("commit_message_options"),
            no_checks,
        )?,
        credentials_metadata: decode_list(
            "credentials_metadata",
            take("credentials_metadata"),
            no_checks,
        )?,
        max_updater_run_time: decode_optional(
            "max_updater_run_time",
            take("max_updater_run_time"),
            no_checks,
        )?
        .unwrap_or(0),
        cooldown: decode_optional("cooldown", take("cooldown"), |p, v| {
            require_keys(p, v, &[("duration", Leaf::Count)])
        })?,
    })
}

/// Returns `value` unless it is blank
pub(crate) fn non_blank(path: &str, value: String) -> Result<String, JobError> {
    if value.trim().is_empty() {
        return Err(JobError::invalid(path, "must not be empty"));
    }
    Ok(value)
}

fn decode_package_manager(value: Value) -> Result<String, JobError> {
    match value {
        Value::Null => Ok(DEFAULT_PACKAGE_MANAGER.to_string()),
        Value::String(s) => non_blank("package_manager", s),
        _ => Err(JobError::invalid("package_manager", "expected a string")),
    }
}

fn decode_source(value: Value) -> Result<JobSource, JobError> {
    if value.is_null() {
        return Err(JobError::missing("source"));
    }
    require_keys("source", &value, &[("provider", Leaf::Text)])?;
    let mut source: JobSource = decode("source", value)?;
    source.provider = non_blank("source.provider", source.provider)?;
    Ok(source)
}

fn decode_strategy(value: Value) -> Result<Option<RequirementsUpdateStrategy>, JobError> {
    const PATH: &str = "requirements_update_strategy";
    match value {
        Value::Null => Ok(None),
        Value::String(s) => s
            .parse()
            .map(Some)
            .map_err(|e| JobError::unknown_enum(PATH, e)),
        _ => Err(JobError::invalid(PATH, "expected a string")),
    }
}

fn decode_settings(path: &str, value: Value) -> Result<Settings, JobError> {
    match value {
        Value::Null => Ok(Settings::new()),
        Value::Object(map) => Ok(map.into_iter().collect()),
        _ => Err(JobError::invalid(path, "expected an object")),
    }
}

fn decode<T: DeserializeOwned>(path: &str, value: Value) -> Result<T, JobError> {
    serde_json::from_value(value).map_err(|e| JobError::invalid(path, e.to_string()))
}

fn decode_optional<T, F>(path: &str, value: Value, validate: F) -> Result<Option<T>, JobError>
where
    T: DeserializeOwned,
    F: Fn(&str, &Value) -> Result<(), JobError>,
{
    if value.is_null() {
        return Ok(None);
    }
    validate(path, &value)?;
    decode(path, value).map(Some)
}

fn decode_list<T, F>(path: &str, value: Value, validate: F) -> Result<Vec<T>, JobError>
where
    T: DeserializeOwned,
    F: Fn(&str, &Value) -> Result<(), JobError>,
{
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                let item_path = format!("{}[{}]", path, i);
                validate(&item_path, &item)?;
                decode(&item_path, item)
            })
            .collect(),
        _ => Err(JobError::invalid(path, "expected an array")),
    }
}

fn no_checks(_path: &str, _value: &Value) -> Result<(), JobError> {
    Ok(())
}

fn child_path(parent: &str, key: &str) -> String {
    format!("{}.{}", parent, key)
}

/// Wire type of a required leaf field
#[derive(Debug, Clone, Copy)]
enum Leaf {
    Text,
    Count,
}

impl Leaf {
    fn accepts(self, value: &Value) -> bool {
        match self {
            Leaf::Text => value.is_string(),
            Leaf::Count => value.is_u64(),
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Leaf::Text => "expected a string",
            Leaf::Count => "expected a non-negative integer",
        }
    }
}

/// Checks that `value` is an object whose required leaves are present
/// and of the right wire type
fn require_keys(path: &str, value: &Value, keys: &[(&str, Leaf)]) -> Result<(), JobError> {
    let Value::Object(map) = value else {
        return Err(JobError::invalid(path, "expected an object"));
    };
    for (key, leaf) in keys {
        match map.get(*key) {
            None | Some(Value::Null) => return Err(JobError::missing(child_path(path, key))),
            Some(found) if !leaf.accepts(found) => {
                return Err(JobError::invalid(child_path(path, key), leaf.expected()))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

fn check_allowed_update(path: &str, value: &Value) -> Result<(), JobError> {
    require_keys(path, value, &[])?;
    if let Some(Value::String(tag)) = value.get("update_type") {
        tag.parse::<UpdateType>()
            .map_err(|e| JobError::unknown_enum(child_path(path, "update_type"), e))?;
    }
    Ok(())
}

fn check_pull_request(path: &str, value: &Value) -> Result<(), JobError> {
    require_keys(path, value, &[])?;
    let Some(Value::Array(dependencies)) = value.get("dependencies") else {
        return Ok(());
    };
    for (i, dependency) in dependencies.iter().enumerate() {
        let dependency_path = format!("{}.dependencies[{}]", path, i);
        require_keys(
            &dependency_path,
            dependency,
            &[
                ("dependency_name", Leaf::Text),
                ("dependency_version", Leaf::Text),
            ],
        )?;
        if let Some(Value::String(version)) = dependency.get("dependency_version") {
            PackageVersion::parse(version).map_err(|e| {
                JobError::invalid(
                    child_path(&dependency_path, "dependency_version"),
                    e.to_string(),
                )
            })?;
        }
    }
    Ok(())
}

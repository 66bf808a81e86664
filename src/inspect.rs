//! Job inspection for the `depjob` binary
//!
//! Runs the requested queries against a loaded job and collects the
//! answers into an [`InspectionReport`] for the output formatters.

use crate::cli::CliArgs;
use crate::domain::{Dependency, Job};
use crate::query::{ExistingPullRequest, JobCategory};

/// Queries to run against a job
#[derive(Debug, Clone, Default)]
pub struct InspectionRequest {
    /// Dependency names to check against name-only ignore conditions
    pub ignored: Vec<String>,
    /// Dependencies of the pull request to look up; empty skips the lookup
    pub find_pr: Vec<Dependency>,
    /// Whether versions take part in pull request matching
    pub consider_versions: bool,
}

impl InspectionRequest {
    /// Create a request from CLI arguments
    pub fn from_cli(args: &CliArgs) -> Self {
        Self {
            ignored: args.ignored.clone(),
            find_pr: args.find_pr.clone(),
            consider_versions: args.consider_versions(),
        }
    }
}

/// Result of a name-only ignore check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreCheck {
    pub name: String,
    pub ignored: bool,
}

/// An existing pull request found by a lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestMatch {
    pub group_name: Option<String>,
    pub number: Option<u64>,
    pub url: Option<String>,
    /// Dependencies as `name@version`
    pub dependencies: Vec<String>,
}

impl From<ExistingPullRequest<'_>> for PullRequestMatch {
    fn from(existing: ExistingPullRequest<'_>) -> Self {
        Self {
            group_name: existing.group_name.map(str::to_string),
            number: existing.pull_request.number,
            url: existing.pull_request.url.clone(),
            dependencies: existing
                .dependencies()
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

/// Outcome of a pull request lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestLookup {
    /// Requested dependencies as given (`name@version` or bare name)
    pub requested: Vec<String>,
    pub consider_versions: bool,
    pub found: Option<PullRequestMatch>,
}

/// Everything the inspector reports about a job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InspectionReport {
    pub package_manager: String,
    pub category: JobCategory,
    pub repository: String,
    pub security_updates_only: bool,
    pub directories: Vec<String>,
    pub relevant_groups: Vec<String>,
    pub dependencies: Vec<String>,
    pub existing_pull_requests: usize,
    pub ignore_conditions: usize,
    pub ignore_checks: Vec<IgnoreCheck>,
    pub pull_request_lookup: Option<PullRequestLookup>,
}

impl InspectionReport {
    /// Run the requested queries against a job
    pub fn build(job: &Job, request: &InspectionRequest) -> Self {
        let ignore_checks = request
            .ignored
            .iter()
            .map(|name| IgnoreCheck {
                name: name.clone(),
                ignored: job.is_dependency_ignored_by_name_only(name),
            })
            .collect();

        let pull_request_lookup = (!request.find_pr.is_empty()).then(|| PullRequestLookup {
            requested: request.find_pr.iter().map(ToString::to_string).collect(),
            consider_versions: request.consider_versions,
            found: job
                .existing_pull_request_for_dependencies(&request.find_pr, request.consider_versions)
                .map(PullRequestMatch::from),
        });

        Self {
            package_manager: job.package_manager.clone(),
            category: job.job_category(),
            repository: job.repository_name().to_string(),
            security_updates_only: job.security_updates_only,
            directories: job.all_directories().into_iter().map(str::to_string).collect(),
            relevant_groups: job
                .relevant_dependency_groups()
                .into_iter()
                .map(|group| group.name.clone())
                .collect(),
            dependencies: job.dependency_names().into_iter().map(str::to_string).collect(),
            existing_pull_requests: job.all_existing_pull_requests().len(),
            ignore_conditions: job.ignore_conditions.len(),
            ignore_checks,
            pull_request_lookup,
        }
    }

    /// Number of checked names that are ignored
    pub fn ignored_count(&self) -> usize {
        self.ignore_checks.iter().filter(|c| c.ignored).count()
    }
}

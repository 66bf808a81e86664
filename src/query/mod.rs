//! Derived queries over a constructed job
//!
//! Every query is a pure function of the job. None of them fail: missing
//! optional data degrades to "root only", an empty list, `None` or `false`.

mod glob;

pub use glob::{glob_match, GlobPattern};

use crate::domain::{
    Dependency, DependencyGroup, Job, PullRequest, PullRequestDependency, SECURITY_UPDATES,
    VERSION_UPDATES,
};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Directory scanned when a job names none
pub const ROOT_DIRECTORY: &str = "/";

/// Repository name reported when the source has none
pub const UNKNOWN_REPOSITORY: &str = "unknown/repository";

/// An existing pull request tagged with its group name
///
/// Ungrouped pull requests always carry `group_name: None`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExistingPullRequest<'a> {
    pub group_name: Option<&'a str>,
    pub pull_request: &'a PullRequest,
}

impl<'a> ExistingPullRequest<'a> {
    /// Dependencies updated by the pull request
    pub fn dependencies(&self) -> &'a [PullRequestDependency] {
        &self.pull_request.dependencies
    }
}

/// Broad category of a job, derived from its package manager
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobCategory {
    /// Language ecosystems (bundler, npm_and_yarn, pip, ...)
    Language,
    /// Infrastructure tooling (docker, terraform)
    Infrastructure,
    /// CI/CD definitions (github_actions)
    CiCd,
    Other,
}

impl JobCategory {
    /// Categorizes a package manager name
    pub fn from_package_manager(package_manager: &str) -> Self {
        match package_manager {
            "bundler" | "npm_and_yarn" | "yarn" | "pip" | "composer" => JobCategory::Language,
            "docker" | "terraform" => JobCategory::Infrastructure,
            "github_actions" => JobCategory::CiCd,
            _ => JobCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            JobCategory::Language => "language",
            JobCategory::Infrastructure => "infrastructure",
            JobCategory::CiCd => "ci_cd",
            JobCategory::Other => "other",
        }
    }
}

impl fmt::Display for JobCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of a dependency for pull request matching: lowercased name,
/// plus trimmed lowercased version when versions are considered
type DependencyKey = (String, Option<String>);

fn dependency_key(name: &str, version: &str, consider_versions: bool) -> DependencyKey {
    (
        name.to_lowercase(),
        consider_versions.then(|| version.trim().to_lowercase()),
    )
}

impl Job {
    /// Directories to scan, in order
    ///
    /// `source.directory` comes first, followed by `source.directories`
    /// minus any repeat of the primary directory. Falls back to `["/"]`.
    pub fn all_directories(&self) -> Vec<&str> {
        let primary = self.source.directory.as_deref();
        let mut directories: Vec<&str> = primary.into_iter().collect();
        if let Some(extra) = &self.source.directories {
            directories.extend(
                extra
                    .iter()
                    .map(String::as_str)
                    .filter(|dir| Some(*dir) != primary),
            );
        }
        if directories.is_empty() {
            directories.push(ROOT_DIRECTORY);
        }
        directories
    }

    /// The primary directory, or `/` when the source names none
    pub fn primary_directory(&self) -> &str {
        self.source.directory.as_deref().unwrap_or(ROOT_DIRECTORY)
    }

    /// Dependency groups that apply to this run's mode
    pub fn relevant_dependency_groups(&self) -> Vec<&DependencyGroup> {
        let applies_to = if self.security_updates_only {
            SECURITY_UPDATES
        } else {
            VERSION_UPDATES
        };
        self.relevant_dependency_groups_for(applies_to)
    }

    /// Dependency groups whose `applies_to` equals `applies_to` exactly
    pub fn relevant_dependency_groups_for(&self, applies_to: &str) -> Vec<&DependencyGroup> {
        self.dependency_groups
            .iter()
            .filter(|group| group.applies_to.as_deref() == Some(applies_to))
            .collect()
    }

    /// Group pull requests followed by ungrouped ones
    pub fn all_existing_pull_requests(&self) -> Vec<ExistingPullRequest<'_>> {
        let grouped = self
            .existing_group_pull_requests
            .iter()
            .map(|pr| ExistingPullRequest {
                group_name: pr.dependency_group_name.as_deref(),
                pull_request: pr,
            });
        let ungrouped = self
            .existing_pull_requests
            .iter()
            .map(|pr| ExistingPullRequest {
                group_name: None,
                pull_request: pr,
            });
        grouped.chain(ungrouped).collect()
    }

    /// Finds the first existing pull request updating exactly `dependencies`
    ///
    /// Dependencies are compared as sets keyed by case-insensitive name and,
    /// when `consider_versions` is set, version. Returns `None` if any input
    /// dependency has no resolved version.
    pub fn existing_pull_request_for_dependencies<'d, I>(
        &self,
        dependencies: I,
        consider_versions: bool,
    ) -> Option<ExistingPullRequest<'_>>
    where
        I: IntoIterator<Item = &'d Dependency>,
    {
        let mut desired: HashSet<DependencyKey> = HashSet::new();
        for dependency in dependencies {
            let Some(version) = dependency.version.as_deref() else {
                tracing::debug!(dependency = %dependency.name, "unresolved version, no pull request match");
                return None;
            };
            desired.insert(dependency_key(&dependency.name, version, consider_versions));
        }

        let found = self.all_existing_pull_requests().into_iter().find(|pr| {
            let existing: HashSet<DependencyKey> = pr
                .dependencies()
                .iter()
                .map(|d| {
                    dependency_key(
                        &d.dependency_name,
                        d.dependency_version.as_str(),
                        consider_versions,
                    )
                })
                .collect();
            existing == desired
        });
        tracing::debug!(found = found.is_some(), consider_versions, "existing pull request lookup");
        found
    }

    /// Returns true if a name-only ignore condition matches `dependency_name`
    ///
    /// Conditions restricting versions or update types never count. A blank
    /// name is never ignored.
    pub fn is_dependency_ignored_by_name_only(&self, dependency_name: &str) -> bool {
        if dependency_name.trim().is_empty() {
            return false;
        }
        self.ignore_conditions
            .iter()
            .filter(|condition| condition.is_name_only())
            .any(|condition| condition.matches_name(dependency_name))
    }

    /// Job dependency names, de-duplicated in first-seen order
    pub fn dependency_names(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.dependencies
            .iter()
            .map(String::as_str)
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Job dependency names that the pull request also updates
    pub fn dependencies_for_pull_request(&self, pull_request: &PullRequest) -> Vec<&str> {
        self.dependencies
            .iter()
            .map(String::as_str)
            .filter(|name| pull_request.contains_dependency(name))
            .collect()
    }

    pub fn has_ignore_conditions(&self) -> bool {
        !self.ignore_conditions.is_empty()
    }

    pub fn has_dependency_groups(&self) -> bool {
        !self.dependency_groups.is_empty()
    }

    /// Repository name, or `unknown/repository` when the source has none
    pub fn repository_name(&self) -> &str {
        self.source.repo.as_deref().unwrap_or(UNKNOWN_REPOSITORY)
    }

    pub fn job_category(&self) -> JobCategory {
        JobCategory::from_package_manager(&self.package_manager)
    }
}

//! Existing pull requests known to a job
//!
//! Grouped and ungrouped pull requests share one type; a grouped pull
//! request carries the name of its dependency group.

use super::PackageVersion;
use crate::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency updated by an existing pull request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequestDependency {
    pub dependency_name: String,
    /// Version the pull request updates to
    pub dependency_version: PackageVersion,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
}

impl PullRequestDependency {
    /// Creates a pull request dependency
    pub fn new(dependency_name: impl Into<String>, dependency_version: PackageVersion) -> Self {
        Self {
            dependency_name: dependency_name.into(),
            dependency_version,
            directory: None,
        }
    }

    /// Sets the directory (builder pattern)
    pub fn in_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }
}

impl fmt::Display for PullRequestDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.dependency_name, self.dependency_version)
    }
}

/// An open pull request, optionally tied to a dependency group
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PullRequest {
    /// Dependency group name; set only for group pull requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_group_name: Option<String>,
    #[serde(default, deserialize_with = "normalize::null_as_default")]
    pub dependencies: Vec<PullRequestDependency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl PullRequest {
    /// Creates an ungrouped pull request
    pub fn new(dependencies: Vec<PullRequestDependency>) -> Self {
        Self {
            dependencies,
            ..Self::default()
        }
    }

    /// Creates a group pull request
    pub fn grouped(
        group_name: impl Into<String>,
        dependencies: Vec<PullRequestDependency>,
    ) -> Self {
        Self {
            dependency_group_name: Some(group_name.into()),
            dependencies,
            ..Self::default()
        }
    }

    /// Sets the pull request number (builder pattern)
    pub fn with_number(mut self, number: u64) -> Self {
        self.number = Some(number);
        self
    }

    /// Sets the pull request URL (builder pattern)
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Returns true if the pull request updates a named dependency
    pub fn contains_dependency(&self, name: &str) -> bool {
        self.dependencies.iter().any(|d| d.dependency_name == name)
    }
}

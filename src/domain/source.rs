//! Repository source of a job

use super::job::non_blank;
use crate::error::JobError;
use crate::normalize;
use serde::{Deserialize, Serialize};

/// Where the job's repository lives and which directories to scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSource {
    /// Hosting provider (e.g. "github"); never empty
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repo: Option<String>,
    /// Primary directory to scan
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<String>,
    /// Additional directories to scan
    #[serde(
        default,
        deserialize_with = "normalize::null_as_none_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub directories: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hostname: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

impl JobSource {
    /// Creates a source with only a provider
    ///
    /// # Panics
    ///
    /// Panics if `provider` is blank; use [`JobSource::try_new`] for
    /// untrusted input.
    pub fn new(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        assert!(!provider.trim().is_empty(), "source provider must not be empty");
        Self::with_provider(provider)
    }

    /// Creates a source with only a provider, rejecting a blank one
    pub fn try_new(provider: impl Into<String>) -> Result<Self, JobError> {
        non_blank("source.provider", provider.into()).map(Self::with_provider)
    }

    fn with_provider(provider: String) -> Self {
        Self {
            provider,
            repo: None,
            directory: None,
            directories: None,
            branch: None,
            hostname: None,
            api_endpoint: None,
        }
    }

    /// Sets the repository (builder pattern)
    pub fn with_repo(mut self, repo: impl Into<String>) -> Self {
        self.repo = Some(repo.into());
        self
    }

    /// Sets the primary directory (builder pattern)
    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    /// Sets the additional directories (builder pattern)
    pub fn with_directories<I, S>(mut self, directories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directories = Some(directories.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the branch (builder pattern)
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

//! Advisory, cooldown and commit message metadata

use serde::{Deserialize, Serialize};

/// A security advisory the job should resolve
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advisory {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ghsa_id: Option<String>,
    /// Affected package name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_name: Option<String>,
    /// Affected version range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub affected_versions: Option<String>,
    /// Patched version range
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub patched_versions: Option<String>,
}

impl Advisory {
    /// Creates an advisory with only an identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            description: None,
            severity: None,
            cve_id: None,
            ghsa_id: None,
            package_name: None,
            affected_versions: None,
            patched_versions: None,
        }
    }

    /// Returns true if the advisory targets the named package
    pub fn affects(&self, package_name: &str) -> bool {
        self.package_name
            .as_deref()
            .is_some_and(|name| name.eq_ignore_ascii_case(package_name))
    }
}

/// Delay applied to updates after a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cooldown {
    /// Duration in minutes
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Cooldown {
    /// Creates a cooldown of `duration` minutes
    pub fn new(duration: u64) -> Self {
        Self {
            duration,
            reason: None,
        }
    }

    /// Returns the duration as a std Duration
    pub fn as_duration(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.duration.saturating_mul(60))
    }
}

/// Commit message options for generated pull requests
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitOptions {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub include_scope: Option<bool>,
}

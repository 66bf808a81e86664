//! Dependency group configuration

use crate::normalize;
use serde::{Deserialize, Serialize};

/// `applies_to` value for groups used by security update runs
pub const SECURITY_UPDATES: &str = "security-updates";
/// `applies_to` value for groups used by version update runs
pub const VERSION_UPDATES: &str = "version-updates";

/// A named bucket of dependencies updated together
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyGroup {
    pub name: String,
    /// Run mode this group applies to; compared by exact string match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub applies_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<String>,
    /// Semver update types (e.g. "minor", "patch")
    #[serde(
        default,
        deserialize_with = "normalize::null_as_empty_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub update_types: Vec<String>,
    /// Name patterns of dependencies to include
    #[serde(
        default,
        deserialize_with = "normalize::null_as_empty_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub patterns: Vec<String>,
    /// Name patterns of dependencies to exclude
    #[serde(
        default,
        deserialize_with = "normalize::null_as_empty_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub exclude_patterns: Vec<String>,
}

impl DependencyGroup {
    /// Creates a group with only a name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            applies_to: None,
            dependency_type: None,
            update_types: Vec::new(),
            patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Sets what the group applies to (builder pattern)
    pub fn applies_to(mut self, applies_to: impl Into<String>) -> Self {
        self.applies_to = Some(applies_to.into());
        self
    }

    /// Sets include patterns (builder pattern)
    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns = patterns.into_iter().map(Into::into).collect();
        self
    }

    /// Sets exclude patterns (builder pattern)
    pub fn with_exclude_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_patterns = patterns.into_iter().map(Into::into).collect();
        self
    }
}

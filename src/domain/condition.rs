//! Ignore conditions

use crate::normalize;
use crate::query::glob_match;
use serde::{Deserialize, Serialize};

/// A rule suppressing updates for matching dependencies
///
/// A condition with no update types and no version requirement is a
/// name-only ignore: it suppresses every update of matching dependencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    /// Dependency name pattern (`*` and `?` wildcards)
    pub dependency_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_requirement: Option<String>,
    /// Update types to ignore (e.g. "version-update:semver-major")
    #[serde(
        default,
        deserialize_with = "normalize::null_as_none_strings",
        skip_serializing_if = "Option::is_none"
    )]
    pub update_types: Option<Vec<String>>,
}

impl Condition {
    /// Creates a name-only condition
    pub fn new(dependency_name: impl Into<String>) -> Self {
        Self {
            dependency_name: dependency_name.into(),
            version_requirement: None,
            update_types: None,
        }
    }

    /// Sets the version requirement (builder pattern)
    pub fn with_version_requirement(mut self, requirement: impl Into<String>) -> Self {
        self.version_requirement = Some(requirement.into());
        self
    }

    /// Sets the ignored update types (builder pattern)
    pub fn with_update_types<I, S>(mut self, update_types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.update_types = Some(update_types.into_iter().map(Into::into).collect());
        self
    }

    /// Returns true if the condition restricts neither versions nor update types
    pub fn is_name_only(&self) -> bool {
        self.version_requirement.is_none()
            && self.update_types.as_ref().is_none_or(Vec::is_empty)
    }

    /// Returns true if `name` matches the dependency name pattern
    pub fn matches_name(&self, name: &str) -> bool {
        glob_match(&self.dependency_name, name)
    }
}

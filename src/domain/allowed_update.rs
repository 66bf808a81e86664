//! Allow rules for updates

use super::UpdateType;
use crate::normalize;
use crate::query::glob_match;
use serde::{Deserialize, Serialize};

/// Which updates a job may perform for matching dependencies
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedUpdate {
    #[serde(default, deserialize_with = "normalize::null_as_default")]
    pub update_type: UpdateType,
    /// Dependency name pattern, may contain `*` wildcards
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_name: Option<String>,
    /// Dependency type (e.g. "direct", "indirect", "production")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_type: Option<String>,
}

impl AllowedUpdate {
    /// Creates an allow rule for a single update type
    pub fn new(update_type: UpdateType) -> Self {
        Self {
            update_type,
            ..Self::default()
        }
    }

    /// Restricts the rule to dependencies matching a name pattern (builder pattern)
    pub fn for_dependency(mut self, pattern: impl Into<String>) -> Self {
        self.dependency_name = Some(pattern.into());
        self
    }

    /// Restricts the rule to a dependency type (builder pattern)
    pub fn for_dependency_type(mut self, dependency_type: impl Into<String>) -> Self {
        self.dependency_type = Some(dependency_type.into());
        self
    }

    /// Returns true if the rule covers the named dependency
    ///
    /// A rule without a name pattern covers every dependency.
    pub fn matches_name(&self, name: &str) -> bool {
        self.dependency_name
            .as_deref()
            .is_none_or(|pattern| glob_match(pattern, name))
    }
}

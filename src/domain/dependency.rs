//! Dependency information structures

use crate::normalize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A dependency as seen by an update run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Package name; compared case-insensitively when matching pull requests
    pub name: String,
    /// Resolved version, absent when the updater could not resolve one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Requirement specs as written in manifests
    #[serde(
        default,
        deserialize_with = "normalize::null_as_empty_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub requirements: Vec<String>,
    /// Dependency groups (e.g. "dev", "test")
    #[serde(
        default,
        deserialize_with = "normalize::null_as_empty_strings",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Whether this is a transitive dependency
    #[serde(
        default,
        deserialize_with = "normalize::null_as_false",
        skip_serializing_if = "normalize::is_false"
    )]
    pub is_transitive: bool,
}

impl Dependency {
    /// Creates a dependency with no resolved version
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: None,
            requirements: Vec::new(),
            groups: Vec::new(),
            source: None,
            is_transitive: false,
        }
    }

    /// Creates a dependency with a resolved version
    pub fn with_version(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..Self::new(name)
        }
    }

    /// Marks this dependency as transitive (builder pattern)
    pub fn transitive(mut self) -> Self {
        self.is_transitive = true;
        self
    }

    /// Sets the requirement specs (builder pattern)
    pub fn with_requirements<I, S>(mut self, requirements: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.requirements = requirements.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if a version has been resolved
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{}@{}", self.name, version)?,
            None => write!(f, "{}", self.name)?,
        }
        if self.is_transitive {
            write!(f, " (transitive)")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dependency_new() {
        let dep = Dependency::new("Newtonsoft.Json");
        assert_eq!(dep.name, "Newtonsoft.Json");
        assert!(!dep.has_version());
        assert!(!dep.is_transitive);
        assert!(dep.requirements.is_empty());
    }

    #[test]
    fn test_dependency_with_version() {
        let dep = Dependency::with_version("rails", "7.1.0");
        assert_eq!(dep.version.as_deref(), Some("7.1.0"));
        assert!(dep.has_version());
    }

    #[test]
    fn test_dependency_display() {
        assert_eq!(Dependency::with_version("rails", "7.1.0").to_string(), "rails@7.1.0");
        assert_eq!(Dependency::new("rails").transitive().to_string(), "rails (transitive)");
    }

    #[test]
    fn test_deserialize_with_nulls() {
        let dep: Dependency = serde_json::from_value(json!({
            "name": "lodash",
            "version": null,
            "requirements": null,
            "groups": null,
            "is_transitive": null
        }))
        .unwrap();
        assert_eq!(dep, Dependency::new("lodash"));
    }

    #[test]
    fn test_deserialize_full() {
        let dep: Dependency = serde_json::from_value(json!({
            "name": "lodash",
            "version": "4.17.21",
            "requirements": ["^4.17.0"],
            "groups": ["dependencies"],
            "source": "npm",
            "is_transitive": true
        }))
        .unwrap();
        assert_eq!(dep.requirements, vec!["^4.17.0"]);
        assert_eq!(dep.groups, vec!["dependencies"]);
        assert_eq!(dep.source.as_deref(), Some("npm"));
        assert!(dep.is_transitive);
    }

    #[test]
    fn test_deserialize_requires_name() {
        assert!(serde_json::from_value::<Dependency>(json!({"version": "1.0.0"})).is_err());
    }

    #[test]
    fn test_serialize_is_compact() {
        let json = serde_json::to_value(Dependency::with_version("rails", "7.1.0")).unwrap();
        assert_eq!(json, json!({"name": "rails", "version": "7.1.0"}));
    }
}

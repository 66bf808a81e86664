//! Requirements update strategy vocabulary

use crate::error::UnknownEnumValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How version requirements in manifests are rewritten during an update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum RequirementsUpdateStrategy {
    /// Let the updater pick the best strategy
    Auto,
    /// Widen ranges to include the new version
    Widen,
    /// Raise requirements to the new version
    Increase,
    /// Raise requirements only when the new version falls outside them
    IncreaseIfNecessary,
    /// Only touch the lockfile
    LockfileOnly,
    /// Bump versions according to requirements
    BumpVersions,
}

impl RequirementsUpdateStrategy {
    /// Returns the wire tag for this strategy
    pub fn as_str(&self) -> &'static str {
        match self {
            RequirementsUpdateStrategy::Auto => "auto",
            RequirementsUpdateStrategy::Widen => "widen",
            RequirementsUpdateStrategy::Increase => "increase",
            RequirementsUpdateStrategy::IncreaseIfNecessary => "increase_if_necessary",
            RequirementsUpdateStrategy::LockfileOnly => "lockfile_only",
            RequirementsUpdateStrategy::BumpVersions => "bump_versions",
        }
    }

    /// Returns all strategies
    pub fn all() -> &'static [RequirementsUpdateStrategy] {
        &[
            RequirementsUpdateStrategy::Auto,
            RequirementsUpdateStrategy::Widen,
            RequirementsUpdateStrategy::Increase,
            RequirementsUpdateStrategy::IncreaseIfNecessary,
            RequirementsUpdateStrategy::LockfileOnly,
            RequirementsUpdateStrategy::BumpVersions,
        ]
    }
}

impl FromStr for RequirementsUpdateStrategy {
    type Err = UnknownEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|strategy| strategy.as_str() == s)
            .ok_or_else(|| UnknownEnumValue::new("requirements update strategy", s))
    }
}

impl TryFrom<String> for RequirementsUpdateStrategy {
    type Error = UnknownEnumValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for RequirementsUpdateStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

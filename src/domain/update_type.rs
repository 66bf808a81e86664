//! Update type vocabulary for allowed updates

use crate::error::UnknownEnumValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of update an allow rule permits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum UpdateType {
    /// Security updates only
    Security,
    /// Version updates (patch, minor and major)
    Version,
    /// Any update
    #[default]
    All,
}

impl UpdateType {
    /// Returns the wire tag for this update type
    pub fn as_str(&self) -> &'static str {
        match self {
            UpdateType::Security => "security",
            UpdateType::Version => "version",
            UpdateType::All => "all",
        }
    }

    /// Returns all update types
    pub fn all() -> &'static [UpdateType] {
        &[UpdateType::Security, UpdateType::Version, UpdateType::All]
    }
}

impl FromStr for UpdateType {
    type Err = UnknownEnumValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownEnumValue::new("update type", s))
    }
}

impl TryFrom<String> for UpdateType {
    type Error = UnknownEnumValue;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for UpdateType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all() {
        assert_eq!(UpdateType::default(), UpdateType::All);
    }

    #[test]
    fn test_from_str() {
        assert_eq!("security".parse::<UpdateType>(), Ok(UpdateType::Security));
        assert_eq!("version".parse::<UpdateType>(), Ok(UpdateType::Version));
        assert_eq!("all".parse::<UpdateType>(), Ok(UpdateType::All));
    }

    #[test]
    fn test_from_str_is_case_sensitive() {
        let err = "Security".parse::<UpdateType>().unwrap_err();
        assert_eq!(err.value, "Security");
        assert_eq!(err.kind, "update type");
    }

    #[test]
    fn test_serde_serialization() {
        assert_eq!(
            serde_json::to_string(&UpdateType::Security).unwrap(),
            "\"security\""
        );
        assert_eq!(serde_json::to_string(&UpdateType::All).unwrap(), "\"all\"");
    }

    #[test]
    fn test_serde_deserialization() {
        let t: UpdateType = serde_json::from_str("\"version\"").unwrap();
        assert_eq!(t, UpdateType::Version);
    }

    #[test]
    fn test_serde_rejects_unknown_tag() {
        let err = serde_json::from_str::<UpdateType>("\"sometimes\"").unwrap_err();
        assert!(err.to_string().contains("unknown update type value 'sometimes'"));
    }

    #[test]
    fn test_display_trait() {
        assert_eq!(format!("{}", UpdateType::Version), "version");
    }
}

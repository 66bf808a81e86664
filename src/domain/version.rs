//! Structured package versions
//!
//! Accepts NuGet/semver-style versions:
//! - `1`, `1.2`, `1.2.3`, `1.2.3.4` (one to four numeric segments)
//! - optional prerelease label: `1.2.3-beta.1`
//! - optional build metadata: `1.2.3+sha.5114f85`
//!
//! Labels are validated with the `semver` crate's identifier rules.

use crate::error::InvalidVersion;
use regex::Regex;
use semver::{BuildMetadata, Prerelease};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+(?:\.\d+){0,3})(?:-([0-9A-Za-z.-]+))?(?:\+([0-9A-Za-z.-]+))?$").unwrap()
});

/// A parsed package version that remembers its original text
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PackageVersion {
    original: String,
    release: Vec<u64>,
    pre: Prerelease,
    build: BuildMetadata,
}

impl PackageVersion {
    /// Parses a version string
    pub fn parse(input: &str) -> Result<Self, InvalidVersion> {
        let trimmed = input.trim();
        let caps = VERSION_RE.captures(trimmed).ok_or_else(|| {
            InvalidVersion::new(input, "expected MAJOR[.MINOR[.PATCH[.REVISION]]][-PRE][+BUILD]")
        })?;

        let release = caps[1]
            .split('.')
            .map(|segment| {
                segment
                    .parse::<u64>()
                    .map_err(|e| InvalidVersion::new(input, e.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let pre = match caps.get(2) {
            Some(m) => Prerelease::new(m.as_str())
                .map_err(|e| InvalidVersion::new(input, e.to_string()))?,
            None => Prerelease::EMPTY,
        };
        let build = match caps.get(3) {
            Some(m) => BuildMetadata::new(m.as_str())
                .map_err(|e| InvalidVersion::new(input, e.to_string()))?,
            None => BuildMetadata::EMPTY,
        };

        Ok(Self {
            original: trimmed.to_string(),
            release,
            pre,
            build,
        })
    }

    /// Returns the version exactly as it was written
    pub fn as_str(&self) -> &str {
        &self.original
    }

    fn segment(&self, index: usize) -> u64 {
        self.release.get(index).copied().unwrap_or(0)
    }

    pub fn major(&self) -> u64 {
        self.segment(0)
    }

    pub fn minor(&self) -> u64 {
        self.segment(1)
    }

    pub fn patch(&self) -> u64 {
        self.segment(2)
    }

    /// Fourth numeric segment (NuGet legacy versions), zero when absent
    pub fn revision(&self) -> u64 {
        self.segment(3)
    }

    /// Returns true if the version carries a prerelease label
    pub fn is_prerelease(&self) -> bool {
        !self.pre.is_empty()
    }

    /// Prerelease label, empty when absent
    pub fn prerelease(&self) -> &str {
        self.pre.as_str()
    }

    /// Build metadata, empty when absent
    pub fn build_metadata(&self) -> &str {
        self.build.as_str()
    }

    /// Normalized form: three release segments, revision only when non-zero,
    /// prerelease kept and build metadata dropped
    pub fn normalized(&self) -> String {
        let mut result = format!("{}.{}.{}", self.major(), self.minor(), self.patch());
        if self.revision() > 0 {
            result.push_str(&format!(".{}", self.revision()));
        }
        if self.is_prerelease() {
            result.push('-');
            result.push_str(self.pre.as_str());
        }
        result
    }

    /// Converts to a semver version when no revision segment is in use
    pub fn to_semver(&self) -> Option<semver::Version> {
        if self.revision() > 0 {
            return None;
        }
        Some(semver::Version {
            major: self.major(),
            minor: self.minor(),
            patch: self.patch(),
            pre: self.pre.clone(),
            build: self.build.clone(),
        })
    }

    /// Orders by release segments, then prerelease; build metadata is ignored
    pub fn cmp_precedence(&self, other: &Self) -> Ordering {
        (0..4)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or_else(|| self.pre.cmp(&other.pre))
    }
}

impl FromStr for PackageVersion {
    type Err = InvalidVersion;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for PackageVersion {
    type Error = InvalidVersion;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PackageVersion> for String {
    fn from(version: PackageVersion) -> Self {
        version.original
    }
}

impl fmt::Display for PackageVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> PackageVersion {
        PackageVersion::parse(s).unwrap()
    }

    #[test]
    fn test_parse_three_segments() {
        let version = v("1.2.3");
        assert_eq!(version.major(), 1);
        assert_eq!(version.minor(), 2);
        assert_eq!(version.patch(), 3);
        assert_eq!(version.revision(), 0);
        assert!(!version.is_prerelease());
    }

    #[test]
    fn test_parse_short_and_legacy_forms() {
        assert_eq!(v("2").normalized(), "2.0.0");
        assert_eq!(v("2.1").normalized(), "2.1.0");
        assert_eq!(v("4.0.0.0").normalized(), "4.0.0");
        assert_eq!(v("4.0.0.7").normalized(), "4.0.0.7");
    }

    #[test]
    fn test_parse_prerelease_and_build() {
        let version = v("1.0.0-beta.2+sha.5114f85");
        assert!(version.is_prerelease());
        assert_eq!(version.prerelease(), "beta.2");
        assert_eq!(version.build_metadata(), "sha.5114f85");
        assert_eq!(version.normalized(), "1.0.0-beta.2");
    }

    #[test]
    fn test_parse_rejects_invalid() {
        for input in ["", "abc", "1.x", "1.2.3.4.5", "v1.0.0", "1.0.0-", "1.0.0-01", "1..2"] {
            assert!(PackageVersion::parse(input).is_err(), "accepted {:?}", input);
        }
    }

    #[test]
    fn test_parse_rejects_overflow() {
        let err = PackageVersion::parse("99999999999999999999.0.0").unwrap_err();
        assert_eq!(err.value, "99999999999999999999.0.0");
    }

    #[test]
    fn test_display_keeps_original_text() {
        assert_eq!(v("1.0").to_string(), "1.0");
        assert_eq!(v(" 1.0.0 ").to_string(), "1.0.0");
    }

    #[test]
    fn test_cmp_precedence() {
        assert_eq!(v("1.0").cmp_precedence(&v("1.0.0")), Ordering::Equal);
        assert_eq!(v("1.0.0").cmp_precedence(&v("1.0.1")), Ordering::Less);
        assert_eq!(v("1.0.0.1").cmp_precedence(&v("1.0.0")), Ordering::Greater);
        assert_eq!(v("1.0.0-alpha").cmp_precedence(&v("1.0.0")), Ordering::Less);
        assert_eq!(
            v("1.0.0-alpha").cmp_precedence(&v("1.0.0-beta")),
            Ordering::Less
        );
        assert_eq!(v("1.0.0+a").cmp_precedence(&v("1.0.0+b")), Ordering::Equal);
    }

    #[test]
    fn test_to_semver() {
        let semver = v("1.2.3-rc.1").to_semver().unwrap();
        assert_eq!(semver, semver::Version::parse("1.2.3-rc.1").unwrap());
        assert!(v("1.2.3.4").to_semver().is_none());
    }

    #[test]
    fn test_serde_round_trip_uses_original_string() {
        let json = serde_json::to_string(&v("1.0")).unwrap();
        assert_eq!(json, "\"1.0\"");
        let parsed: PackageVersion = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, v("1.0"));
    }

    #[test]
    fn test_serde_rejects_invalid() {
        let err = serde_json::from_str::<PackageVersion>("\"not-a-version\"").unwrap_err();
        assert!(err.to_string().contains("invalid package version"));
    }
}

//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of inspection reports
//! - Dependency list and counts in verbose mode

use crate::inspect::{InspectionReport, PullRequestLookup, PullRequestMatch};
use crate::output::{OutputFormatter, Verbosity};
use crate::query::JobCategory;
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    package_manager: &'a str,
    category: JobCategory,
    repository: &'a str,
    security_updates_only: bool,
    directories: &'a [String],
    relevant_groups: &'a [String],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    ignore_checks: Vec<JsonIgnoreCheck<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pull_request: Option<JsonLookup<'a>>,
    /// Only in verbose mode
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<JsonDetails<'a>>,
}

/// JSON representation of a name-only ignore check
#[derive(Serialize)]
struct JsonIgnoreCheck<'a> {
    name: &'a str,
    ignored: bool,
}

/// JSON representation of a pull request lookup
#[derive(Serialize)]
struct JsonLookup<'a> {
    requested: &'a [String],
    consider_versions: bool,
    /// `null` when no existing pull request matches
    found: Option<JsonPullRequest<'a>>,
}

/// JSON representation of a matched pull request
#[derive(Serialize)]
struct JsonPullRequest<'a> {
    group: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<&'a str>,
    dependencies: &'a [String],
}

/// JSON representation of verbose details
#[derive(Serialize)]
struct JsonDetails<'a> {
    dependencies: &'a [String],
    existing_pull_requests: usize,
    ignore_conditions: usize,
}

impl JsonFormatter {
    /// Convert a pull request lookup to JSON representation
    fn lookup_to_json(lookup: &PullRequestLookup) -> JsonLookup<'_> {
        JsonLookup {
            requested: &lookup.requested,
            consider_versions: lookup.consider_versions,
            found: lookup.found.as_ref().map(Self::match_to_json),
        }
    }

    fn match_to_json(found: &PullRequestMatch) -> JsonPullRequest<'_> {
        JsonPullRequest {
            group: found.group_name.as_deref(),
            number: found.number,
            url: found.url.as_deref(),
            dependencies: &found.dependencies,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &InspectionReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let details = (self.verbosity == Verbosity::Verbose).then(|| JsonDetails {
            dependencies: &report.dependencies,
            existing_pull_requests: report.existing_pull_requests,
            ignore_conditions: report.ignore_conditions,
        });

        let output = JsonOutput {
            package_manager: &report.package_manager,
            category: report.category,
            repository: &report.repository,
            security_updates_only: report.security_updates_only,
            directories: &report.directories,
            relevant_groups: &report.relevant_groups,
            ignore_checks: report
                .ignore_checks
                .iter()
                .map(|check| JsonIgnoreCheck {
                    name: &check.name,
                    ignored: check.ignored,
                })
                .collect(),
            pull_request: report.pull_request_lookup.as_ref().map(Self::lookup_to_json),
            details,
        };

        let json = serde_json::to_string_pretty(&output).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspect::IgnoreCheck;

    fn create_test_report() -> InspectionReport {
        InspectionReport {
            package_manager: "npm_and_yarn".to_string(),
            category: JobCategory::Language,
            repository: "owner/repo".to_string(),
            security_updates_only: false,
            directories: vec!["/".to_string(), "/web".to_string()],
            relevant_groups: vec!["dev".to_string()],
            dependencies: vec!["jest".to_string()],
            existing_pull_requests: 1,
            ignore_conditions: 2,
            ignore_checks: vec![IgnoreCheck {
                name: "@types/node".to_string(),
                ignored: true,
            }],
            pull_request_lookup: Some(PullRequestLookup {
                requested: vec!["jest@29.7.0".to_string()],
                consider_versions: true,
                found: Some(PullRequestMatch {
                    group_name: Some("dev".to_string()),
                    number: Some(12),
                    url: None,
                    dependencies: vec!["jest@29.7.0".to_string()],
                }),
            }),
        }
    }

    fn render(formatter: &JsonFormatter, report: &InspectionReport) -> serde_json::Value {
        let mut output = Vec::new();
        formatter.format(report, &mut output).unwrap();
        serde_json::from_slice(&output).unwrap()
    }

    #[test]
    fn test_json_formatter_new() {
        let formatter = JsonFormatter::new(Verbosity::Normal);
        assert_eq!(formatter.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_format_json() {
        let parsed = render(&JsonFormatter::new(Verbosity::Normal), &create_test_report());

        assert_eq!(parsed["package_manager"], "npm_and_yarn");
        assert_eq!(parsed["category"], "language");
        assert_eq!(parsed["repository"], "owner/repo");
        assert_eq!(parsed["directories"][1], "/web");
        assert_eq!(parsed["relevant_groups"][0], "dev");
        assert_eq!(parsed["ignore_checks"][0]["ignored"], true);
        assert_eq!(parsed["pull_request"]["found"]["group"], "dev");
        assert_eq!(parsed["pull_request"]["found"]["number"], 12);
        assert!(parsed["pull_request"]["found"].get("url").is_none());
        assert!(parsed.get("details").is_none());
    }

    #[test]
    fn test_format_json_verbose() {
        let parsed = render(&JsonFormatter::new(Verbosity::Verbose), &create_test_report());

        assert_eq!(parsed["details"]["dependencies"][0], "jest");
        assert_eq!(parsed["details"]["existing_pull_requests"], 1);
        assert_eq!(parsed["details"]["ignore_conditions"], 2);
    }

    #[test]
    fn test_format_json_without_queries() {
        let report = InspectionReport {
            ignore_checks: Vec::new(),
            pull_request_lookup: None,
            ..create_test_report()
        };
        let parsed = render(&JsonFormatter::new(Verbosity::Normal), &report);

        assert!(parsed.get("ignore_checks").is_none());
        assert!(parsed.get("pull_request").is_none());
    }

    #[test]
    fn test_format_json_lookup_not_found() {
        let mut report = create_test_report();
        if let Some(lookup) = report.pull_request_lookup.as_mut() {
            lookup.found = None;
        }
        let parsed = render(&JsonFormatter::new(Verbosity::Normal), &report);

        assert!(parsed["pull_request"]["found"].is_null());
        assert_eq!(parsed["pull_request"]["requested"][0], "jest@29.7.0");
    }
}

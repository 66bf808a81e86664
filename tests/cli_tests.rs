//! End-to-end tests for the depjob CLI
//!
//! These tests verify:
//! - Text and JSON reports for a job file
//! - Ignore checks and pull request lookups from flags
//! - Exit codes for unreadable or invalid job files

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const JOB: &str = r#"{
  "job": {
    "package_manager": "bundler",
    "source": {
      "provider": "github",
      "repo": "acme/shop",
      "directory": "/",
      "directories": ["/", "/engines/billing"]
    },
    "dependencies": ["rails", "rack"],
    "dependency_groups": [
      {"name": "rails-stack", "applies_to": "version-updates", "patterns": ["rails*"]},
      {"name": "security-fixes", "applies_to": "security-updates"}
    ],
    "existing_pull_requests": [
      {"dependencies": [{"dependency_name": "rack", "dependency_version": "3.0.8"}], "number": 41}
    ],
    "existing_group_pull_requests": [
      {
        "dependency_group_name": "rails-stack",
        "dependencies": [
          {"dependency_name": "rails", "dependency_version": "7.1.3"},
          {"dependency_name": "railties", "dependency_version": "7.1.3"}
        ],
        "number": 42
      }
    ],
    "ignore_conditions": [
      {"dependency_name": "rubocop*", "update_types": null},
      {"dependency_name": "rails", "version_requirement": ">= 8"}
    ],
    "security_updates_only": null,
    "debug": null
  }
}"#;

/// Create a temp directory holding a job file
fn create_job_file(content: &str) -> (TempDir, std::path::PathBuf) {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = temp_dir.path().join("job.json");
    fs::write(&path, content).unwrap();
    (temp_dir, path)
}

fn depjob() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_depjob"));
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn json_report(args: &[&str]) -> serde_json::Value {
    let (_dir, path) = create_job_file(JOB);
    let output = depjob()
        .arg(&path)
        .arg("--json")
        .args(args)
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

mod text_output {
    use super::*;

    #[test]
    fn test_overview() {
        let (_dir, path) = create_job_file(JOB);
        depjob()
            .arg(&path)
            .assert()
            .success()
            .stdout(predicate::str::contains("acme/shop (bundler, language)"))
            .stdout(predicate::str::contains("version updates"))
            .stdout(predicate::str::contains("/, /engines/billing"))
            .stdout(predicate::str::contains("rails-stack"))
            .stdout(predicate::str::contains("security-fixes").not());
    }

    #[test]
    fn test_ignore_checks() {
        let (_dir, path) = create_job_file(JOB);
        depjob()
            .arg(&path)
            .args(["--ignored", "rubocop-rails", "--ignored", "rails"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Ignore checks:"))
            .stdout(predicate::str::contains("not ignored"));
    }

    #[test]
    fn test_find_group_pull_request() {
        let (_dir, path) = create_job_file(JOB);
        depjob()
            .arg(&path)
            .args(["--find-pr", "Railties@7.1.3", "--find-pr", "rails@7.1.3"])
            .assert()
            .success()
            .stdout(predicate::str::contains("found #42 (group: rails-stack)"));
    }

    #[test]
    fn test_verbose_lists_dependencies() {
        let (_dir, path) = create_job_file(JOB);
        depjob()
            .arg(&path)
            .arg("--verbose")
            .assert()
            .success()
            .stdout(predicate::str::contains("Dependencies:"))
            .stdout(predicate::str::contains("2 dependencies, 2 existing pull request(s)"));
    }
}

mod json_output {
    use super::*;

    #[test]
    fn test_schema() {
        let report = json_report(&[]);
        assert_eq!(report["package_manager"], "bundler");
        assert_eq!(report["category"], "language");
        assert_eq!(report["repository"], "acme/shop");
        assert_eq!(report["security_updates_only"], false);
        assert_eq!(report["directories"], serde_json::json!(["/", "/engines/billing"]));
        assert_eq!(report["relevant_groups"], serde_json::json!(["rails-stack"]));
        assert!(report.get("pull_request").is_none());
    }

    #[test]
    fn test_ignore_checks() {
        let report = json_report(&["--ignored", "rubocop-rails", "--ignored", "rails"]);
        assert_eq!(report["ignore_checks"][0]["ignored"], true);
        assert_eq!(report["ignore_checks"][1]["ignored"], false);
    }

    #[test]
    fn test_pull_request_versions_considered() {
        let report = json_report(&["--find-pr", "rack@3.1.0"]);
        assert!(report["pull_request"]["found"].is_null());

        let report = json_report(&["--find-pr", "rack@3.1.0", "--ignore-versions"]);
        assert_eq!(report["pull_request"]["consider_versions"], false);
        assert_eq!(report["pull_request"]["found"]["number"], 41);
        assert!(report["pull_request"]["found"]["group"].is_null());
    }

    #[test]
    fn test_pull_request_unresolved_version() {
        let report = json_report(&["--find-pr", "rack", "--ignore-versions"]);
        assert!(report["pull_request"]["found"].is_null());
    }
}

mod exit_codes {
    use super::*;

    #[test]
    fn test_missing_file() {
        depjob()
            .arg("/nonexistent/depjob/job.json")
            .assert()
            .failure()
            .code(1)
            .stderr(predicate::str::contains("failed to read job file"));
    }

    #[test]
    fn test_invalid_json() {
        let (_dir, path) = create_job_file("{ not json");
        depjob()
            .arg(&path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("failed to parse job JSON"));
    }

    #[test]
    fn test_missing_source_provider() {
        let (_dir, path) = create_job_file(r#"{"source": {"repo": "acme/shop"}}"#);
        depjob()
            .arg(&path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("source.provider"));
    }

    #[test]
    fn test_unknown_update_type() {
        let (_dir, path) = create_job_file(
            r#"{"source": {"provider": "github"}, "allowed_updates": [{"update_type": "major"}]}"#,
        );
        depjob()
            .arg(&path)
            .assert()
            .code(1)
            .stderr(predicate::str::contains("allowed_updates[0].update_type"));
    }

    #[test]
    fn test_missing_argument() {
        depjob().assert().failure();
    }
}

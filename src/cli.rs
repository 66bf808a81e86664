//! CLI argument parsing module for depjob

use crate::domain::Dependency;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Parse a pull request lookup in format: NAME@VERSION
///
/// The last `@` separates the version, so scoped names such as
/// `@types/node@20.0.0` work. A bare NAME yields a dependency with no
/// resolved version.
fn parse_dependency(s: &str) -> Result<Dependency, String> {
    let s = s.trim();
    let (name, version) = match s.rsplit_once('@') {
        Some((name, version)) if !name.is_empty() => (name, Some(version)),
        _ => (s, None),
    };
    if name.is_empty() {
        return Err("empty dependency name".to_string());
    }
    match version {
        Some("") => Err(format!("missing version after '@' in: {}", s)),
        Some(version) => Ok(Dependency::with_version(name, version)),
        None => Ok(Dependency::new(name)),
    }
}

/// Dependency update job inspector
#[derive(Parser, Debug, Clone)]
#[command(name = "depjob", version, about = "Dependency update job inspector")]
pub struct CliArgs {
    /// Job file (bare job object or {"job": {...}} document)
    pub job_file: PathBuf,

    // Output options
    /// Output the report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output and debug logging
    #[arg(long)]
    pub verbose: bool,

    // Queries
    /// Check whether a dependency is ignored by name (can be specified multiple times)
    #[arg(long, action = ArgAction::Append, value_name = "NAME")]
    pub ignored: Vec<String>,

    /// Dependency of the pull request to look up (can be specified multiple times)
    #[arg(long, action = ArgAction::Append, value_name = "NAME@VERSION", value_parser = parse_dependency)]
    pub find_pr: Vec<Dependency>,

    /// Match existing pull requests by dependency name only
    #[arg(long)]
    pub ignore_versions: bool,
}

impl CliArgs {
    /// Check if a pull request lookup was requested
    pub fn has_pull_request_lookup(&self) -> bool {
        !self.find_pr.is_empty()
    }

    /// Whether versions take part in pull request matching
    pub fn consider_versions(&self) -> bool {
        !self.ignore_versions
    }
}

//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Job overview with colors (repository, mode, directories, groups)
//! - Ignore check results aligned by name
//! - Pull request lookup outcome
//! - Dependency list and counts in verbose mode

use crate::inspect::{IgnoreCheck, InspectionReport, PullRequestLookup};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Minimum width of the name column
const MIN_NAME_WIDTH: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Section heading, bold when colored
    fn heading(&self, text: &str) -> String {
        if self.color {
            format!("{}:", text.bold())
        } else {
            format!("{}:", text)
        }
    }

    /// Comma separated list, or "(none)"
    fn list(&self, items: &[String]) -> String {
        if items.is_empty() {
            if self.color {
                "(none)".dimmed().to_string()
            } else {
                "(none)".to_string()
            }
        } else {
            items.join(", ")
        }
    }

    fn format_overview(
        &self,
        report: &InspectionReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let mode = if report.security_updates_only {
            "security updates"
        } else {
            "version updates"
        };

        if self.color {
            writeln!(
                writer,
                "{} {}",
                report.repository.bold(),
                format!("({}, {})", report.package_manager, report.category).dimmed()
            )?;
            writeln!(writer, "  {:13} {}", "Mode:", mode.cyan())?;
        } else {
            writeln!(
                writer,
                "{} ({}, {})",
                report.repository, report.package_manager, report.category
            )?;
            writeln!(writer, "  {:13} {}", "Mode:", mode)?;
        }
        writeln!(writer, "  {:13} {}", "Directories:", self.list(&report.directories))?;
        writeln!(writer, "  {:13} {}", "Groups:", self.list(&report.relevant_groups))?;
        Ok(())
    }

    fn format_ignore_checks(
        &self,
        checks: &[IgnoreCheck],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", self.heading("Ignore checks"))?;

        let width = checks
            .iter()
            .map(|c| c.name.len())
            .max()
            .unwrap_or(0)
            .max(MIN_NAME_WIDTH);

        for check in checks {
            let name_display = format!("{:width$}", check.name, width = width);
            match (check.ignored, self.color) {
                (true, true) => writeln!(writer, "  {} {}", name_display, "ignored".yellow())?,
                (false, true) => writeln!(writer, "  {} {}", name_display, "not ignored".dimmed())?,
                (true, false) => writeln!(writer, "  {} ignored", name_display)?,
                (false, false) => writeln!(writer, "  {} not ignored", name_display)?,
            }
        }
        Ok(())
    }

    fn format_lookup(
        &self,
        lookup: &PullRequestLookup,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let basis = if lookup.consider_versions {
            "by name and version"
        } else {
            "by name"
        };
        writeln!(writer)?;
        writeln!(writer, "{} ({})", self.heading("Pull request lookup"), basis)?;
        writeln!(writer, "  {}", lookup.requested.join(", "))?;

        let Some(found) = &lookup.found else {
            if self.color {
                writeln!(writer, "  {} {}", "→".dimmed(), "no existing pull request".dimmed())?;
            } else {
                writeln!(writer, "  -> no existing pull request")?;
            }
            return Ok(());
        };

        let number = found
            .number
            .map(|n| format!("#{}", n))
            .unwrap_or_else(|| "pull request".to_string());
        let group = found
            .group_name
            .as_deref()
            .map(|g| format!(" (group: {})", g))
            .unwrap_or_default();

        if self.color {
            writeln!(writer, "  {} found {}{}", "→".dimmed(), number.green().bold(), group)?;
        } else {
            writeln!(writer, "  -> found {}{}", number, group)?;
        }
        if let Some(url) = &found.url {
            writeln!(writer, "     {}", url)?;
        }
        Ok(())
    }

    fn format_details(
        &self,
        report: &InspectionReport,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        writeln!(writer)?;
        writeln!(writer, "{}", self.heading("Dependencies"))?;
        if report.dependencies.is_empty() {
            writeln!(writer, "  {}", self.list(&report.dependencies))?;
        }
        for name in &report.dependencies {
            writeln!(writer, "  {}", name)?;
        }

        writeln!(writer)?;
        writeln!(writer, "{}", self.heading("Summary"))?;
        writeln!(
            writer,
            "  {} dependencies, {} existing pull request(s), {} ignore condition(s)",
            report.dependencies.len(),
            report.existing_pull_requests,
            report.ignore_conditions
        )?;
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &InspectionReport, writer: &mut dyn Write) -> std::io::Result<()> {
        self.format_overview(report, writer)?;

        if !report.ignore_checks.is_empty() {
            self.format_ignore_checks(&report.ignore_checks, writer)?;
        }

        if let Some(lookup) = &report.pull_request_lookup {
            self.format_lookup(lookup, writer)?;
        }

        if self.verbosity == Verbosity::Verbose {
            self.format_details(report, writer)?;
        }

        Ok(())
    }
}

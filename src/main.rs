//! depjob - Dependency update job inspector
//!
//! Loads a job file and reports what an update run would see:
//! - Package manager, category and repository
//! - Directories and relevant dependency groups
//! - Name-only ignore checks and existing pull request lookups

use anyhow::Context;
use clap::Parser;
use depjob::cli::CliArgs;
use depjob::inspect::{InspectionReport, InspectionRequest};
use depjob::load_job_file;
use depjob::output::{create_formatter, OutputConfig};
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = CliArgs::parse();
    depjob::logging::init(args.verbose);

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Main application logic
fn run(args: &CliArgs) -> anyhow::Result<()> {
    tracing::debug!(path = %args.job_file.display(), "loading job");
    let job = load_job_file(&args.job_file)
        .with_context(|| format!("cannot inspect {}", args.job_file.display()))?;

    let report = InspectionReport::build(&job, &InspectionRequest::from_cli(args));

    let formatter = create_formatter(OutputConfig::from_cli(args.json, args.verbose));
    let mut stdout = io::stdout().lock();
    formatter.format(&report, &mut stdout)?;
    stdout.flush()?;

    Ok(())
}

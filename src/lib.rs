//! depjob - Dependency update job model library
//!
//! This library provides the job description consumed by a dependency
//! update run:
//! - Typed job records with null-tolerant JSON decoding
//! - Queries over a job (directories, groups, ignores, existing pull requests)
//! - Job file loading and the `depjob` inspector front end

pub mod cli;
pub mod domain;
pub mod error;
pub mod inspect;
pub mod loader;
pub mod logging;
pub mod normalize;
pub mod output;
pub mod query;

pub use domain::Job;
pub use error::JobError;
pub use loader::load_job_file;

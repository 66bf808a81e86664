//! Core domain models for dependency-update jobs
//!
//! This module contains the entities that make up a job:
//! - Closed vocabularies (update types, requirements update strategies)
//! - Value entities (dependencies, allow rules, ignore conditions, metadata)
//! - Composite entities (sources, dependency groups, pull requests)
//! - The `Job` aggregate and its wire decoding

mod allowed_update;
mod condition;
mod dependency;
mod group;
mod job;
mod metadata;
mod pull_request;
mod requirements_update_strategy;
mod source;
mod update_type;
mod version;

pub use allowed_update::AllowedUpdate;
pub use condition::Condition;
pub use dependency::Dependency;
pub use group::{DependencyGroup, SECURITY_UPDATES, VERSION_UPDATES};
pub use job::{Job, Settings, DEFAULT_PACKAGE_MANAGER};
pub use metadata::{Advisory, CommitOptions, Cooldown};
pub use pull_request::{PullRequest, PullRequestDependency};
pub use requirements_update_strategy::RequirementsUpdateStrategy;
pub use source::JobSource;
pub use update_type::UpdateType;
pub use version::PackageVersion;

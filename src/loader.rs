//! Job file loading
//!
//! A job file holds either a bare job object or a job-definition document
//! wrapping it as `{ "job": { ... } }`.

use crate::domain::Job;
use crate::error::JobError;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Key wrapping the job in a job-definition document
pub const JOB_WRAPPER_KEY: &str = "job";

/// Reads and decodes a job file
pub fn load_job_file(path: impl AsRef<Path>) -> Result<Job, JobError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| JobError::read(path, e))?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "read job file");
    parse_job_document(&content)
}

/// Decodes a job document, unwrapping a job-definition wrapper if present
pub fn parse_job_document(content: &str) -> Result<Job, JobError> {
    let document: Value = serde_json::from_str(content).map_err(JobError::Syntax)?;
    Job::from_value(unwrap_job(document))
}

/// Returns the inner job of a wrapper document, or the document itself
///
/// A document counts as a wrapper only when `job` holds an object and the
/// document has no `source` of its own.
fn unwrap_job(document: Value) -> Value {
    match document {
        Value::Object(mut map)
            if !map.contains_key("source")
                && map.get(JOB_WRAPPER_KEY).is_some_and(Value::is_object) =>
        {
            map.remove(JOB_WRAPPER_KEY).unwrap_or_default()
        }
        other => other,
    }
}

//! Error types using thiserror
//!
//! Error hierarchy:
//! - UnknownEnumValue: an unrecognized tag for a closed enumeration
//! - InvalidVersion: a package version string that does not parse
//! - JobError: failures while constructing a job from its wire form
//!
//! Query operations never return errors; "no match" is expressed with
//! `Option`, empty collections or `false`.

use std::path::PathBuf;
use thiserror::Error;

/// An enumeration tag that is not part of the closed vocabulary
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} value '{value}'")]
pub struct UnknownEnumValue {
    /// Name of the enumeration (e.g. "update type")
    pub kind: &'static str,
    /// The rejected tag
    pub value: String,
}

impl UnknownEnumValue {
    /// Creates a new UnknownEnumValue error
    pub fn new(kind: &'static str, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }
}

/// A package version string that is not syntactically valid
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid package version '{value}': {message}")]
pub struct InvalidVersion {
    /// The rejected version string
    pub value: String,
    /// What was wrong with it
    pub message: String,
}

impl InvalidVersion {
    /// Creates a new InvalidVersion error
    pub fn new(value: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            message: message.into(),
        }
    }
}

/// Errors raised while constructing a job
#[derive(Error, Debug)]
pub enum JobError {
    /// The input is not valid JSON
    #[error("failed to parse job JSON: {0}")]
    Syntax(#[source] serde_json::Error),

    /// A required field is absent or failed domain validation
    #[error("missing or invalid field '{path}': {message}")]
    MissingOrInvalidField { path: String, message: String },

    /// An enumeration field carried an unrecognized tag
    #[error("invalid value for '{path}': {source}")]
    UnknownEnumValue {
        path: String,
        #[source]
        source: UnknownEnumValue,
    },

    /// Failed to read a job file
    #[error("failed to read job file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl JobError {
    /// Creates a MissingOrInvalidField error for an absent required field
    pub fn missing(path: impl Into<String>) -> Self {
        JobError::MissingOrInvalidField {
            path: path.into(),
            message: "field is required".to_string(),
        }
    }

    /// Creates a MissingOrInvalidField error for a field that failed validation
    pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        JobError::MissingOrInvalidField {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Creates an UnknownEnumValue error at the given field path
    pub fn unknown_enum(path: impl Into<String>, source: UnknownEnumValue) -> Self {
        JobError::UnknownEnumValue {
            path: path.into(),
            source,
        }
    }

    /// Creates a Read error
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        JobError::Read {
            path: path.into(),
            source,
        }
    }

    /// Returns the field path for construction failures
    pub fn path(&self) -> Option<&str> {
        match self {
            JobError::MissingOrInvalidField { path, .. }
            | JobError::UnknownEnumValue { path, .. } => Some(path),
            JobError::Syntax(_) | JobError::Read { .. } => None,
        }
    }
}

//! Error types for proof construction and configuration loading.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::status::StatusReason;
use crate::types::Status;

/// A single violated validation rule, keyed by the offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn missing(field: &str) -> Self {
        Self::new(field, format!("Missing required field: {}", field))
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Session data was structurally invalid. Carries every violation found,
/// never just the first one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid session data: {}", join_violations(.violations))]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// True if any violation concerns `field`.
    pub fn mentions(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| v.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Malformed or missing configuration. Fatal at startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// A proof record that does not hang together. The hash only binds the
/// schema's fields; the derived fields are checked against configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntegrityError {
    #[error("hash does not match the record under schema {version}")]
    HashMismatch { version: String },

    #[error("panic_detected is {recorded} but the emotion label implies {expected}")]
    PanicFlag { recorded: bool, expected: bool },

    #[error(
        "status is {recorded} ({recorded_reason}) but score and panic flag give {expected} ({expected_reason})"
    )]
    Status {
        recorded: Status,
        recorded_reason: StatusReason,
        expected: Status,
        expected_reason: StatusReason,
    },

    #[error("status_message is not the configured message for {status}")]
    StatusMessage { status: Status },
}

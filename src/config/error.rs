//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Configuration loading error.
///
/// Every variant is fatal to startup: the engine must never run with a
/// partially valid configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed document {document} at line {line}, column {column}: {message}")]
    MalformedDocument {
        document: String,
        line: usize,
        column: usize,
        message: String,
    },
    #[error("failed to merge configuration layers: {0}")]
    Merge(#[source] Box<figment::Error>),
    #[error("missing required field `{field}`")]
    MissingRequiredField { field: String },
    #[error("invalid value for `{field}`: {constraint}")]
    InvalidValue { field: String, constraint: String },
    #[error("conflicting options `{first}` and `{second}`: {reason}")]
    ConflictingOptions {
        first: String,
        second: String,
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn missing(field: impl Into<String>) -> Self {
        ConfigError::MissingRequiredField {
            field: field.into(),
        }
    }

    pub(crate) fn invalid(field: impl Into<String>, constraint: impl Into<String>) -> Self {
        ConfigError::InvalidValue {
            field: field.into(),
            constraint: constraint.into(),
        }
    }

    pub(crate) fn conflict(
        first: impl Into<String>,
        second: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        ConfigError::ConflictingOptions {
            first: first.into(),
            second: second.into(),
            reason: reason.into(),
        }
    }

    /// Returns the offending field path for field-level errors.
    pub fn field(&self) -> Option<&str> {
        match self {
            ConfigError::MissingRequiredField { field } => Some(field),
            ConfigError::InvalidValue { field, .. } => Some(field),
            ConfigError::ConflictingOptions { first, .. } => Some(first),
            _ => None,
        }
    }
}

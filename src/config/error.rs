//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::validation::ValidationError;
use crate::config::value;

/// Anything that makes a configuration load fail.
///
/// Absent values are never errors: they resolve through relocation and then
/// defaults. Present values that cannot be coerced always are.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed document: {0}")]
    MalformedDocument(#[from] toml::de::Error),

    #[error("invalid value at `{path}`: expected {expected}, found {found}")]
    InvalidFieldValue {
        path: String,
        expected: String,
        found: String,
    },

    #[error("listener name `{0}` is used by more than one listener")]
    DuplicateListenerName(String),

    #[error("schema validation failed: {}", join_errors(.0))]
    Schema(Vec<ValidationError>),
}

impl ConfigError {
    pub(crate) fn invalid_value(path: String, expected: String, found: &toml::Value) -> Self {
        ConfigError::InvalidFieldValue {
            path,
            expected,
            found: value::describe(found),
        }
    }
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

//! Error types for mdblog
//!
//! Store failures are reported as-is to the caller; nothing here retries
//! or recovers.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for mdblog operations
#[derive(Debug, Error)]
pub enum Error {
    // ==========================================================================
    // Post Errors
    // ==========================================================================
    #[error("Post '{title}' by '{name}' on {day} not found")]
    PostNotFound {
        name: String,
        day: String,
        title: String,
    },

    #[error("Invalid search pattern '{pattern}': {source}")]
    InvalidSearchPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    // ==========================================================================
    // Collection Errors
    // ==========================================================================
    #[error("Failed to create collection '{name}': {source}")]
    CollectionCreateFailed {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Document '{path}' is malformed: {message}")]
    MalformedDocument { path: PathBuf, message: String },

    // ==========================================================================
    // Validation Errors
    // ==========================================================================
    #[error("Invalid {kind} '{value}': {reason}")]
    InvalidIdentifier {
        kind: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("Reserved name '{name}' cannot be used")]
    ReservedName { name: String },

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    #[error("Invalid configuration in '{path}': {message}")]
    ConfigError { path: PathBuf, message: String },

    // ==========================================================================
    // IO Errors
    // ==========================================================================
    #[error("Failed to read file '{path}': {source}")]
    FileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    FileWriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to remove file '{path}': {source}")]
    FileRemoveError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ==========================================================================
    // Serialization Errors
    // ==========================================================================
    #[error("Failed to parse YAML: {message}")]
    YamlParseError { message: String },

    #[error("Failed to serialize to YAML: {message}")]
    YamlSerializeError { message: String },
}

/// Result type alias for mdblog operations
pub type Result<T> = std::result::Result<T, Error>;

// =============================================================================
// Conversions from external error types
// =============================================================================

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::YamlParseError {
            message: err.to_string(),
        }
    }
}

impl From<crate::validation::ValidationError> for Error {
    fn from(err: crate::validation::ValidationError) -> Self {
        match err {
            crate::validation::ValidationError::InvalidIdentifier(value, reason) => {
                Error::InvalidIdentifier {
                    kind: "identifier",
                    value,
                    reason,
                }
            }
            crate::validation::ValidationError::TooLong(value, _max) => Error::InvalidIdentifier {
                kind: "identifier",
                value,
                reason: "exceeds maximum length",
            },
            crate::validation::ValidationError::Empty => Error::InvalidIdentifier {
                kind: "identifier",
                value: String::new(),
                reason: "cannot be empty",
            },
            crate::validation::ValidationError::Reserved(name) => Error::ReservedName { name },
        }
    }
}

impl Error {
    pub(crate) fn not_found(key: &crate::PostKey) -> Self {
        Error::PostNotFound {
            name: key.name.clone(),
            day: key.day.clone(),
            title: key.title.clone(),
        }
    }

    /// Returns a user-friendly suggestion for fixing the error
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Error::PostNotFound { .. } => {
                Some("Check the author, the day (YYYY-M-D, no zero padding) and the exact title")
            }
            Error::InvalidSearchPattern { .. } => {
                Some("Escape regex metacharacters or set `search: literal` in the config")
            }
            Error::InvalidIdentifier { .. } => {
                Some("Use only letters, numbers, underscores, and hyphens")
            }
            Error::ConfigError { .. } => Some("Fix or remove .mdblog/config.yaml"),
            _ => None,
        }
    }

    /// Returns true if this error is recoverable
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::PostNotFound { .. }
                | Error::InvalidSearchPattern { .. }
                | Error::InvalidIdentifier { .. }
        )
    }
}

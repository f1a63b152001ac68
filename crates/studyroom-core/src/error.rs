//! Core error types for studyroom-core.
//!
//! Every command either succeeds or fails with one of these before any
//! state has been touched, so callers can skip persistence on `Err`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Core error type for studyroom-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Malformed or out-of-range input
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An identifier did not resolve
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// State document errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    pub fn not_found(kind: EntityKind, id: impl Into<String>) -> Self {
        CoreError::NotFound {
            kind,
            id: id.into(),
        }
    }
}

/// Kinds of addressable entities, used in not-found reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Task,
    Deck,
    Card,
    Resource,
    Project,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Task => "Task",
            EntityKind::Deck => "Deck",
            EntityKind::Card => "Card",
            EntityKind::Resource => "Resource",
            EntityKind::Project => "Project",
        };
        f.write_str(name)
    }
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// A token that is not one of an enum's variants
    #[error("Unknown {field} '{value}' (expected one of: {expected})")]
    UnknownVariant {
        field: &'static str,
        value: String,
        expected: String,
    },

    /// Session durations must be strictly positive
    #[error("Duration must be a positive number of hours, got {0}")]
    NonPositiveDuration(f64),

    /// Required text left empty
    #[error("'{0}' must not be empty")]
    EmptyField(&'static str),
}

/// Errors reading or writing the state document.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Data directory could not be resolved or created
    #[error("Failed to access data directory: {0}")]
    DataDir(String),

    /// The document exists but could not be read
    #[error("Failed to read state from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document exists but is not a valid state
    #[error("Failed to parse state at {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Writing or replacing the document failed
    #[error("Failed to write state to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

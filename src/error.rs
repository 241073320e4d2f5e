//! Error types for Bugjira
//!
//! Defines a single error enum covering every failure mode of the crate.
//! Uses thiserror for ergonomic error handling.

use crate::config::ValidationError;
use crate::integrations::BackendError;
use crate::keys::BackendKind;
use thiserror::Error;

/// Result type alias for Bugjira operations
pub type Result<T> = std::result::Result<T, BugjiraError>;

/// Comprehensive error type for Bugjira operations
#[derive(Error, Debug)]
pub enum BugjiraError {
    /// An issue was constructed with a key that does not belong to its backend
    #[error("'{key}' is not a valid {backend} key")]
    InvalidKey { backend: BackendKind, key: String },

    /// A key matches neither the Bugzilla nor the JIRA format
    #[error("key does not appear to be a bugzilla or jira ID: {0}")]
    Classification(String),

    /// A broker was given neither a configuration nor a backend
    #[error("Broker initialization failed: {0}")]
    AdapterInit(String),

    /// The backend failed to return an issue
    #[error("Lookup of '{key}' failed: {source}")]
    Lookup {
        key: String,
        #[source]
        source: BackendError,
    },

    /// The backend failed to add a comment
    #[error("Adding a comment to '{key}' failed: {source}")]
    Comment {
        key: String,
        #[source]
        source: BackendError,
    },

    /// The configuration does not satisfy its schema
    #[error("Configuration validation failed:\n  - {}", join_errors(.0))]
    ConfigValidation(Vec<ValidationError>),

    /// Configuration errors outside of schema validation
    #[error("Configuration error: {0}")]
    Config(String),

    /// A named plugin could not be located or registered
    #[error("Plugin loader error: {0}")]
    PluginLoader(String),

    /// A backend type tag other than `bugzilla` or `jira`
    #[error("Unknown backend type: {0}")]
    UnknownBackend(String),

    /// A raw field record could not be turned into a field descriptor
    #[error("Invalid field record: {0}")]
    FieldDataValidation(String),

    /// A field data source contains structurally invalid data
    #[error("Field data generator error: {0}")]
    FieldDataGenerator(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// HTTP client construction errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Other errors
    #[error("{0}")]
    Other(String),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("\n  - ")
}

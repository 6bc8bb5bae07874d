//! Core error types for pomodoro-core.
//!
//! This module defines the error hierarchy using thiserror. Only storage and
//! settings edits surface errors to callers; engine and notification failures
//! are reported through events and logs instead (see `worker` and `notify`).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for pomodoro-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Storage collaborator errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Settings key/value editing errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Background engine errors
    #[error("Worker error: {0}")]
    Worker(#[from] WorkerError),

    /// Notification playback errors
    #[error("Notification error: {0}")]
    Notify(#[from] NotifyError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to read a stored value
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write a stored value
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The data directory could not be created
    #[error("Failed to prepare data directory {path}: {source}")]
    DataDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Settings key/value errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Key does not name a settings field
    #[error("unknown settings key: {0}")]
    UnknownKey(String),

    /// Value could not be parsed into the field's type
    #[error("cannot parse '{value}' for '{key}': {message}")]
    ParseFailed {
        key: String,
        value: String,
        message: String,
    },

    /// Parsed value is outside the allowed range
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Background engine errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkerError {
    /// The engine task could not be started
    #[error("failed to start timer engine: {0}")]
    Spawn(String),

    /// The engine reported a failure and cannot be reused
    #[error("timer engine is in an error state")]
    Faulted,

    /// The engine has been shut down
    #[error("timer engine has been terminated")]
    Terminated,
}

/// Notification playback errors.
#[derive(Error, Debug)]
pub enum NotifyError {
    /// Output device rejected the sound
    #[error("playback failed: {0}")]
    Playback(String),

    /// IO errors while writing to the output device
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<ValidationError> for ConfigError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidValue { field, message } => {
                ConfigError::InvalidValue { key: field, message }
            }
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

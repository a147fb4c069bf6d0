//! Core error types for summitpace-core.
//!
//! This module defines the error hierarchy using thiserror. Engine
//! failures are reported synchronously to the caller; nothing here is
//! retried since the engine performs no I/O.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for summitpace-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Pacing engine errors
    #[error("Pacing error: {0}")]
    Pacing(#[from] PacingError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by the pacing engine itself.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PacingError {
    /// Update requested with no checkpoint entries at all
    #[error("no checkpoint data: add at least one progress checkpoint first")]
    NoCheckpointData,

    /// Checkpoint entries exist but none has both a mile and a time
    #[error("incomplete checkpoint data: fill in both mile and time for at least one checkpoint")]
    IncompleteCheckpointData,

    /// A wall-clock time is earlier than the trip start and the day
    /// boundary policy rejects wraparound
    #[error("time {time} is earlier than start time {start} (day boundary policy: reject)")]
    TimeBeforeStart { start: String, time: String },
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

    /// Unknown dot-path key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Malformed "HH:MM" clock string
    #[error("Invalid time '{0}': expected HH:MM (24-hour)")]
    InvalidClock(String),

    /// Empty collection
    #[error("Empty collection: {0}")]
    EmptyCollection(String),

    /// Route violates an ordering or shape invariant
    #[error("Invalid route at index {index}: {message}")]
    InvalidRoute { index: usize, message: String },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl ValidationError {
    pub(crate) fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

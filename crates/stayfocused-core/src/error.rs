//! Core error types for stayfocused-core.
//!
//! The countdown engine itself never fails: invalid transitions are no-ops.
//! Errors only arise at the edges, when presets and configuration are read
//! from untrusted input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for stayfocused-core.
#[derive(Error, Debug)]
pub enum CoreError {
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

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),
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
}

/// Validation errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A catalog needs at least one preset
    #[error("Preset catalog is empty")]
    EmptyCatalog,

    #[error("Duplicate preset key '{0}'")]
    DuplicatePreset(String),

    /// Durations are whole, positive seconds
    #[error("Preset '{key}' must have a positive duration")]
    ZeroDuration { key: String },

    #[error("Preset key must not be blank")]
    BlankKey,

    #[error("Unknown preset '{0}'")]
    UnknownPreset(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

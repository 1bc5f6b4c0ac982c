//! Core error types for finalhour-core.
//!
//! This module defines the error hierarchy using thiserror. Validation
//! failures are recoverable and meant to be shown to the user; the only
//! fatal condition (an invalid starting time) is decided by the host.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for finalhour-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors (names, times, tokens)
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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
}

/// Validation errors.
///
/// Every variant is recoverable: the caller reports it and lets the user retry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Name does not match `[A-Za-z0-9 ]{1,16}`
    #[error("\"{name}\" is invalid.\n{}", crate::checkpoint::NAME_RULES)]
    InvalidName { name: String },

    /// Time-triple out of bounds
    #[error("day {day} {hour}:{minute} is invalid")]
    InvalidTime { day: i64, hour: i64, minute: i64 },

    /// A checkpoint with the same name already exists
    #[error("\"{name}\" already in use")]
    DuplicateName { name: String },

    /// Malformed serialized token or argument
    #[error("Invalid value: {input}")]
    Parse { input: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

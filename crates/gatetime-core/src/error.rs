//! Core error types for gatetime-core.
//!
//! The planning engine itself is total; these errors cover the surfaces
//! around it: parsing traveler input, loading configuration, and driving
//! a trip session.

use std::path::PathBuf;
use thiserror::Error;

use crate::itinerary::StepId;

/// Core error type for gatetime-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Trip session errors
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

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

    /// Key does not exist in the configuration tree
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Validation errors for traveler-supplied input.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown travel mode '{0}' (expected car, taxi, rideshare or transit)")]
    UnknownTravelMode(String),

    #[error("Unknown risk preference '{0}' (expected low_wait, balanced or very_safe)")]
    UnknownRiskPreference(String),

    #[error("Unknown step '{0}' (expected leave, curb, check_in, security, gate or boarding)")]
    UnknownStep(String),

    /// Boarding closes the trip and cannot anchor a recalculation.
    #[error("Step '{0}' is terminal and cannot be used as a checkpoint")]
    TerminalStep(StepId),

    #[error("Invalid clock time '{0}' (expected HH:MM)")]
    InvalidClockTime(String),

    #[error("Unknown flight '{0}'")]
    UnknownFlight(String),
}

/// Trip session errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// The trip already reached boarding; its step states are frozen.
    #[error("Trip is already completed; step '{0}' cannot be reported")]
    AlreadyCompleted(StepId),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

//! Core error types for robocross-core.
//!
//! This module defines the error hierarchy using thiserror. Build errors are
//! always recoverable and carry a user-facing message; playback-time misuse
//! is never an error (the engine treats it as a no-op).

use std::path::PathBuf;
use thiserror::Error;

use crate::routine::WorkoutType;

/// Core error type for robocross-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Routine build errors
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// Exercise catalog errors
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The playback runner task has exited
    #[error("Playback runner has stopped")]
    PlaybackStopped,
}

/// Errors raised while turning build parameters into a routine.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    /// The selection pool required by the workout type is empty after
    /// applying the exclusion filters.
    #[error("No exercises available for a {workout_type} workout")]
    EmptyPool { workout_type: WorkoutType },

    /// The length/interval combination yields no segments.
    #[error(
        "Workout of {workout_length_min} minutes is too short for {interval_secs}s intervals with {minimum_rest_secs}s rest"
    )]
    ZeroSegments {
        interval_secs: u32,
        workout_length_min: u32,
        minimum_rest_secs: u32,
    },

    /// Non-positive interval/length, a zero-duration segment, or a
    /// notification table whose keys are not strictly increasing.
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),
}

impl BuildError {
    /// Message suitable for showing to the person building the workout.
    pub fn user_message(&self) -> String {
        match self {
            BuildError::EmptyPool { .. } => {
                "No workouts found, widen your equipment selection.".to_string()
            }
            BuildError::ZeroSegments { .. } => {
                "Workout too short, increase the length or shorten the interval.".to_string()
            }
            BuildError::InvalidParameters(message) => format!("Invalid parameters: {message}"),
        }
    }
}

/// Exercise catalog errors.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Two exercises share a name
    #[error("Duplicate exercise name: {0}")]
    DuplicateName(String),

    /// Catalog data could not be parsed
    #[error("Failed to parse catalog: {0}")]
    Parse(#[from] serde_json::Error),

    /// Lookup by name failed
    #[error("Unknown exercise: {0}")]
    UnknownExercise(String),
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

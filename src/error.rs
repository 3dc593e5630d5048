//! Error types for Inspector.
//!
//! Two kinds matter to callers: [`InspectorError::InvalidInput`] for data that is
//! not a finite, ordered numeric series, and [`InspectorError::PluginResolution`]
//! for unknown generators or malformed generator configuration. Both are raised
//! before any window is created.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Inspector operations.
pub type Result<T> = std::result::Result<T, InspectorError>;

/// Errors that can occur in Inspector.
#[derive(Debug, Error)]
pub enum InspectorError {
    /// The supplied series is not a finite, ordered sequence of numbers.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The named generator does not exist, or its configuration did not validate.
    #[error("Plugin error ({plugin}): {reason}")]
    PluginResolution { plugin: String, reason: String },

    /// Failed to read or write a file.
    #[error("Failed to access file: {path}")]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration file could not be (de)serialized.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The native window could not be created or the event loop failed.
    #[error("Display error: {0}")]
    Display(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl InspectorError {
    /// Create an InvalidInput error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Create a PluginResolution error.
    pub fn plugin(plugin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::PluginResolution {
            plugin: plugin.into(),
            reason: reason.into(),
        }
    }

    /// Create a File error.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    pub fn is_plugin_resolution(&self) -> bool {
        matches!(self, Self::PluginResolution { .. })
    }
}

impl From<eframe::Error> for InspectorError {
    fn from(err: eframe::Error) -> Self {
        Self::Display(err.to_string())
    }
}

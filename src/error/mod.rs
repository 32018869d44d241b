//! Error handling module for Framemark

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Main error type for Framemark I/O-facing operations
#[derive(Error, Debug)]
pub enum FramemarkError {
    /// Input file not found or inaccessible
    #[error("Input file not found: {path}")]
    InputFileNotFound { path: String },

    /// Annotation project file has the wrong shape
    #[error("Invalid project file {path}: {message}")]
    InvalidProjectFile { path: String, message: String },

    /// CSV content could not be parsed
    #[error("Malformed CSV: {message}")]
    MalformedCsv { message: String },

    /// Settings failed validation
    #[error("Invalid configuration: {message}")]
    ConfigError { message: String },

    /// Output file write error
    #[error("Failed to write output file: {message}")]
    OutputError { message: String },

    /// Domain rule violation
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    TomlDeError(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerError(#[from] toml::ser::Error),
}

/// Result type alias for Framemark operations
pub type FramemarkResult<T> = std::result::Result<T, FramemarkError>;

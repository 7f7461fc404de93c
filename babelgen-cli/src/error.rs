//! Error types for the CLI.
//!
//! This module defines all error types used throughout the CLI,
//! providing detailed error messages with context for debugging.

use std::path::PathBuf;
use thiserror::Error;

use babelgen::RenderError;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Main error type for CLI operations.
#[derive(Debug, Error)]
pub enum CliError {
    /// Error loading the IDL model.
    #[error("Failed to load model: {0}")]
    Model(#[from] ModelError),

    /// Error rendering a construct.
    #[error("Failed to render: {0}")]
    Render(#[from] RenderError),

    /// Error loading configuration.
    #[error("Failed to load configuration: {0}")]
    Config(#[from] ConfigError),

    /// Error writing output files.
    #[error("Failed to write output: {0}")]
    Write(#[from] WriteError),

    /// A requested language has no templates.
    #[error("Unsupported language '{language}' (available: {})", .available.join(", "))]
    UnsupportedLanguage {
        language: String,
        available: Vec<String>,
    },

    /// Validation failed (generated files out of date).
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Generic IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Error loading the JSON model.
#[derive(Debug, Error)]
pub enum ModelError {
    /// Model file does not exist.
    #[error("Model file not found: {path}")]
    NotFound { path: PathBuf },

    /// The file is not a valid IDL document.
    #[error("Invalid model JSON in {path}: {source}")]
    InvalidJson {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// IO error reading the model.
    #[error("Failed to read model {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid TOML syntax.
    #[error("Invalid TOML in {path}: {message}")]
    InvalidToml { path: PathBuf, message: String },

    /// Invalid configuration value.
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// IO error reading config.
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Error writing output files.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Failed to read an existing output file for comparison.
    #[error("Failed to read file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create directory.
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write file.
    #[error("Failed to write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Create an invalid TOML error.
    pub fn invalid_toml(path: PathBuf, message: impl Into<String>) -> Self {
        Self::InvalidToml {
            path,
            message: message.into(),
        }
    }

    /// Create an invalid value error.
    pub fn invalid_value(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_language_lists_available() {
        let err = CliError::UnsupportedLanguage {
            language: "csharp".to_string(),
            available: vec!["go".to_string(), "java".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "Unsupported language 'csharp' (available: go, java)"
        );
    }

    #[test]
    fn test_render_error_is_wrapped() {
        let err: CliError = RenderError::unresolved("User").into();
        assert_eq!(err.to_string(), "Failed to render: unresolved type 'User'");
    }
}

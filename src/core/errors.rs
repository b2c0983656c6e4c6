//! Shared error types for the application

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for clinicast operations
#[derive(Debug, Error)]
pub enum Error {
    /// Input validation errors (out-of-range fields, malformed values)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Model artifact load errors
    #[error("Model artifact error for {path}: {message}")]
    ModelLoad {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },

    /// Inference requested before a successful load
    #[error("Model not loaded: {0}")]
    ModelUnavailable(&'static str),

    /// Feature mismatch between a loaded artifact and the input record
    #[error("Feature error: {0}")]
    Feature(String),
}

impl Error {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Create a model load error for a specific artifact path
    pub fn model_load(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Error::ModelLoad {
            path: path.into(),
            message: message.into(),
            source: None,
        }
    }

    /// Create a model load error carrying the underlying I/O failure
    pub fn model_io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::ModelLoad {
            path: path.into(),
            message: source.to_string(),
            source: Some(source),
        }
    }
}

/// Convenience result type using our error
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = Error::validation("age must be at most 120");
        assert_eq!(err.to_string(), "Validation error: age must be at most 120");
    }

    #[test]
    fn model_load_error_keeps_path() {
        let err = Error::model_load("models/noshow_classifier.bin", "truncated payload");
        match err {
            Error::ModelLoad { path, message, .. } => {
                assert_eq!(path, PathBuf::from("models/noshow_classifier.bin"));
                assert_eq!(message, "truncated payload");
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }
}

//! Error handling and error types for Favtree.
//!
//! This module provides error handling using Rust's Result type system,
//! ensuring clear error propagation throughout the pipeline. All pipeline
//! failures (missing input file, malformed CSV, missing columns, unwritable
//! output paths, degenerate splits) terminate the run with one of these
//! variants.

use std::io;
use thiserror::Error;

/// Main error type for the Favtree library.
///
/// This enum covers all error conditions that can occur during dataset
/// loading, encoding, tree fitting, prediction, rendering, and export.
#[derive(Error, Debug)]
pub enum FavTreeError {
    /// Configuration and validation errors
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the invalid configuration
        message: String,
    },

    /// Data loading and parsing errors
    #[error("Data loading error: {message}")]
    DataLoading {
        /// Human-readable description of the loading failure
        message: String,
    },

    /// Label encoding errors
    #[error("Encoding error: {message}")]
    Encoding {
        /// Human-readable description of the encoding failure
        message: String,
    },

    /// Dataset construction and validation errors
    #[error("Dataset error: {message}")]
    Dataset {
        /// Human-readable description of the dataset problem
        message: String,
    },

    /// Tree fitting errors
    #[error("Training error: {message}")]
    Training {
        /// Human-readable description of the training failure
        message: String,
    },

    /// Prediction errors
    #[error("Prediction error: {message}")]
    Prediction {
        /// Human-readable description of the prediction failure
        message: String,
    },

    /// Tree visualization errors
    #[error("Rendering error: {message}")]
    Rendering {
        /// Human-readable description of the rendering failure
        message: String,
    },

    /// Model serialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Human-readable description of the serialization failure
        message: String,
    },

    /// Dimension mismatch errors
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected shape or length
        expected: String,
        /// Actual shape or length
        actual: String,
    },

    /// File I/O errors
    #[error("I/O error: {source}")]
    Io {
        /// Underlying I/O error
        #[from]
        source: io::Error,
    },

    /// CSV parsing errors
    #[error("CSV parsing error: {source}")]
    Csv {
        /// Underlying CSV error
        #[from]
        source: csv::Error,
    },

    /// JSON serialization errors
    #[error("JSON error: {source}")]
    Json {
        /// Underlying JSON error
        #[from]
        source: serde_json::Error,
    },
}

/// Type alias for Results using FavTreeError
pub type Result<T> = std::result::Result<T, FavTreeError>;

impl FavTreeError {
    /// Create a configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        FavTreeError::Config {
            message: message.into(),
        }
    }

    /// Create a data loading error
    pub fn data_loading<S: Into<String>>(message: S) -> Self {
        FavTreeError::DataLoading {
            message: message.into(),
        }
    }

    /// Create an encoding error
    pub fn encoding<S: Into<String>>(message: S) -> Self {
        FavTreeError::Encoding {
            message: message.into(),
        }
    }

    /// Create a dataset error
    pub fn dataset<S: Into<String>>(message: S) -> Self {
        FavTreeError::Dataset {
            message: message.into(),
        }
    }

    /// Create a training error
    pub fn training<S: Into<String>>(message: S) -> Self {
        FavTreeError::Training {
            message: message.into(),
        }
    }

    /// Create a prediction error
    pub fn prediction<S: Into<String>>(message: S) -> Self {
        FavTreeError::Prediction {
            message: message.into(),
        }
    }

    /// Create a rendering error
    pub fn rendering<S: Into<String>>(message: S) -> Self {
        FavTreeError::Rendering {
            message: message.into(),
        }
    }

    /// Create a serialization error
    pub fn serialization<S: Into<String>>(message: S) -> Self {
        FavTreeError::Serialization {
            message: message.into(),
        }
    }

    /// Create a dimension mismatch error
    pub fn dimension_mismatch<E, A>(expected: E, actual: A) -> Self
    where
        E: Into<String>,
        A: Into<String>,
    {
        FavTreeError::DimensionMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Get error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            FavTreeError::Config { .. } => "config",
            FavTreeError::DataLoading { .. } => "data_loading",
            FavTreeError::Encoding { .. } => "encoding",
            FavTreeError::Dataset { .. } => "dataset",
            FavTreeError::Training { .. } => "training",
            FavTreeError::Prediction { .. } => "prediction",
            FavTreeError::Rendering { .. } => "rendering",
            FavTreeError::Serialization { .. } => "serialization",
            FavTreeError::DimensionMismatch { .. } => "dimension_mismatch",
            FavTreeError::Io { .. } => "io",
            FavTreeError::Csv { .. } => "csv",
            FavTreeError::Json { .. } => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = FavTreeError::config("test configuration error");
        assert_eq!(err.category(), "config");

        let err = FavTreeError::training("test training error");
        assert_eq!(err.category(), "training");
    }

    #[test]
    fn test_error_display() {
        let err = FavTreeError::data_loading("file missing");
        let error_string = format!("{}", err);
        assert!(error_string.contains("Data loading error"));
        assert!(error_string.contains("file missing"));
    }

    #[test]
    fn test_dimension_mismatch() {
        let err = FavTreeError::dimension_mismatch("(100, 3)", "(100, 2)");
        assert_eq!(err.category(), "dimension_mismatch");
        let error_string = format!("{}", err);
        assert!(error_string.contains("expected (100, 3)"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: FavTreeError = io_err.into();
        assert!(matches!(err, FavTreeError::Io { .. }));
        assert_eq!(err.category(), "io");
    }
}

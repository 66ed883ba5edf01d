//! Custom error types for imgbatch.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the imgbatch library.
#[derive(Error, Debug)]
pub enum Error {
    /// A directory or image file does not exist.
    #[error("path not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to decode an image file.
    #[error("failed to decode image from {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to encode or write an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to render or write a plot.
    #[error("failed to render plot to {path}: {reason}")]
    Plot { path: PathBuf, reason: String },

    /// Array shapes are missing dimensions or do not line up for stacking.
    #[error("array shape mismatch: expected {expected}, got {actual}")]
    Shape { expected: String, actual: String },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn shape(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::Shape {
            expected: expected.into(),
            actual: actual.into(),
        }
    }
}

/// Result type alias for imgbatch operations.
pub type Result<T> = std::result::Result<T, Error>;

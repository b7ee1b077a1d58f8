//! Custom error types for hlsconv.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the hlsconv library.
#[derive(Error, Debug)]
pub enum Error {
    /// Failed to load an image file.
    #[error("failed to load image from {path}: {source}")]
    ImageLoad {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Failed to save an image file.
    #[error("failed to save image to {path}: {source}")]
    ImageSave {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Invalid parameter value.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: String, reason: String },

    /// Analytic and numeric derivatives disagree.
    #[error(
        "gradient mismatch at output {output}, input {input}: analytic {analytic}, numeric {numeric}"
    )]
    GradientMismatch {
        output: usize,
        input: usize,
        analytic: f64,
        numeric: f64,
    },

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Tensor does not have the expected shape (e.g. no 3-long channel axis).
    #[error("tensor shape mismatch: expected {expected}, got {actual}")]
    ShapeMismatch { expected: String, actual: String },
}

impl From<ndarray::ShapeError> for Error {
    fn from(err: ndarray::ShapeError) -> Self {
        Self::ShapeMismatch {
            expected: "consistent dimensionality".to_string(),
            actual: err.to_string(),
        }
    }
}

/// Result type alias for hlsconv operations.
pub type Result<T> = std::result::Result<T, Error>;

//! Error types for the self-organizing map trainer.

use thiserror::Error;

/// The main error type for SOM operations.
#[derive(Error, Debug)]
pub enum SomError {
    /// Invalid construction parameters.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An input vector's length disagrees with the lattice input dimension.
    #[error("Dimension mismatch: expected vector of length {expected}, got {actual}")]
    DimensionMismatch {
        /// The lattice input dimension.
        expected: usize,
        /// The length of the offending vector.
        actual: usize,
    },

    /// Decay parameters fall outside the range where the schedule is defined.
    #[error("Numeric domain error: {0}")]
    NumericDomain(String),

    /// Lattice rendering failed.
    #[error("Render error: {0}")]
    Render(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for SOM operations.
pub type Result<T> = std::result::Result<T, SomError>;

impl From<image::ImageError> for SomError {
    fn from(err: image::ImageError) -> Self {
        SomError::Render(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_message() {
        let err = SomError::DimensionMismatch {
            expected: 3,
            actual: 2,
        };
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: expected vector of length 3, got 2"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: SomError = io.into();
        assert!(matches!(err, SomError::Io(_)));
    }
}

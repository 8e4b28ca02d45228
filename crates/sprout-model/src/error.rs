//! Error types for regression fitting.

use polars::prelude::PolarsError;
use thiserror::Error;

/// Errors that can occur while building or fitting a regression.
#[derive(Debug, Error)]
pub enum RegressionError {
    /// Not enough observations for the number of parameters
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Required number of observations
        required: usize,
        /// Actual number of observations
        actual: usize,
    },

    /// The design matrix does not have full column rank
    #[error("Design matrix is rank deficient at column `{column}`")]
    RankDeficient {
        /// First column found to be linearly dependent on earlier ones
        column: String,
    },

    /// Dimension mismatch
    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension
        expected: usize,
        /// Actual dimension
        actual: usize,
    },

    /// Parameter name not present in the fitted model
    #[error("Unknown parameter: {0}")]
    UnknownParameter(String),

    /// Student's t distribution could not be constructed
    #[error("Distribution error: {0}")]
    Distribution(String),

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

impl RegressionError {
    /// Whether the error describes unusable input data rather than a bug or
    /// I/O failure. Such fits are reported as NaN statistics.
    pub const fn is_degenerate(&self) -> bool {
        matches!(
            self,
            Self::InsufficientData { .. } | Self::RankDeficient { .. }
        )
    }
}

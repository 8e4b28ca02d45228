//! Error types for report rendering.

use polars::prelude::PolarsError;
use sprout_model::RegressionError;
use thiserror::Error;

/// Errors that can occur while writing report artifacts.
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Chart drawing failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// Chart colour is not a `#rrggbb` string
    #[error("Invalid colour: {0}")]
    InvalidColor(String),

    /// Regression error while fitting a chart line
    #[error("Regression error: {0}")]
    Regression(#[from] RegressionError),

    /// Polars error while reading chart data
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
}

/// Result alias for rendering.
pub type Result<T> = std::result::Result<T, OutputError>;

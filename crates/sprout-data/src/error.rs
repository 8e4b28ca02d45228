//! Error types for data operations.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while loading or cleaning a growth table.
#[derive(Debug, Error)]
pub enum DataError {
    /// Input file does not exist
    #[error("Input file not found: {}", path.display())]
    NotFound {
        /// Path that was requested
        path: PathBuf,
    },

    /// A schema column is absent from the header row
    #[error("Missing required column `{column}` in {}", path.display())]
    MissingColumn {
        /// Name of the absent column
        column: String,
        /// File that was read
        path: PathBuf,
    },

    /// Polars error (includes CSV parse failures)
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

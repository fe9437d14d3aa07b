//! Error types for filing ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for filing ingestion operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading and analyzing filings.
#[derive(Debug, Error)]
pub enum DataError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Text could not be decoded with the detected encoding
    #[error("cannot decode {path} as {encoding}")]
    Decode {
        /// File that failed to decode
        path: PathBuf,
        /// Encoding the detector settled on
        encoding: &'static str,
    },

    /// Excel read error
    #[error("Excel read error: {0}")]
    Excel(#[from] calamine::XlsxError),

    /// Workbook contains no worksheets
    #[error("no worksheet in {0}")]
    EmptyWorkbook(PathBuf),

    /// A required column is absent from the filing table
    #[error("missing column {column:?} in {path}")]
    MissingColumn {
        /// File whose table lacks the column
        path: PathBuf,
        /// Expected column name
        column: &'static str,
    },

    /// Polars error
    #[error("Polars error: {0}")]
    Polars(#[from] polars::prelude::PolarsError),

    /// Filename violates the export naming convention
    #[error("naming convention error: {0}")]
    Naming(#[from] busan::NamingError),
}

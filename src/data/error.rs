//! Error types for data operations
//!
//! Loading failures are fatal at startup. Selection errors are recoverable and
//! never abort a session.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading the source table
#[derive(Error, Debug)]
pub enum DataError {
    /// Source table does not exist
    #[error("Data file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Polars error while reading or collecting the frame
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// A required column is absent from the header
    #[error("Missing column: {0}")]
    MissingColumn(&'static str),

    /// A cell could not be read as the column's type
    #[error("Invalid value in column {column} at row {row}: {reason}")]
    InvalidValue {
        row: usize,
        column: &'static str,
        reason: String,
    },

    /// Source has a header but no data rows
    #[error("Empty file")]
    EmptyFile,

    /// The process-wide dataset was already installed
    #[error("Dataset already installed")]
    AlreadyInstalled,
}

/// Result type alias for data operations
pub type DataResult<T> = Result<T, DataError>;

/// Recoverable selection conditions raised while resolving control state
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectionError {
    /// No options exist for the current filter (e.g. a continent with no rows)
    #[error("No countries available for continent {continent}")]
    EmptySelection { continent: String },

    /// A selected country is not among the current options
    #[error("Country {country} is not available for continent {continent}")]
    InvalidCountry { country: String, continent: String },

    /// A year bound is not one of the dataset's distinct years
    #[error("Year {0} is not present in the dataset")]
    InvalidYear(i64),
}

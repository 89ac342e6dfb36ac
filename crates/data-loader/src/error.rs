//! Error types for the data-loader crate.
//!
//! Every failure while reading the two precomputed artifacts (the movie
//! table and the similarity matrix) is reported through [`DataLoadError`],
//! so the caller can fail fast with a clear configuration error.

use thiserror::Error;

/// Errors that can occur during data loading and parsing
#[derive(Error, Debug)]
pub enum DataLoadError {
    /// File could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A record in a data file couldn't be parsed
    ///
    /// `line` is the 1-based record number (data rows, header excluded)
    #[error("Parse error at record {line} in {file}: {reason}")]
    ParseError {
        file: String,
        line: usize,
        reason: String,
    },

    /// The file extension doesn't map to a supported artifact format
    #[error("Unsupported format for {path}: expected .csv or .json")]
    UnsupportedFormat { path: String },

    /// A matrix row has a different length than the matrix is wide
    #[error("Similarity matrix is not square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// Matrix dimension doesn't match the number of movies
    #[error("Similarity matrix is {matrix}x{matrix} but the movie table has {movies} rows")]
    DimensionMismatch { matrix: usize, movies: usize },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, DataLoadError>;

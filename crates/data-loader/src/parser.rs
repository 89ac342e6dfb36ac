//! Parsers for the two precomputed artifacts.
//!
//! - movie table: CSV with a `Title,Year,Rating,Actors,Overview,Poster_URL,Reviews`
//!   header, or a JSON array of objects with the same keys
//! - similarity matrix: headerless CSV (one matrix row per line), or a JSON
//!   array of arrays
//!
//! The format is picked from the file extension. The `*_from_reader`
//! functions take any `Read` so tests can feed in-memory data.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// On-disk encoding of an artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactFormat {
    Csv,
    Json,
}

impl ArtifactFormat {
    /// Pick the format from the file extension (case-insensitive)
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("csv") => Ok(ArtifactFormat::Csv),
            Some("json") => Ok(ArtifactFormat::Json),
            _ => Err(DataLoadError::UnsupportedFormat {
                path: path.display().to_string(),
            }),
        }
    }
}

fn open(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;
    Ok(BufReader::new(file))
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

// =============================================================================
// Movie table
// =============================================================================

/// Parse the movie table file
pub fn parse_movies(path: &Path) -> Result<Vec<MovieRecord>> {
    let format = ArtifactFormat::from_path(path)?;
    let reader = open(path)?;
    let label = file_label(path);

    match format {
        ArtifactFormat::Csv => parse_movies_csv(reader, &label),
        ArtifactFormat::Json => parse_movies_json(reader, &label),
    }
}

/// Parse a movie table in CSV form.
///
/// Quoted fields may span several lines, which is how review blobs with
/// blank-line separators are stored.
pub fn parse_movies_csv<R: Read>(reader: R, file: &str) -> Result<Vec<MovieRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(reader);

    let mut movies = Vec::new();
    for (idx, result) in csv_reader.deserialize::<MovieRecord>().enumerate() {
        let record = result.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: idx + 1,
            reason: e.to_string(),
        })?;
        movies.push(record);
    }
    Ok(movies)
}

/// Parse a movie table in JSON form (array of objects)
pub fn parse_movies_json<R: Read>(reader: R, file: &str) -> Result<Vec<MovieRecord>> {
    serde_json::from_reader(reader).map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: e.line(),
        reason: e.to_string(),
    })
}

// =============================================================================
// Similarity matrix
// =============================================================================

/// Parse the similarity matrix file
pub fn parse_similarity(path: &Path) -> Result<SimilarityMatrix> {
    let format = ArtifactFormat::from_path(path)?;
    let reader = open(path)?;
    let label = file_label(path);

    let rows = match format {
        ArtifactFormat::Csv => parse_similarity_csv(reader, &label)?,
        ArtifactFormat::Json => parse_similarity_json(reader, &label)?,
    };
    SimilarityMatrix::from_rows(rows)
}

/// Parse headerless CSV rows of numbers.
///
/// Rows may differ in length here; squareness is checked by
/// `SimilarityMatrix::from_rows` so the error names the offending row.
pub fn parse_similarity_csv<R: Read>(reader: R, file: &str) -> Result<Vec<Vec<Score>>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (idx, result) in csv_reader.records().enumerate() {
        let line_no = idx + 1;
        let record = result.map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            line: line_no,
            reason: e.to_string(),
        })?;

        let row = record
            .iter()
            .enumerate()
            .map(|(col, field)| {
                field.parse::<Score>().map_err(|e| DataLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: format!("Invalid score in column {}: {:?} ({})", col + 1, field, e),
                })
            })
            .collect::<Result<Vec<Score>>>()?;

        rows.push(row);
    }
    Ok(rows)
}

/// Parse a JSON array of arrays of numbers
pub fn parse_similarity_json<R: Read>(reader: R, file: &str) -> Result<Vec<Vec<Score>>> {
    serde_json::from_reader(reader).map_err(|e| DataLoadError::ParseError {
        file: file.to_string(),
        line: e.line(),
        reason: e.to_string(),
    })
}

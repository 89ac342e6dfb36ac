//! Core domain types for the movie catalog.
//!
//! This module defines the fundamental data structures used throughout the system:
//! - `MovieRecord`: one row of the precomputed movie table
//! - `SimilarityMatrix`: the square, row-aligned pairwise similarity table
//! - `MovieCatalog`: the in-memory database holding both plus a title index

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::{BTreeSet, HashMap};

// =============================================================================
// Type Aliases
// =============================================================================

/// Position of a movie in the dataset; also its row/column in the similarity matrix
pub type RowIndex = usize;

/// Pairwise similarity score between two movies
pub type Score = f32;

// =============================================================================
// Movie Record
// =============================================================================

/// One movie from the precomputed dataset.
///
/// Field names follow the dataset's column headers
/// (`Title,Year,Rating,Actors,Overview,Poster_URL,Reviews`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(rename = "Title", deserialize_with = "null_as_empty")]
    pub title: String,

    /// Release year; `None` when the cell is empty or not a year (e.g. "N/A")
    #[serde(rename = "Year", default, deserialize_with = "lenient_year")]
    pub year: Option<u16>,

    /// Audience rating as published in the dataset
    #[serde(rename = "Rating", default, deserialize_with = "lenient_rating")]
    pub rating: Option<f32>,

    #[serde(rename = "Actors", default, deserialize_with = "null_as_empty")]
    pub actors: String,

    #[serde(rename = "Overview", default, deserialize_with = "null_as_empty")]
    pub overview: String,

    #[serde(rename = "Poster_URL", default, deserialize_with = "null_as_empty")]
    pub poster_url: String,

    /// Raw review blob: reviews separated by blank lines, or the
    /// "no reviews available" sentinel
    #[serde(rename = "Reviews", default)]
    pub reviews: Option<String>,
}

impl MovieRecord {
    /// Create a record with only a title; the rest is left empty
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            year: None,
            rating: None,
            actors: String::new(),
            overview: String::new(),
            poster_url: String::new(),
            reviews: None,
        }
    }

    /// Attach a review blob (builder style, mostly for fixtures)
    pub fn with_reviews(mut self, reviews: impl Into<String>) -> Self {
        self.reviews = Some(reviews.into());
        self
    }

    /// Poster URL, if the dataset has a non-blank one
    pub fn poster(&self) -> Option<&str> {
        let url = self.poster_url.trim();
        (!url.is_empty()).then_some(url)
    }
}

/// Accepts a number, a numeric string, an empty cell or junk text.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseValue {
    Number(f64),
    Text(String),
}

fn loose_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseValue>::deserialize(deserializer)?;
    Ok(match value {
        Some(LooseValue::Number(n)) => Some(n),
        Some(LooseValue::Text(s)) => s.trim().parse::<f64>().ok(),
        None => None,
    }
    .filter(|n| n.is_finite()))
}

/// Text cell where a `null` (pandas' missing value) reads as empty
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_number(deserializer)?
        .filter(|n| n.fract() == 0.0 && *n >= 0.0 && *n <= f64::from(u16::MAX))
        .map(|n| n as u16))
}

fn lenient_rating<'de, D>(deserializer: D) -> Result<Option<f32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(loose_number(deserializer)?.map(|n| n as f32))
}

// =============================================================================
// Similarity Matrix
// =============================================================================

/// Square matrix of precomputed similarity scores, stored row-major.
///
/// Entry `(i, j)` is the similarity between movie `i` and movie `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    dim: usize,
    scores: Vec<Score>,
}

impl SimilarityMatrix {
    /// Build a matrix from parsed rows, checking that it is square
    pub fn from_rows(rows: Vec<Vec<Score>>) -> crate::Result<Self> {
        let dim = rows.len();
        let mut scores = Vec::with_capacity(dim * dim);

        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != dim {
                return Err(crate::DataLoadError::NotSquare {
                    row,
                    expected: dim,
                    found: values.len(),
                });
            }
            scores.extend(values);
        }

        Ok(Self { dim, scores })
    }

    /// Number of rows (equal to the number of columns)
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Similarity scores of one movie against every movie, including itself
    pub fn row(&self, index: RowIndex) -> Option<&[Score]> {
        if index >= self.dim {
            return None;
        }
        let start = index * self.dim;
        Some(&self.scores[start..start + self.dim])
    }

    /// Single entry lookup
    pub fn get(&self, row: RowIndex, col: RowIndex) -> Option<Score> {
        self.row(row).and_then(|r| r.get(col).copied())
    }
}

// =============================================================================
// MovieCatalog - The In-Memory Reference Data
// =============================================================================

/// Holds the movie table, the aligned similarity matrix, and a title index.
///
/// Built once at startup (see `index.rs`) and shared read-only behind an
/// `Arc` for the lifetime of the process.
#[derive(Debug)]
pub struct MovieCatalog {
    pub(crate) movies: Vec<MovieRecord>,
    pub(crate) similarity: SimilarityMatrix,
    /// Title -> first row carrying that title
    pub(crate) title_index: HashMap<String, RowIndex>,
}

impl MovieCatalog {
    /// Number of movies (rows) in the catalog
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// All movies in dataset order
    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    /// Get a movie by row index
    pub fn movie(&self, index: RowIndex) -> Option<&MovieRecord> {
        self.movies.get(index)
    }

    /// Row index of a title (exact, case-sensitive match)
    pub fn index_of(&self, title: &str) -> Option<RowIndex> {
        self.title_index.get(title).copied()
    }

    /// Get a movie by its exact title
    pub fn get_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.index_of(title).and_then(|idx| self.movie(idx))
    }

    /// The aligned similarity matrix
    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    /// Similarity row for a movie
    pub fn similarity_row(&self, index: RowIndex) -> Option<&[Score]> {
        self.similarity.row(index)
    }

    /// Unique titles in sorted order (what a picker would offer)
    pub fn titles(&self) -> Vec<&str> {
        self.movies
            .iter()
            .map(|m| m.title.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}

//! MovieCatalog building and validation logic.
//!
//! This module builds the MovieCatalog from the parsed artifacts:
//! - Parse the movie table and the similarity matrix (in parallel)
//! - Validate that the matrix is aligned with the movie table
//! - Build the title -> row index used by every lookup

use crate::error::{DataLoadError, Result};
use crate::parser;
use crate::types::*;
use std::collections::HashMap;
use std::path::Path;
use tracing::{info, warn};

impl MovieCatalog {
    /// Load the catalog from the two precomputed artifacts
    ///
    /// This is the main entry point for loading data.
    ///
    /// Steps:
    /// 1. Parse both files in parallel
    /// 2. Validate matrix dimensions against the movie row count
    /// 3. Build the title index
    pub fn load_from_files(movies_path: &Path, similarity_path: &Path) -> Result<Self> {
        info!(
            "Loading movie catalog from {:?} and {:?}",
            movies_path, similarity_path
        );

        // The matrix is usually the larger file, so parse both at once
        let (movies, similarity) = rayon::join(
            || parser::parse_movies(movies_path),
            || parser::parse_similarity(similarity_path),
        );

        let movies = movies?;
        let similarity = similarity?;

        info!(
            "Loaded {} movies and a {}x{} similarity matrix",
            movies.len(),
            similarity.dim(),
            similarity.dim()
        );

        let catalog = Self::from_parts(movies, similarity)?;
        info!("MovieCatalog successfully built and validated");
        Ok(catalog)
    }

    /// Assemble a catalog from already-parsed data
    ///
    /// Fails fast when the matrix is not aligned with the movie table.
    pub fn from_parts(movies: Vec<MovieRecord>, similarity: SimilarityMatrix) -> Result<Self> {
        validate(&movies, &similarity)?;

        let title_index = build_title_index(&movies);

        Ok(Self {
            movies,
            similarity,
            title_index,
        })
    }
}

/// Validate data integrity
///
/// Check that:
/// - The dataset is not empty
/// - The matrix has exactly one row per movie
fn validate(movies: &[MovieRecord], similarity: &SimilarityMatrix) -> Result<()> {
    if movies.is_empty() {
        return Err(DataLoadError::ValidationError(
            "movie table has no rows".to_string(),
        ));
    }
    if similarity.dim() != movies.len() {
        return Err(DataLoadError::DimensionMismatch {
            matrix: similarity.dim(),
            movies: movies.len(),
        });
    }
    Ok(())
}

/// Map each title to the first row that carries it
fn build_title_index(movies: &[MovieRecord]) -> HashMap<String, RowIndex> {
    let mut title_index = HashMap::with_capacity(movies.len());

    for (idx, movie) in movies.iter().enumerate() {
        if let Some(&first) = title_index.get(&movie.title) {
            warn!(
                "Duplicate title {:?} at row {} (keeping row {})",
                movie.title, idx, first
            );
            continue;
        }
        title_index.insert(movie.title.clone(), idx);
    }

    title_index
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn identity(n: usize) -> SimilarityMatrix {
        let rows = (0..n)
            .map(|i| (0..n).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
            .collect();
        SimilarityMatrix::from_rows(rows).unwrap()
    }

    #[test]
    fn test_from_parts_rejects_dimension_mismatch() {
        let movies = vec![MovieRecord::titled("A"), MovieRecord::titled("B")];
        let err = MovieCatalog::from_parts(movies, identity(3)).unwrap_err();
        assert!(matches!(
            err,
            DataLoadError::DimensionMismatch { matrix: 3, movies: 2 }
        ));
    }

    #[test]
    fn test_from_parts_rejects_empty_dataset() {
        let err = MovieCatalog::from_parts(vec![], identity(0)).unwrap_err();
        assert!(matches!(err, DataLoadError::ValidationError(_)));
    }

    #[test]
    fn test_duplicate_titles_resolve_to_first_row() {
        let movies = vec![
            MovieRecord::titled("Don"),
            MovieRecord::titled("Devdas"),
            MovieRecord::titled("Don"),
        ];
        let catalog = MovieCatalog::from_parts(movies, identity(3)).unwrap();
        assert_eq!(catalog.index_of("Don"), Some(0));
        assert_eq!(catalog.index_of("Devdas"), Some(1));
        assert_eq!(catalog.titles(), vec!["Devdas", "Don"]);
    }

    #[test]
    fn test_load_from_files() {
        let dir = tempfile::tempdir().unwrap();
        let movies_path = dir.path().join("movies.csv");
        let similarity_path = dir.path().join("similarity.json");

        let mut movies_file = std::fs::File::create(&movies_path).unwrap();
        writeln!(movies_file, "Title,Year,Rating,Actors,Overview,Poster_URL,Reviews").unwrap();
        writeln!(movies_file, "Andhadhun,2018,8.2,Ayushmann Khurrana,A blind pianist.,,Clever.").unwrap();
        writeln!(movies_file, "Drishyam,2015,8.2,Ajay Devgn,A cover-up.,,Gripping.").unwrap();

        std::fs::write(&similarity_path, "[[1.0, 0.4], [0.4, 1.0]]").unwrap();

        let catalog = MovieCatalog::load_from_files(&movies_path, &similarity_path).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get_by_title("Drishyam").unwrap().year, Some(2015));
        assert_eq!(catalog.similarity().get(0, 1), Some(0.4));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let similarity_path = dir.path().join("similarity.csv");
        std::fs::write(&similarity_path, "1.0\n").unwrap();

        let err = MovieCatalog::load_from_files(&dir.path().join("nope.csv"), &similarity_path)
            .unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}

//! Similarity Source - "You may also like"
//!
//! Surfaces the movies most similar to a selected title using the
//! precomputed similarity matrix.
//!
//! ## Algorithm
//! 1. Find the row index of the selected title (exact match)
//! 2. Read that row of the similarity matrix
//! 3. Pair every other row with its score
//! 4. Sort by score DESC (stable, so dataset order breaks ties)
//! 5. Return the top `limit` (default 5)
//!
//! A row's highest entry is its own self-similarity, so the queried row is
//! excluded before ranking. Rows that share the queried title are excluded
//! as well.

use crate::types::Recommendation;
use data_loader::{MovieCatalog, RowIndex, Score};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Default number of recommendations per title
pub const DEFAULT_LIMIT: usize = 5;

/// Recommends similar titles from the precomputed matrix
#[derive(Clone)]
pub struct SimilarityRecommender {
    /// Shared reference to the catalog (read-only, so no Mutex needed)
    catalog: Arc<MovieCatalog>,

    /// Maximum number of recommendations returned
    limit: usize,
}

impl SimilarityRecommender {
    /// Create a new recommender returning up to 5 titles
    pub fn new(catalog: Arc<MovieCatalog>) -> Self {
        Self {
            catalog,
            limit: DEFAULT_LIMIT,
        }
    }

    /// Configure how many recommendations to return (default: 5)
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Recommend movies similar to `title`.
    ///
    /// Unknown titles yield an empty list, not an error.
    #[instrument(skip(self))]
    pub fn recommend(&self, title: &str) -> Vec<Recommendation> {
        let Some(index) = self.catalog.index_of(title) else {
            debug!("Title not in catalog, nothing to recommend");
            return Vec::new();
        };

        let recommendations: Vec<Recommendation> = self
            .ranked_neighbours(index)
            .into_iter()
            .take(self.limit)
            .filter_map(|(idx, score)| {
                let movie = self.catalog.movie(idx)?;
                Some(Recommendation {
                    index: idx,
                    score,
                    movie: movie.clone(),
                })
            })
            .collect();

        debug!("Generated {} recommendations", recommendations.len());
        recommendations
    }

    /// Every other row paired with its similarity to `index`, best first
    fn ranked_neighbours(&self, index: RowIndex) -> Vec<(RowIndex, Score)> {
        let Some(row) = self.catalog.similarity_row(index) else {
            return Vec::new();
        };
        let Some(query_title) = self.catalog.movie(index).map(|m| m.title.as_str()) else {
            return Vec::new();
        };

        let mut scored: Vec<(RowIndex, Score)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|&(idx, _)| {
                idx != index
                    && self
                        .catalog
                        .movie(idx)
                        .is_some_and(|m| m.title != query_title)
            })
            .collect();

        // `sort_by` is stable: equal scores keep dataset order
        scored.sort_by(|a, b| by_score_desc(a.1, b.1));
        scored
    }
}

/// Descending order with NaN pushed to the end
fn by_score_desc(a: Score, b: Score) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (false, false) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}

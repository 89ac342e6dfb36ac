//! Output types of the recommendation lookup.

use data_loader::{MovieRecord, RowIndex, Score};
use serde::Serialize;

/// One "you may also like" entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    /// Row of the recommended movie in the catalog
    pub index: RowIndex,
    /// Similarity between the queried movie and this one
    pub score: Score,
    pub movie: MovieRecord,
}

impl Recommendation {
    pub fn title(&self) -> &str {
        &self.movie.title
    }
}

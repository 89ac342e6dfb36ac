//! # Recommender Crate
//!
//! Finds the titles most similar to a selected movie using the
//! precomputed similarity matrix held by the `MovieCatalog`.
//!
//! ## Example Usage
//!
//! ```ignore
//! use recommender::SimilarityRecommender;
//! use data_loader::MovieCatalog;
//! use std::sync::Arc;
//!
//! let catalog = Arc::new(MovieCatalog::load_from_files(movies_path, similarity_path)?);
//! let recommender = SimilarityRecommender::new(catalog.clone());
//!
//! for rec in recommender.recommend("Sholay") {
//!     println!("{} ({:.2})", rec.title(), rec.score);
//! }
//! ```

// Public modules
pub mod types;
pub mod similarity;

// Re-export commonly used types
pub use types::Recommendation;
pub use similarity::{SimilarityRecommender, DEFAULT_LIMIT};

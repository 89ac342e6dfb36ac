//! # Data Loader Crate
//!
//! This crate loads the precomputed reference data the rest of the
//! workspace reads: the movie table and the similarity matrix aligned with it.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (MovieRecord, SimilarityMatrix, MovieCatalog)
//! - **parser**: Parse the CSV / JSON artifacts into Rust structs
//! - **index**: Validate the artifacts and build the title index
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::MovieCatalog;
//! use std::path::Path;
//!
//! let catalog = MovieCatalog::load_from_files(
//!     Path::new("data/movies.csv"),
//!     Path::new("data/similarity.csv"),
//! )?;
//!
//! let movie = catalog.get_by_title("Sholay").unwrap();
//! let row = catalog.similarity_row(catalog.index_of("Sholay").unwrap());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use parser::ArtifactFormat;
pub use types::{
    // Type aliases
    RowIndex,
    Score,
    // Core types
    MovieRecord,
    SimilarityMatrix,
    MovieCatalog,
};

//! Example: Recommend similar titles
//!
//! Run with: cargo run --package recommender --example similar_titles -- "Sholay"
//!
//! This example shows how to:
//! 1. Load the catalog artifacts
//! 2. Build a SimilarityRecommender
//! 3. Display the top matches for a title

use data_loader::MovieCatalog;
use recommender::SimilarityRecommender;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter("info")
        .init();

    let title = std::env::args().nth(1).unwrap_or_else(|| "Sholay".to_string());

    println!("Loading movie catalog...");
    let start = Instant::now();
    let catalog = Arc::new(MovieCatalog::load_from_files(
        Path::new("data/movies.csv"),
        Path::new("data/similarity.csv"),
    )?);
    println!("Loaded {} movies in {:?}\n", catalog.len(), start.elapsed());

    let recommender = SimilarityRecommender::new(catalog.clone());

    let start = Instant::now();
    let recs = recommender.recommend(&title);
    println!("Similar to {:?} (found in {:?}):", title, start.elapsed());

    if recs.is_empty() {
        println!("  (no matches; is the title spelled exactly?)");
    }
    for (rank, rec) in recs.iter().enumerate() {
        println!("  {}. {} - similarity {:.3}", rank + 1, rec.title(), rec.score);
    }

    Ok(())
}

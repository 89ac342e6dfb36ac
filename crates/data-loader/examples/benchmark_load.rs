use data_loader::MovieCatalog;
use std::path::Path;
use std::time::Instant;

fn main() {
    let movies_path = Path::new("data/movies.csv");
    let similarity_path = Path::new("data/similarity.csv");

    println!("Loading movie catalog...\n");

    let start = Instant::now();
    let catalog = MovieCatalog::load_from_files(movies_path, similarity_path)
        .expect("Failed to load catalog");
    let elapsed = start.elapsed();

    let cells = catalog.similarity().dim() * catalog.similarity().dim();

    println!("\n=== Load Complete ===");
    println!("Time taken: {:?}", elapsed);
    println!("Movies: {}", catalog.len());
    println!("Unique titles: {}", catalog.titles().len());
    println!("Similarity cells: {}", cells);
    println!("\nPerformance: {:.0} cells/second",
             cells as f64 / elapsed.as_secs_f64());
}

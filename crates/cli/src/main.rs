use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::{ColoredString, Colorize};
use data_loader::{MovieCatalog, MovieRecord};
use rand::Rng;
use sentiment::{LexiconClassifier, RemoteClassifier, SentimentClassifier, SentimentLabel};
use showcase::{MoviePage, MovieShowcase, SentimentSection};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Marquee - Movie recommender & audience sentiment explorer
#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Discover similar movies and explore audience sentiment", long_about = None)]
struct Cli {
    /// Movie table (.csv or .json)
    #[arg(long, env = "MARQUEE_MOVIES", default_value = "data/movies.csv")]
    movies: PathBuf,

    /// Precomputed similarity matrix aligned with the movie table (.csv or .json)
    #[arg(long, env = "MARQUEE_SIMILARITY", default_value = "data/similarity.csv")]
    similarity: PathBuf,

    /// Which sentiment classifier to use
    #[arg(long, value_enum, env = "MARQUEE_CLASSIFIER", default_value_t = ClassifierKind::Lexicon)]
    classifier: ClassifierKind,

    /// Address of the sentiment inference service (remote classifier only)
    #[arg(long, env = "MARQUEE_ML_ADDR", default_value = sentiment::DEFAULT_SERVICE_ADDR)]
    ml_addr: String,

    /// Model identifier the inference service should use
    #[arg(long, env = "MARQUEE_MODEL", default_value = sentiment::DEFAULT_MODEL)]
    model: String,

    /// Connect and request timeout for the inference service, in seconds
    #[arg(long, env = "MARQUEE_REQUEST_TIMEOUT_SECS", default_value = "30")]
    request_timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum ClassifierKind {
    /// Offline word-list classifier
    Lexicon,
    /// gRPC inference service hosting the pretrained model
    Remote,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a movie: details, audience sentiment, and similar titles
    Show {
        /// Exact movie title
        #[arg(long)]
        title: String,

        /// List every review with its label
        #[arg(long)]
        reviews: bool,

        /// Print the page as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Recommend titles similar to a movie
    Recommend {
        /// Exact movie title
        #[arg(long)]
        title: String,

        /// Number of recommendations to return
        #[arg(long, default_value = "5")]
        limit: usize,
    },

    /// Analyze the audience reviews of a movie
    Sentiment {
        /// Exact movie title
        #[arg(long)]
        title: String,

        /// List every review with its label
        #[arg(long)]
        reviews: bool,
    },

    /// Search for movies by title
    Search {
        /// Movie title to search for (case-insensitive substring match)
        #[arg(long)]
        title: String,
    },

    /// List every title in the catalog
    List,

    /// Run benchmark to test recommendation lookup performance
    Benchmark {
        /// Number of lookups to make
        #[arg(long, default_value = "1000")]
        requests: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing on stderr so stdout stays clean for `--json`
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load reference data
    eprintln!(
        "Loading catalog from {} and {}...",
        cli.movies.display(),
        cli.similarity.display()
    );
    let start = Instant::now();
    let catalog = Arc::new(
        MovieCatalog::load_from_files(&cli.movies, &cli.similarity)
            .context("Failed to load movie catalog")?,
    );
    eprintln!(
        "{} Loaded {} movies in {:?}",
        "✓".green(),
        catalog.len(),
        start.elapsed()
    );

    let classifier = build_classifier(&cli)?;
    let showcase = MovieShowcase::new(catalog.clone(), classifier);

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Show {
            title,
            reviews,
            json,
        } => handle_show(&showcase, &title, reviews, json).await?,
        Commands::Recommend { title, limit } => handle_recommend(showcase, &title, limit)?,
        Commands::Sentiment { title, reviews } => {
            handle_sentiment(&showcase, &title, reviews).await?
        }
        Commands::Search { title } => handle_search(&catalog, &title),
        Commands::List => handle_list(&catalog),
        Commands::Benchmark { requests } => handle_benchmark(&showcase, requests)?,
    }

    Ok(())
}

/// Pick the sentiment capability from configuration
fn build_classifier(cli: &Cli) -> Result<Arc<dyn SentimentClassifier>> {
    match cli.classifier {
        ClassifierKind::Lexicon => Ok(Arc::new(LexiconClassifier::new())),
        ClassifierKind::Remote => {
            let remote = RemoteClassifier::connect_lazy(
                &cli.ml_addr,
                &cli.model,
                Duration::from_secs(cli.request_timeout_secs),
            )
            .context("Failed to configure sentiment service")?;
            eprintln!(
                "{} Sentiment service at {}",
                "✓".green(),
                remote.service_address()
            );
            Ok(Arc::new(remote))
        }
    }
}

/// Look up a movie or explain how to find the right title
fn find_movie<'a>(catalog: &'a MovieCatalog, title: &str) -> Result<&'a MovieRecord> {
    match catalog.get_by_title(title) {
        Some(movie) => Ok(movie),
        None => bail!(
            "Movie {:?} not found (titles are case-sensitive; try `marquee search --title ...`)",
            title
        ),
    }
}

/// Handle the 'show' command
async fn handle_show(showcase: &MovieShowcase, title: &str, reviews: bool, json: bool) -> Result<()> {
    find_movie(showcase.catalog(), title)?;
    let page = showcase.present(title).await?;

    if json {
        println!("{}", page_json(&page)?);
        return Ok(());
    }

    print_page(&page, reviews);
    Ok(())
}

/// Handle the 'recommend' command
fn handle_recommend(showcase: MovieShowcase, title: &str, limit: usize) -> Result<()> {
    find_movie(showcase.catalog(), title)?;

    let showcase = showcase.with_recommendation_limit(limit);
    let recommendations = showcase.recommend(title);

    println!("{}", format!("Similar to {}:", title).bold().blue());
    if recommendations.is_empty() {
        println!("  (nothing similar found)");
    }
    for (rank, rec) in recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - similarity {:.3}",
            (rank + 1).to_string().green(),
            rec.title(),
            year_text(&rec.movie),
            rec.score
        );
    }
    Ok(())
}

/// Handle the 'sentiment' command
async fn handle_sentiment(showcase: &MovieShowcase, title: &str, reviews: bool) -> Result<()> {
    let movie = find_movie(showcase.catalog(), title)?;
    let section = showcase.review_sentiment(movie).await;

    let classifier = showcase.classifier();
    println!("{}", format!("Audience sentiment for {}", title).bold().blue());
    println!("(classified by {}, model {})", classifier.name(), classifier.model());
    print_sentiment(&section, reviews);
    Ok(())
}

/// Handle the 'search' command
fn handle_search(catalog: &MovieCatalog, query: &str) {
    let matches = search_titles(catalog, query);

    println!("{}", format!("Search results for '{}':", query).bold().blue());
    if matches.is_empty() {
        println!("  (no matches)");
    }
    for movie in matches.iter().take(20) {
        println!(
            "  {} ({}) rating {}",
            movie.title,
            year_text(movie),
            rating_text(movie)
        );
    }
}

/// Handle the 'list' command
fn handle_list(catalog: &MovieCatalog) {
    let titles = catalog.titles();
    println!("{}", format!("{} titles:", titles.len()).bold().blue());
    for title in titles {
        println!("  {}", title);
    }
}

/// Handle the 'benchmark' command
fn handle_benchmark(showcase: &MovieShowcase, requests: usize) -> Result<()> {
    if requests == 0 {
        bail!("--requests must be at least 1");
    }

    // Pick random titles from the catalog
    let catalog = showcase.catalog();
    let mut rng = rand::rng();
    let titles: Vec<&str> = (0..requests)
        .filter_map(|_| catalog.movie(rng.random_range(0..catalog.len())))
        .map(|m| m.title.as_str())
        .collect();

    info!("Running {} recommendation lookups", titles.len());

    let mut timings = Vec::with_capacity(titles.len());
    for title in &titles {
        let start = Instant::now();
        let recs = showcase.recommend(title);
        timings.push(start.elapsed());
        std::hint::black_box(recs);
    }

    // Calculate and display statistics
    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = percentile(&timings, 0.50);
    let p95 = percentile(&timings, 0.95);
    let p99 = percentile(&timings, 0.99);
    let throughput = timings.len() as f64 / total_time.as_secs_f64().max(f64::EPSILON);

    println!("Benchmark results:");
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} lookups/second", throughput);

    Ok(())
}

// =============================================================================
// Rendering helpers
// =============================================================================

/// Print the full page for a movie
fn print_page(page: &MoviePage, show_reviews: bool) {
    print_movie_details(&page.movie);

    println!();
    println!("{}", "Audience Sentiment Analysis".bold().blue());
    print_sentiment(&page.sentiment, show_reviews);

    println!();
    println!("{}", "You may also like".bold().blue());
    if page.recommendations.is_empty() {
        println!("  (nothing similar found)");
    }
    for (rank, rec) in page.recommendations.iter().enumerate() {
        println!(
            "{}. {} ({}) - rating {}",
            (rank + 1).to_string().green(),
            rec.title().bold(),
            year_text(&rec.movie),
            rating_text(&rec.movie)
        );
        println!("   {} {}", "Actors:".cyan(), rec.movie.actors);
        println!("   {} {}", "Poster:".cyan(), poster_text(&rec.movie));
        if !rec.movie.overview.is_empty() {
            println!("   {} {}", "Overview:".cyan(), rec.movie.overview);
        }
    }
}

fn print_movie_details(movie: &MovieRecord) {
    println!("{}", movie.title.bold());
    println!("{}Year: {}", "• ".green(), year_text(movie));
    println!("{}Rating: {}", "• ".green(), rating_text(movie));
    println!("{}Actors: {}", "• ".green(), movie.actors);
    println!("{}Poster: {}", "• ".green(), poster_text(movie));
    if !movie.overview.is_empty() {
        println!("{}", "Overview".cyan());
        println!("  {}", movie.overview);
    }
}

fn print_sentiment(section: &SentimentSection, show_reviews: bool) {
    match section {
        SentimentSection::NoReviews => println!("{}", "No reviews available.".yellow()),
        SentimentSection::Unavailable { reason } => {
            println!("{} {}", "Sentiment unavailable:".red(), reason)
        }
        SentimentSection::Analyzed {
            reviews,
            distribution,
        } => {
            if show_reviews {
                for review in reviews {
                    println!("{} {}", "Review:".bold(), review.review);
                    println!(
                        "{} {} (Score: {:.2})",
                        "Sentiment:".bold(),
                        label_colored(review.sentiment()),
                        review.score
                    );
                    println!("---");
                }
            }

            println!("{}", "Overall Sentiment Summary".cyan());
            let max = distribution
                .buckets()
                .iter()
                .map(|(_, n)| *n)
                .max()
                .unwrap_or(0);
            for (label, count) in distribution.buckets() {
                if label == SentimentLabel::Unknown && count == 0 {
                    continue;
                }
                println!(
                    "  {:<9} {:>3} {}",
                    label.as_str(),
                    count,
                    label_colored_text(label, &bar(count, max, 30))
                );
            }
            if let Some(dominant) = distribution.dominant() {
                println!("  Mostly {} ({} reviews)", label_colored(dominant), distribution.total());
            }
        }
    }
}

fn label_colored(label: SentimentLabel) -> ColoredString {
    label_colored_text(label, label.as_str())
}

fn label_colored_text(label: SentimentLabel, text: &str) -> ColoredString {
    match label {
        SentimentLabel::Negative => text.red(),
        SentimentLabel::Neutral => text.bright_black(),
        SentimentLabel::Positive => text.green(),
        SentimentLabel::Unknown => text.yellow(),
    }
}

/// Horizontal bar scaled so `max` fills `width` cells
fn bar(count: usize, max: usize, width: usize) -> String {
    if max == 0 {
        return String::new();
    }
    let cells = (count * width).div_ceil(max);
    "█".repeat(cells)
}

fn year_text(movie: &MovieRecord) -> String {
    movie
        .year
        .map(|y| y.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

fn rating_text(movie: &MovieRecord) -> String {
    movie
        .rating
        .map(|r| format!("{:.1}", r))
        .unwrap_or_else(|| "N/A".to_string())
}

fn poster_text(movie: &MovieRecord) -> &str {
    movie.poster().unwrap_or("Poster not available")
}

/// Machine-readable page for `show --json`
fn page_json(page: &MoviePage) -> Result<String> {
    serde_json::to_string_pretty(page).context("Failed to serialize page")
}

/// Case-insensitive substring search: exact matches first, then by rating
fn search_titles<'a>(catalog: &'a MovieCatalog, query: &str) -> Vec<&'a MovieRecord> {
    let query_lower = query.to_lowercase();

    let mut matches: Vec<(u8, &MovieRecord)> = catalog
        .movies()
        .iter()
        .filter_map(|movie| {
            let title_lower = movie.title.to_lowercase();
            if title_lower == query_lower {
                Some((0, movie))
            } else if title_lower.contains(&query_lower) {
                Some((1, movie))
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| {
        a.0.cmp(&b.0).then_with(|| {
            let ra = a.1.rating.unwrap_or(0.0);
            let rb = b.1.rating.unwrap_or(0.0);
            rb.partial_cmp(&ra).unwrap_or(std::cmp::Ordering::Equal)
        })
    });

    matches.into_iter().map(|(_, movie)| movie).collect()
}

/// Nearest-rank percentile over sorted timings
fn percentile(sorted: &[Duration], p: f64) -> Duration {
    let idx = ((sorted.len() as f64 * p) as usize).min(sorted.len() - 1);
    sorted[idx]
}

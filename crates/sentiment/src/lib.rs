//! Audience review sentiment.
//!
//! This crate turns a movie's raw review blob into labeled reviews and a
//! distribution over sentiment buckets:
//! - `split_reviews` breaks the blob into individual reviews
//! - `analyze` classifies them in one batch through a `SentimentClassifier`
//! - `SentimentDistribution::tally` counts the results per bucket
//!
//! Two classifiers ship with the crate: `LexiconClassifier` (offline word
//! lists) and `RemoteClassifier` (gRPC client for the inference service
//! hosting the pretrained model).
//!
//! ## Example Usage
//! ```ignore
//! use sentiment::{analyze, split_reviews, LexiconClassifier, SentimentDistribution};
//!
//! let reviews = split_reviews(movie.reviews.as_deref());
//! let results = analyze(&LexiconClassifier::new(), reviews).await?;
//! let distribution = SentimentDistribution::tally(&results);
//! ```

pub mod analyze;
pub mod classifier;
pub mod error;
pub mod label;
pub mod lexicon;
pub mod remote;
pub mod reviews;

// Re-export main types
pub use analyze::{analyze, ReviewSentiment, SentimentDistribution};
pub use classifier::SentimentClassifier;
pub use error::SentimentError;
pub use label::{Classification, SentimentLabel};
pub use lexicon::LexiconClassifier;
pub use remote::{RemoteClassifier, DEFAULT_MODEL, DEFAULT_SERVICE_ADDR, DEFAULT_TIMEOUT};
pub use reviews::{is_no_reviews, split_reviews, NO_REVIEWS_SENTINEL};

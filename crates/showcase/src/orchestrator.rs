//! # Movie Showcase Orchestrator
//!
//! This module turns one title selection into everything a front end renders:
//! 1. Look up the selected movie
//! 2. Split its review blob and classify the reviews in one batch
//! 3. Tally the sentiment distribution
//! 4. Look up the five most similar titles
//!
//! Sentiment and recommendations are independent. A failing classifier
//! degrades the sentiment section to `Unavailable`; the recommendations are
//! still returned.

use std::sync::Arc;
use std::time::Instant;

use anyhow::{Result, anyhow};
use serde::Serialize;
use tracing::{info, warn};

use data_loader::{MovieCatalog, MovieRecord};
use recommender::{Recommendation, SimilarityRecommender};
use sentiment::{
    ReviewSentiment, SentimentClassifier, SentimentDistribution, analyze, split_reviews,
};

/// Outcome of the audience sentiment analysis for one movie
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SentimentSection {
    /// Missing blob, placeholder text, or nothing left after splitting
    NoReviews,
    /// The classifier failed; the page still renders without sentiment
    Unavailable { reason: String },
    Analyzed {
        reviews: Vec<ReviewSentiment>,
        distribution: SentimentDistribution,
    },
}

/// Everything shown for a selected title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoviePage {
    pub movie: MovieRecord,
    pub sentiment: SentimentSection,
    pub recommendations: Vec<Recommendation>,
}

/// Main orchestrator that coordinates lookup and sentiment analysis
#[derive(Clone)]
pub struct MovieShowcase {
    catalog: Arc<MovieCatalog>,
    recommender: SimilarityRecommender,
    classifier: Arc<dyn SentimentClassifier>,
}

impl MovieShowcase {
    /// Create a new showcase over a loaded catalog
    ///
    /// # Arguments
    /// * `catalog` - Shared reference to the loaded reference data
    /// * `classifier` - Sentiment capability (lexicon or remote service)
    pub fn new(catalog: Arc<MovieCatalog>, classifier: Arc<dyn SentimentClassifier>) -> Self {
        let recommender = SimilarityRecommender::new(catalog.clone());
        Self {
            catalog,
            recommender,
            classifier,
        }
    }

    /// Change how many similar titles a page shows (default: 5)
    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommender = self.recommender.with_limit(limit);
        self
    }

    pub fn catalog(&self) -> &Arc<MovieCatalog> {
        &self.catalog
    }

    pub fn classifier(&self) -> &dyn SentimentClassifier {
        self.classifier.as_ref()
    }

    /// Main entry point: build the page for a selected title
    ///
    /// Fails only when the title is not in the catalog.
    pub async fn present(&self, title: &str) -> Result<MoviePage> {
        let start_time = Instant::now();

        let movie = self
            .catalog
            .get_by_title(title)
            .ok_or_else(|| anyhow!("Movie {:?} not found", title))?
            .clone();

        let sentiment = self.review_sentiment(&movie).await;
        let recommendations = self.recommend(title);

        info!(
            "Built page for {:?}: {} recommendations in {:.2?}",
            title,
            recommendations.len(),
            start_time.elapsed()
        );

        Ok(MoviePage {
            movie,
            sentiment,
            recommendations,
        })
    }

    /// Similar titles; empty for unknown titles
    pub fn recommend(&self, title: &str) -> Vec<Recommendation> {
        self.recommender.recommend(title)
    }

    /// Split, classify and tally a movie's reviews
    pub async fn review_sentiment(&self, movie: &MovieRecord) -> SentimentSection {
        let reviews = split_reviews(movie.reviews.as_deref());
        if reviews.is_empty() {
            info!("No reviews available for {:?}", movie.title);
            return SentimentSection::NoReviews;
        }

        info!(
            "Classifying {} reviews for {:?} with {} ({})",
            reviews.len(),
            movie.title,
            self.classifier.name(),
            self.classifier.model()
        );

        match analyze(self.classifier.as_ref(), reviews).await {
            Ok(results) => {
                let distribution = SentimentDistribution::tally(&results);
                SentimentSection::Analyzed {
                    reviews: results,
                    distribution,
                }
            }
            Err(e) if e.is_unavailable() => {
                warn!("Sentiment service down, skipping {:?}: {}", movie.title, e);
                SentimentSection::Unavailable {
                    reason: e.to_string(),
                }
            }
            Err(e) => {
                warn!("Sentiment analysis failed for {:?}: {}", movie.title, e);
                SentimentSection::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use data_loader::SimilarityMatrix;
    use sentiment::{Classification, LexiconClassifier, SentimentError, SentimentLabel};
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ============================================================================
    // Test Fixtures
    // ============================================================================

    /// Six movies with varied review blobs
    fn build_test_catalog() -> Arc<MovieCatalog> {
        let movies = vec![
            MovieRecord::titled("3 Idiots")
                .with_reviews("Brilliant and hilarious.\n\nA bit too long but I loved it."),
            MovieRecord::titled("PK").with_reviews("No reviews available"),
            MovieRecord::titled("Dil Chahta Hai").with_reviews("Boring and predictable."),
            MovieRecord::titled("Rang De Basanti"),
            MovieRecord::titled("Taare Zameen Par").with_reviews("   \n\n  "),
            MovieRecord::titled("Munna Bhai M.B.B.S.")
                .with_reviews("Great fun.\n\nA classic."),
        ];
        let rows = vec![
            vec![1.0, 0.9, 0.2, 0.4, 0.7, 0.8],
            vec![0.9, 1.0, 0.1, 0.3, 0.6, 0.5],
            vec![0.2, 0.1, 1.0, 0.5, 0.3, 0.2],
            vec![0.4, 0.3, 0.5, 1.0, 0.4, 0.3],
            vec![0.7, 0.6, 0.3, 0.4, 1.0, 0.6],
            vec![0.8, 0.5, 0.2, 0.3, 0.6, 1.0],
        ];
        let matrix = SimilarityMatrix::from_rows(rows).unwrap();
        Arc::new(MovieCatalog::from_parts(movies, matrix).unwrap())
    }

    /// Classifier that always fails, counting calls
    #[derive(Default)]
    struct DownClassifier {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl SentimentClassifier for DownClassifier {
        fn name(&self) -> &str {
            "down"
        }

        fn model(&self) -> &str {
            "none"
        }

        async fn classify(
            &self,
            _texts: &[String],
        ) -> std::result::Result<Vec<Classification>, SentimentError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SentimentError::Unavailable("connection refused".to_string()))
        }
    }

    /// Classifier that is reachable but rejects every batch
    struct RejectingClassifier;

    #[async_trait]
    impl SentimentClassifier for RejectingClassifier {
        fn name(&self) -> &str {
            "rejecting"
        }

        fn model(&self) -> &str {
            "none"
        }

        async fn classify(
            &self,
            _texts: &[String],
        ) -> std::result::Result<Vec<Classification>, SentimentError> {
            Err(SentimentError::ClassificationFailed("InvalidArgument: batch too large".to_string()))
        }
    }

    fn build_showcase() -> MovieShowcase {
        MovieShowcase::new(build_test_catalog(), Arc::new(LexiconClassifier::new()))
    }

    // ============================================================================
    // Unit Tests: present
    // ============================================================================

    #[tokio::test]
    async fn test_present_builds_full_page() {
        let page = build_showcase().present("3 Idiots").await.unwrap();

        assert_eq!(page.movie.title, "3 Idiots");

        let titles: Vec<&str> = page.recommendations.iter().map(|r| r.title()).collect();
        assert_eq!(
            titles,
            vec!["PK", "Munna Bhai M.B.B.S.", "Taare Zameen Par", "Rang De Basanti", "Dil Chahta Hai"]
        );

        match page.sentiment {
            SentimentSection::Analyzed { reviews, distribution } => {
                assert_eq!(reviews.len(), 2);
                assert_eq!(reviews[0].sentiment(), SentimentLabel::Positive);
                assert_eq!(distribution.total(), 2);
            }
            other => panic!("expected analyzed sentiment, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_present_unknown_title_fails() {
        let result = build_showcase().present("Lagaan").await;
        assert!(result.is_err(), "Should fail for missing movie");
    }

    #[tokio::test]
    async fn test_missing_or_placeholder_reviews() {
        let showcase = build_showcase();

        for title in ["PK", "Rang De Basanti", "Taare Zameen Par"] {
            let page = showcase.present(title).await.unwrap();
            assert_eq!(page.sentiment, SentimentSection::NoReviews, "{title}");
        }
    }

    #[tokio::test]
    async fn test_classifier_failure_keeps_recommendations() {
        let down = Arc::new(DownClassifier::default());
        let showcase = MovieShowcase::new(build_test_catalog(), down.clone());

        let page = showcase.present("Munna Bhai M.B.B.S.").await.unwrap();

        assert!(matches!(page.sentiment, SentimentSection::Unavailable { .. }));
        assert_eq!(page.recommendations.len(), 5);
        assert_eq!(down.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_rejected_batch_is_unavailable_with_reason() {
        let showcase = MovieShowcase::new(build_test_catalog(), Arc::new(RejectingClassifier));
        assert_eq!(showcase.classifier().name(), "rejecting");

        let page = showcase.present("3 Idiots").await.unwrap();

        match page.sentiment {
            SentimentSection::Unavailable { reason } => assert!(reason.contains("batch too large")),
            other => panic!("expected unavailable sentiment, got {other:?}"),
        }
        assert_eq!(page.recommendations.len(), 5);
    }

    #[tokio::test]
    async fn test_no_reviews_never_calls_classifier() {
        let down = Arc::new(DownClassifier::default());
        let showcase = MovieShowcase::new(build_test_catalog(), down.clone());

        let page = showcase.present("PK").await.unwrap();

        assert_eq!(page.sentiment, SentimentSection::NoReviews);
        assert_eq!(down.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_recommendation_limit() {
        let showcase = build_showcase().with_recommendation_limit(2);
        let page = showcase.present("PK").await.unwrap();

        let titles: Vec<&str> = page.recommendations.iter().map(|r| r.title()).collect();
        assert_eq!(titles, vec!["3 Idiots", "Taare Zameen Par"]);
    }

    #[test]
    fn test_recommend_unknown_title_is_empty() {
        assert!(build_showcase().recommend("Lagaan").is_empty());
    }

    #[test]
    fn test_sentiment_section_serializes_with_status_tag() {
        let json = serde_json::to_value(SentimentSection::Unavailable {
            reason: "down".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "unavailable");
        assert_eq!(json["reason"], "down");

        let json = serde_json::to_value(SentimentSection::NoReviews).unwrap();
        assert_eq!(json["status"], "no_reviews");
    }
}

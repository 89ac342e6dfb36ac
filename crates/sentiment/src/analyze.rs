//! Batch analysis of reviews and the per-bucket tally.

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::label::SentimentLabel;
use serde::Serialize;
use tracing::{debug, error, instrument};

/// One analyzed review: text, raw classifier label, confidence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewSentiment {
    pub review: String,
    pub label: String,
    pub score: f32,
}

impl ReviewSentiment {
    /// Display bucket of the raw label
    pub fn sentiment(&self) -> SentimentLabel {
        SentimentLabel::from_model_label(&self.label)
    }
}

/// Classify `reviews` with a single batched call.
///
/// An empty list returns immediately without touching the classifier.
/// The response is checked before use: one prediction per review and every
/// score a finite value in `[0, 1]`.
#[instrument(skip_all, fields(classifier = classifier.name(), reviews = reviews.len()))]
pub async fn analyze(
    classifier: &dyn SentimentClassifier,
    reviews: Vec<String>,
) -> Result<Vec<ReviewSentiment>, SentimentError> {
    if reviews.is_empty() {
        return Ok(Vec::new());
    }

    debug!("Classifying {} reviews", reviews.len());
    let predictions = classifier.classify(&reviews).await?;

    if predictions.len() != reviews.len() {
        error!(
            "Mismatch in number of predictions returned: expected {}, got {}",
            reviews.len(),
            predictions.len()
        );
        return Err(SentimentError::InvalidResponse(format!(
            "expected {} predictions, got {}",
            reviews.len(),
            predictions.len()
        )));
    }

    if let Some(bad) = predictions
        .iter()
        .find(|p| !p.score.is_finite() || !(0.0..=1.0).contains(&p.score))
    {
        error!("Score out of range for label {:?}: {}", bad.label, bad.score);
        return Err(SentimentError::InvalidResponse(format!(
            "score {} for label {:?} is outside [0, 1]",
            bad.score, bad.label
        )));
    }

    Ok(reviews
        .into_iter()
        .zip(predictions)
        .map(|(review, prediction)| ReviewSentiment {
            review,
            label: prediction.label,
            score: prediction.score,
        })
        .collect())
}

/// Count of analyzed reviews per display bucket.
///
/// `Unknown` is its own bucket, so `total()` always equals the number of
/// results tallied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SentimentDistribution {
    pub negative: usize,
    pub neutral: usize,
    pub positive: usize,
    pub unknown: usize,
}

impl SentimentDistribution {
    pub fn tally(results: &[ReviewSentiment]) -> Self {
        let mut distribution = Self::default();
        for result in results {
            distribution.record(result.sentiment());
        }
        distribution
    }

    pub fn record(&mut self, label: SentimentLabel) {
        match label {
            SentimentLabel::Negative => self.negative += 1,
            SentimentLabel::Neutral => self.neutral += 1,
            SentimentLabel::Positive => self.positive += 1,
            SentimentLabel::Unknown => self.unknown += 1,
        }
    }

    pub fn count(&self, label: SentimentLabel) -> usize {
        match label {
            SentimentLabel::Negative => self.negative,
            SentimentLabel::Neutral => self.neutral,
            SentimentLabel::Positive => self.positive,
            SentimentLabel::Unknown => self.unknown,
        }
    }

    pub fn total(&self) -> usize {
        self.negative + self.neutral + self.positive + self.unknown
    }

    /// Buckets in chart order: the three known ones, then Unknown
    pub fn buckets(&self) -> [(SentimentLabel, usize); 4] {
        [
            (SentimentLabel::Negative, self.negative),
            (SentimentLabel::Neutral, self.neutral),
            (SentimentLabel::Positive, self.positive),
            (SentimentLabel::Unknown, self.unknown),
        ]
    }

    /// Known bucket with the most reviews; ties go to the earlier bucket
    pub fn dominant(&self) -> Option<SentimentLabel> {
        SentimentLabel::KNOWN
            .into_iter()
            .filter(|label| self.count(*label) > 0)
            .fold(None, |best: Option<SentimentLabel>, label| match best {
                Some(b) if self.count(b) >= self.count(label) => Some(b),
                _ => Some(label),
            })
    }
}

//! The sentiment classification capability.

use crate::error::SentimentError;
use crate::label::Classification;
use async_trait::async_trait;

/// Anything that can label a batch of texts.
///
/// ## Contract
/// - `classify` receives a non-empty batch and returns exactly one
///   [`Classification`] per input, in input order
/// - scores are confidences in `[0, 1]`
/// - `Send + Sync` so one classifier can be shared behind an `Arc`
#[async_trait]
pub trait SentimentClassifier: Send + Sync {
    /// Short name of this classifier (for logging)
    fn name(&self) -> &str;

    /// Identifier of the model behind it
    fn model(&self) -> &str;

    /// Classify a batch of texts in one call
    async fn classify(&self, texts: &[String]) -> Result<Vec<Classification>, SentimentError>;
}

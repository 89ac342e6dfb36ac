use thiserror::Error;

/// Errors that can occur when classifying reviews
#[derive(Error, Debug)]
pub enum SentimentError {
    /// The classifier could not be reached (service down, timeout, bad address)
    #[error("Sentiment classifier unavailable: {0}")]
    Unavailable(String),

    /// The classifier was reached but rejected or failed the request
    #[error("Failed to classify reviews: {0}")]
    ClassificationFailed(String),

    /// The classifier answered with something we can't use
    #[error("Invalid response from sentiment classifier: {0}")]
    InvalidResponse(String),
}

impl SentimentError {
    pub fn is_unavailable(&self) -> bool {
        matches!(self, SentimentError::Unavailable(_))
    }
}

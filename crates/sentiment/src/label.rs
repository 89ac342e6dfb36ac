//! Sentiment labels and the model-label mapping.
//!
//! Classifiers emit raw label strings (`LABEL_0`, `LABEL_1`, `LABEL_2` for the
//! default model). [`SentimentLabel::from_model_label`] maps any string to a
//! display bucket; strings outside the vocabulary become `Unknown`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Display bucket for one classified review
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Neutral,
    Positive,
    Unknown,
}

impl SentimentLabel {
    /// The three buckets a well-behaved classifier produces
    pub const KNOWN: [SentimentLabel; 3] = [
        SentimentLabel::Negative,
        SentimentLabel::Neutral,
        SentimentLabel::Positive,
    ];

    /// Map a raw classifier label to a bucket. Never fails.
    pub fn from_model_label(label: &str) -> Self {
        let label = label.trim();
        match label {
            "LABEL_0" => return SentimentLabel::Negative,
            "LABEL_1" => return SentimentLabel::Neutral,
            "LABEL_2" => return SentimentLabel::Positive,
            _ => {}
        }

        match label.to_ascii_lowercase().as_str() {
            "negative" => SentimentLabel::Negative,
            "neutral" => SentimentLabel::Neutral,
            "positive" => SentimentLabel::Positive,
            _ => SentimentLabel::Unknown,
        }
    }

    /// The raw label the default model uses for this bucket
    pub fn model_label(self) -> Option<&'static str> {
        match self {
            SentimentLabel::Negative => Some("LABEL_0"),
            SentimentLabel::Neutral => Some("LABEL_1"),
            SentimentLabel::Positive => Some("LABEL_2"),
            SentimentLabel::Unknown => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Neutral => "Neutral",
            SentimentLabel::Positive => "Positive",
            SentimentLabel::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One prediction as returned by a classifier: raw label plus confidence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub label: String,
    pub score: f32,
}

impl Classification {
    pub fn new(label: impl Into<String>, score: f32) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_labels_map_to_buckets() {
        assert_eq!(SentimentLabel::from_model_label("LABEL_0"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_model_label("LABEL_1"), SentimentLabel::Neutral);
        assert_eq!(SentimentLabel::from_model_label("LABEL_2"), SentimentLabel::Positive);
    }

    #[test]
    fn test_named_labels_are_case_insensitive() {
        assert_eq!(SentimentLabel::from_model_label("positive"), SentimentLabel::Positive);
        assert_eq!(SentimentLabel::from_model_label("NEGATIVE"), SentimentLabel::Negative);
        assert_eq!(SentimentLabel::from_model_label(" Neutral "), SentimentLabel::Neutral);
    }

    #[test]
    fn test_out_of_vocabulary_is_unknown() {
        assert_eq!(SentimentLabel::from_model_label("LABEL_3"), SentimentLabel::Unknown);
        assert_eq!(SentimentLabel::from_model_label("label_0"), SentimentLabel::Unknown);
        assert_eq!(SentimentLabel::from_model_label(""), SentimentLabel::Unknown);
    }

    #[test]
    fn test_model_label_round_trip_for_known_buckets() {
        for label in SentimentLabel::KNOWN {
            let raw = label.model_label().unwrap();
            assert_eq!(SentimentLabel::from_model_label(raw), label);
        }
        assert_eq!(SentimentLabel::Unknown.model_label(), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(SentimentLabel::Positive.to_string(), "Positive");
        assert_eq!(SentimentLabel::Unknown.to_string(), "Unknown");
    }
}

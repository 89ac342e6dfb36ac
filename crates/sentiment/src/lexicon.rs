//! Word-list sentiment classifier.
//!
//! Offline fallback used when no inference service is configured. It speaks
//! the same `LABEL_0/1/2` vocabulary as the default pretrained model so the
//! rest of the pipeline can't tell the difference.

use crate::classifier::SentimentClassifier;
use crate::error::SentimentError;
use crate::label::{Classification, SentimentLabel};
use async_trait::async_trait;

const POSITIVE: &[&str] = &[
    "amazing", "awesome", "beautiful", "best", "brilliant", "classic", "enjoyed", "engaging",
    "excellent", "fantastic", "fun", "good", "great", "gripping", "hilarious", "impressive",
    "love", "loved", "masterpiece", "memorable", "outstanding", "perfect", "powerful",
    "recommend", "superb", "touching", "wonderful",
];

const NEGATIVE: &[&str] = &[
    "annoying", "awful", "bad", "boring", "disappointed", "disappointing", "dull", "hate",
    "hated", "horrible", "lame", "mess", "mediocre", "overrated", "pointless", "poor",
    "predictable", "slow", "stupid", "terrible", "waste", "weak", "worst",
];

/// A negator this many tokens before a word flips its polarity
const NEGATION_WINDOW: usize = 3;

/// Confidence reported when no sentiment words are found
const NO_SIGNAL_CONFIDENCE: f32 = 0.6;

#[derive(Debug, Clone, Default)]
pub struct LexiconClassifier;

impl LexiconClassifier {
    pub fn new() -> Self {
        Self
    }

    /// Label and confidence for a single text
    pub fn classify_text(&self, text: &str) -> Classification {
        let tokens: Vec<String> = tokenize(text).collect();
        let (mut positive, mut negative) = (0u32, 0u32);

        for (i, token) in tokens.iter().enumerate() {
            let polarity = word_polarity(token);
            if polarity == 0 {
                continue;
            }
            let negated = (1..=NEGATION_WINDOW).any(|k| i >= k && is_negator(&tokens[i - k]));
            let polarity = if negated { -polarity } else { polarity };

            if polarity > 0 {
                positive += 1;
            } else {
                negative += 1;
            }
        }

        let hits = (positive + negative) as f32;
        let (label, score) = if positive > negative {
            (
                SentimentLabel::Positive,
                0.5 + 0.5 * (positive - negative) as f32 / hits,
            )
        } else if negative > positive {
            (
                SentimentLabel::Negative,
                0.5 + 0.5 * (negative - positive) as f32 / hits,
            )
        } else if hits == 0.0 {
            (SentimentLabel::Neutral, NO_SIGNAL_CONFIDENCE)
        } else {
            (SentimentLabel::Neutral, 0.5)
        };

        // KNOWN buckets always carry a model label
        let raw = label.model_label().unwrap_or("LABEL_1");
        Classification::new(raw, score)
    }
}

#[async_trait]
impl SentimentClassifier for LexiconClassifier {
    fn name(&self) -> &str {
        "lexicon"
    }

    fn model(&self) -> &str {
        "lexicon-v1"
    }

    async fn classify(&self, texts: &[String]) -> Result<Vec<Classification>, SentimentError> {
        Ok(texts.iter().map(|t| self.classify_text(t)).collect())
    }
}

/// +1 positive, -1 negative, 0 neither
fn word_polarity(word: &str) -> i32 {
    if POSITIVE.contains(&word) {
        1
    } else if NEGATIVE.contains(&word) {
        -1
    } else {
        0
    }
}

/// Lowercase word tokens; apostrophes stay so "isn't" is one token
fn tokenize(s: &str) -> impl Iterator<Item = String> + '_ {
    s.split(|c: char| !(c.is_alphanumeric() || c == '\''))
        .map(|t| t.trim_matches('\''))
        .filter(|t| !t.is_empty())
        .map(|t| t.to_lowercase())
}

fn is_negator(token: &str) -> bool {
    matches!(
        token,
        "not"
            | "no"
            | "never"
            | "hardly"
            | "without"
            | "isn't"
            | "wasn't"
            | "aren't"
            | "weren't"
            | "don't"
            | "didn't"
            | "doesn't"
            | "won't"
            | "can't"
            | "cannot"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label_of(text: &str) -> SentimentLabel {
        SentimentLabel::from_model_label(&LexiconClassifier::new().classify_text(text).label)
    }

    #[test]
    fn test_polarity() {
        assert_eq!(label_of("great movie"), SentimentLabel::Positive);
        assert_eq!(label_of("terrible film"), SentimentLabel::Negative);
        assert_eq!(label_of("It was released on a Friday."), SentimentLabel::Neutral);
    }

    #[test]
    fn test_negation_flips_polarity() {
        assert_eq!(label_of("This was not good at all"), SentimentLabel::Negative);
        assert_eq!(label_of("It isn't boring"), SentimentLabel::Positive);
        // Outside the window the negator no longer applies
        assert_eq!(label_of("Not what I expected, but great"), SentimentLabel::Positive);
    }

    #[test]
    fn test_mixed_review_is_neutral() {
        assert_eq!(label_of("Great songs, boring plot."), SentimentLabel::Neutral);
    }

    #[test]
    fn test_scores_within_unit_interval() {
        let classifier = LexiconClassifier::new();
        for text in ["", "good good good", "bad", "good bad", "LOVED it, a masterpiece!"] {
            let c = classifier.classify_text(text);
            assert!((0.0..=1.0).contains(&c.score), "{text:?} scored {}", c.score);
            assert_ne!(
                SentimentLabel::from_model_label(&c.label),
                SentimentLabel::Unknown
            );
        }
    }

    #[test]
    fn test_tokenize() {
        let tokens: Vec<String> = tokenize("Isn't it 'GREAT'?!").collect();
        assert_eq!(tokens, vec!["isn't", "it", "great"]);
    }

    #[tokio::test]
    async fn test_batch_classify_preserves_order() {
        let texts = vec!["great movie".to_string(), "terrible film".to_string()];
        let results = LexiconClassifier::new().classify(&texts).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].label, "LABEL_2");
        assert_eq!(results[1].label, "LABEL_0");
    }
}

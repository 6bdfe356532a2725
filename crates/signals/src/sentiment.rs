//! Keyword sentiment scoring.
//!
//! Each post scores the sign of (positive hits - negative hits), so a post
//! counts as -1, 0, or +1 no matter how many keywords it repeats. The
//! aggregate signal is the mean post score.
//!
//! Matching is case-insensitive on whole words: `happy` matches "Happy!" but
//! not "unhappy". Multi-word keywords match consecutive words.

use alpha_feed_core::{Direction, SentimentObservation, SignalResult, TwitterConfig};
use serde::{Deserialize, Serialize};

// ============================================
// Lexicon
// ============================================

/// Positive and negative keyword lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentLexicon {
    pub positive: Vec<String>,
    pub negative: Vec<String>,
}

impl Default for SentimentLexicon {
    fn default() -> Self {
        Self {
            positive: vec![
                "awesome".to_string(),
                "amazing".to_string(),
                "happy".to_string(),
            ],
            negative: vec!["worst".to_string(), "hate".to_string()],
        }
    }
}

impl SentimentLexicon {
    /// Uses the keyword lists from the social-media configuration.
    #[must_use]
    pub fn from_config(config: &TwitterConfig) -> Self {
        Self {
            positive: config.positive_keywords.clone(),
            negative: config.negative_keywords.clone(),
        }
    }

    /// Scores one post: `1` net positive, `-1` net negative, `0` otherwise.
    #[must_use]
    pub fn score_text(&self, text: &str) -> i32 {
        let words = tokenize(text);
        let positive = count_hits(&words, &self.positive);
        let negative = count_hits(&words, &self.negative);
        (positive - negative).signum()
    }
}

fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

fn count_hits(words: &[String], keywords: &[String]) -> i32 {
    keywords
        .iter()
        .map(|keyword| {
            let phrase = tokenize(keyword);
            if phrase.is_empty() {
                return 0;
            }
            words
                .windows(phrase.len())
                .filter(|window| *window == phrase.as_slice())
                .count()
        })
        .map(|hits| i32::try_from(hits).unwrap_or(i32::MAX))
        .fold(0, i32::saturating_add)
}

// ============================================
// Aggregation
// ============================================

/// Averages per-post scores into a single sentiment score in `[-1, 1]`.
///
/// Returns `0.0` when there are no observations.
#[must_use]
pub fn calculate_sentiment_signal(
    observations: &[SentimentObservation],
    lexicon: &SentimentLexicon,
) -> f64 {
    if observations.is_empty() {
        return 0.0;
    }

    let total: f64 = observations
        .iter()
        .map(|observation| f64::from(lexicon.score_text(&observation.text)))
        .sum();

    #[allow(clippy::cast_precision_loss)]
    let count = observations.len() as f64;
    total / count
}

// ============================================
// Classification
// ============================================

/// Classifies an aggregate score.
///
/// Strictly positive scores are bullish; zero and below are bearish.
/// Confidence is the absolute score, not clamped.
#[must_use]
pub fn classify_score(score: f64) -> SignalResult {
    let direction = if score > 0.0 {
        Direction::Bullish
    } else {
        Direction::Bearish
    };

    SignalResult {
        direction,
        confidence: score.abs(),
        rationale: format!("Sentiment score: {score:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alpha_feed_core::AppConfig;

    fn posts(texts: &[&str]) -> Vec<SentimentObservation> {
        texts.iter().map(|t| SentimentObservation::from_text(*t)).collect()
    }

    // ==================== Lexicon ====================

    #[test]
    fn test_default_lexicon_matches_config_defaults() {
        let from_config = SentimentLexicon::from_config(&AppConfig::default().twitter);
        assert_eq!(from_config, SentimentLexicon::default());
    }

    #[test]
    fn test_score_text_sign_of_hits() {
        let lexicon = SentimentLexicon::default();
        assert_eq!(lexicon.score_text("BTC is AMAZING, so happy"), 1);
        assert_eq!(lexicon.score_text("worst week, I hate it"), -1);
        assert_eq!(lexicon.score_text("amazing rally but I hate fees"), 0);
        assert_eq!(lexicon.score_text("just holding"), 0);
    }

    #[test]
    fn test_score_text_is_capped_per_post() {
        let lexicon = SentimentLexicon::default();
        assert_eq!(lexicon.score_text("awesome awesome awesome awesome"), 1);
    }

    #[test]
    fn test_score_text_matches_whole_words_only() {
        let lexicon = SentimentLexicon::default();
        assert_eq!(lexicon.score_text("unhappy hater"), 0);
        assert_eq!(lexicon.score_text("#happy"), 1);
    }

    #[test]
    fn test_score_text_multi_word_keyword() {
        let lexicon = SentimentLexicon {
            positive: vec!["to the moon".to_string()],
            negative: vec!["rug pull".to_string()],
        };
        assert_eq!(lexicon.score_text("BTC to the moon!"), 1);
        assert_eq!(lexicon.score_text("moon to the"), 0);
        assert_eq!(lexicon.score_text("Another rug-pull"), -1);
    }

    #[test]
    fn test_empty_lexicon_scores_zero() {
        let lexicon = SentimentLexicon {
            positive: Vec::new(),
            negative: vec![String::new()],
        };
        assert_eq!(lexicon.score_text("amazing"), 0);
    }

    // ==================== Aggregation ====================

    #[test]
    fn test_calculate_sentiment_signal_mean() {
        let lexicon = SentimentLexicon::default();
        let observations = posts(&["amazing", "happy day", "hate this", "nothing"]);
        let score = calculate_sentiment_signal(&observations, &lexicon);
        assert!((score - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_calculate_sentiment_signal_empty_is_zero() {
        let score = calculate_sentiment_signal(&[], &SentimentLexicon::default());
        assert_eq!(score, 0.0);
    }

    // ==================== Classification ====================

    #[test]
    fn test_positive_score_is_bullish() {
        let result = classify_score(2.5);
        assert_eq!(result.direction, Direction::Bullish);
        assert_eq!(result.confidence, 2.5);
        assert_eq!(result.rationale, "Sentiment score: 2.5");
    }

    #[test]
    fn test_negative_score_is_bearish() {
        let result = classify_score(-1.0);
        assert_eq!(result.direction, Direction::Bearish);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.rationale, "Sentiment score: -1.0");
    }

    #[test]
    fn test_zero_score_is_bearish() {
        let result = classify_score(0.0);
        assert_eq!(result.direction, Direction::Bearish);
        assert_eq!(result.confidence, 0.0);
        assert_eq!(result.rationale, "Sentiment score: 0.0");
    }

    #[test]
    fn test_confidence_is_unclamped() {
        assert_eq!(classify_score(-7.0).confidence, 7.0);
    }
}

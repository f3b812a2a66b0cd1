//! Keyword-count sentiment classification.

use super::AnalyzerConfig;
use crate::types::Sentiment;

/// A side must lead by more than this margin to win; suppresses noise from
/// single stray keywords.
const MARGIN: usize = 1;

/// Classify a response by counting positive and negative keywords.
///
/// Positive iff `positive > negative + 1`, negative iff
/// `negative > positive + 1`, otherwise neutral. Words are matched whole,
/// lowercased, with surrounding punctuation stripped.
#[must_use]
pub fn classify_sentiment(config: &AnalyzerConfig, response: &str) -> Sentiment {
    let mut positive = 0usize;
    let mut negative = 0usize;

    for word in response.split_whitespace() {
        let bare = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        if bare.is_empty() {
            continue;
        }
        if config.positive_words.iter().any(|w| *w == bare) {
            positive += 1;
        } else if config.negative_words.iter().any(|w| *w == bare) {
            negative += 1;
        }
    }

    if positive > negative + MARGIN {
        Sentiment::Positive
    } else if negative > positive + MARGIN {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

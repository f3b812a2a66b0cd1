//! Composite visibility scoring.
//!
//! An intentionally simple, explainable weighted sum over the analyzed
//! result set; not a fitted statistical model. All weights come from
//! [`ScoreWeights`] so deployments can tune them.

use aivis_core::ScoreWeights;

use crate::types::AnalyzedResult;

/// Aggregate scores for one fingerprint run.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityMetrics {
    /// Percentage of responses mentioning the business, `[0, 100]`.
    pub mention_rate: f64,
    /// Mean sentiment weight over mentioned responses; 0 when none.
    pub sentiment_score: f64,
    /// Mean accuracy over mentioned responses; 0 when none.
    pub accuracy_score: f64,
    /// Mean of all observed rank positions, if any.
    pub avg_rank_position: Option<f64>,
    /// Composite score, rounded and clamped to `[0, 100]`.
    pub visibility_score: f64,
}

/// Compute the composite metrics over all analyzed results of a run.
///
/// Sentiment and accuracy average only over mentioned results and are 0 by
/// convention when nothing was mentioned. The ranking component rewards a
/// low (good) average rank and falls back to `neutral_rank_component` when
/// no rank was observed anywhere. The final score is defensively clamped
/// to `[0, 100]`.
#[must_use]
pub fn aggregate(results: &[AnalyzedResult], weights: &ScoreWeights) -> VisibilityMetrics {
    let total = results.len();
    let mentioned: Vec<&AnalyzedResult> = results.iter().filter(|r| r.mentioned).collect();

    #[allow(clippy::cast_precision_loss)]
    let mention_rate = if total == 0 {
        0.0
    } else {
        mentioned.len() as f64 / total as f64 * 100.0
    };

    let sentiment_score = mean(mentioned.iter().map(|r| r.sentiment.weight())).unwrap_or(0.0);
    let accuracy_score = mean(mentioned.iter().map(|r| r.accuracy)).unwrap_or(0.0);
    let avg_rank_position = mean(
        results
            .iter()
            .filter_map(|r| r.rank_position.map(f64::from)),
    );

    let ranking_component = avg_rank_position.map_or(weights.neutral_rank_component, |avg| {
        (weights.rank * (6.0 - avg) / 5.0).max(0.0)
    });

    let visibility_score = (mention_rate * weights.mention_rate
        + sentiment_score * weights.sentiment
        + accuracy_score * weights.accuracy
        + ranking_component)
        .round()
        .clamp(0.0, 100.0);

    VisibilityMetrics {
        mention_rate,
        sentiment_score,
        accuracy_score,
        avg_rank_position,
        visibility_score,
    }
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let mut sum = 0.0;
    let mut count = 0usize;
    for v in values {
        sum += v;
        count += 1;
    }
    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let denom = count as f64;
    Some(sum / denom)
}

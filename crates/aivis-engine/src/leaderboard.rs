//! Competitive leaderboard aggregation over recommendation results.

use std::collections::HashMap;

use crate::types::{
    AnalyzedResult, CompetitiveLeaderboard, CompetitorStanding, PromptKind, TargetStanding,
};

/// Cap on the emitted competitor list.
const MAX_COMPETITORS: usize = 10;

/// Build the competitive leaderboard from a run's analyzed results.
///
/// Only recommendation-type results contribute. Competitors are merged
/// case-insensitively, ranked by mention count (desc) with average position
/// (asc) as the tie-break, and capped at [`MAX_COMPETITORS`]. When the run
/// produced no recommendation results the leaderboard is explicitly empty
/// rather than an error.
#[must_use]
pub fn build_leaderboard(target_name: &str, results: &[AnalyzedResult]) -> CompetitiveLeaderboard {
    let recommendation: Vec<&AnalyzedResult> = results
        .iter()
        .filter(|r| r.kind == PromptKind::Recommendation)
        .collect();

    let total_recommendation_queries = recommendation.len();
    let target_mentions = recommendation.iter().filter(|r| r.mentioned).count();
    let target_rank = mean_u32(recommendation.iter().filter_map(|r| r.rank_position));

    // Frequency map keyed case-insensitively; keeps the first-seen display
    // name and every observed position.
    let mut order: Vec<String> = Vec::new();
    let mut by_name: HashMap<String, (String, Vec<u32>)> = HashMap::new();
    for result in &recommendation {
        let Some(mentions) = result.competitor_mentions.as_ref() else {
            continue;
        };
        for mention in mentions {
            let key = mention.name.to_lowercase();
            let entry = by_name
                .entry(key.clone())
                .or_insert_with(|| {
                    order.push(key);
                    (mention.name.clone(), Vec::new())
                });
            entry.1.push(mention.position);
        }
    }

    let mut competitors: Vec<CompetitorStanding> = order
        .iter()
        .filter_map(|key| by_name.get(key))
        .map(|(name, positions)| {
            let mention_count = positions.len();
            let avg_position = mean_u32(positions.iter().copied()).unwrap_or(0.0);
            CompetitorStanding {
                name: name.clone(),
                mention_count,
                avg_position,
                appears_with_target: mention_count,
            }
        })
        .collect();

    competitors.sort_by(|a, b| {
        b.mention_count.cmp(&a.mention_count).then_with(|| {
            a.avg_position
                .partial_cmp(&b.avg_position)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
    });
    competitors.truncate(MAX_COMPETITORS);

    CompetitiveLeaderboard {
        target: TargetStanding {
            name: target_name.to_owned(),
            rank: target_rank,
            mention_count: target_mentions,
            avg_position: target_rank,
        },
        competitors,
        total_recommendation_queries,
    }
}

fn mean_u32(values: impl Iterator<Item = u32>) -> Option<f64> {
    let mut sum = 0u64;
    let mut count = 0u64;
    for v in values {
        sum += u64::from(v);
        count += 1;
    }
    if count == 0 {
        return None;
    }
    #[allow(clippy::cast_precision_loss)]
    let mean = sum as f64 / count as f64;
    Some(mean)
}

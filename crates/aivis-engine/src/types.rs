//! Result and leaderboard types produced by a fingerprint run.
//!
//! Everything here is serializable so the caller can persist the analysis
//! record as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The three prompt types in the fingerprint battery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// "What do you know about X?" — knowledge probe.
    Factual,
    /// "What is your opinion of X?" — favorability probe.
    Opinion,
    /// "What are the best Xs in Y?" — ranked-list probe; the only source
    /// of rank and competitor data.
    Recommendation,
}

impl PromptKind {
    pub const ALL: [Self; 3] = [Self::Factual, Self::Opinion, Self::Recommendation];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Factual => "factual",
            Self::Opinion => "opinion",
            Self::Recommendation => "recommendation",
        }
    }
}

/// One (model × prompt type) unit of work. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryTask {
    pub model_id: String,
    pub kind: PromptKind,
    pub prompt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Numeric weight used by the metrics aggregator.
    #[must_use]
    pub fn weight(self) -> f64 {
        match self {
            Self::Positive => 1.0,
            Self::Neutral => 0.5,
            Self::Negative => 0.0,
        }
    }
}

/// A competitor name with the numbered-list position it was extracted from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedMention {
    pub name: String,
    /// 1-based position parsed from the list label (`"3."` → 3).
    pub position: u32,
}

/// One analyzed model response. Produced once per task, including for
/// failed queries (which yield the degraded defaults).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzedResult {
    pub model: String,
    pub kind: PromptKind,
    pub mentioned: bool,
    pub sentiment: Sentiment,
    /// Coarse mention-based placeholder in `[0, 1]`, not a semantic measure.
    pub accuracy: f64,
    /// Numbered-list rank of the target business; recommendation prompts only.
    pub rank_position: Option<u32>,
    /// Competitors extracted from the response; recommendation prompts only.
    pub competitor_mentions: Option<Vec<RankedMention>>,
    pub raw_response: String,
    pub tokens_used: u32,
}

/// The target business's own standing in recommendation responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetStanding {
    pub name: String,
    /// Mean numbered-list rank across recommendation responses, if any.
    pub rank: Option<f64>,
    /// Recommendation responses that mentioned the target.
    pub mention_count: usize,
    pub avg_position: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorStanding {
    pub name: String,
    pub mention_count: usize,
    pub avg_position: f64,
    pub appears_with_target: usize,
}

/// Ranked competitor list surfaced by recommendation prompts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitiveLeaderboard {
    pub target: TargetStanding,
    /// Top competitors, mention count desc then avg position asc, max 10.
    pub competitors: Vec<CompetitorStanding>,
    /// All recommendation-type results, regardless of mention outcome.
    pub total_recommendation_queries: usize,
}

/// The complete output of one fingerprint run, handed to the caller for
/// persistence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintAnalysis {
    pub business_id: Uuid,
    pub business_name: String,
    /// Composite score in `[0, 100]`.
    pub visibility_score: f64,
    /// Percentage of responses mentioning the business, `[0, 100]`.
    pub mention_rate: f64,
    /// Mean sentiment weight over mentioned responses, `[0, 1]`; 0 when
    /// nothing was mentioned.
    pub sentiment_score: f64,
    /// Mean accuracy over mentioned responses, `[0, 1]`; 0 when nothing
    /// was mentioned.
    pub accuracy_score: f64,
    pub avg_rank_position: Option<f64>,
    pub results: Vec<AnalyzedResult>,
    pub leaderboard: CompetitiveLeaderboard,
    pub generated_at: DateTime<Utc>,
}

//! AI-visibility fingerprinting engine.
//!
//! Probes a battery of LLM backends with standardized prompts about a
//! business, analyzes each response for mentions, sentiment, and ranking,
//! and aggregates the results into a composite visibility score plus a
//! competitive leaderboard.
//!
//! The engine is a pure transform over immutable inputs: the caller hands
//! in a crawled [`aivis_core::BusinessProfile`] and a
//! [`aivis_gateway::ModelGateway`], and gets back one
//! [`FingerprintAnalysis`] to persist. Individual provider failures are
//! absorbed into degraded per-task results and never abort a run.

pub mod analyzer;
pub mod error;
pub mod leaderboard;
pub mod metrics;
pub mod orchestrator;
pub mod pipeline;
pub mod prompts;
pub mod types;

pub use analyzer::AnalyzerConfig;
pub use error::FingerprintError;
pub use pipeline::fingerprint;
pub use prompts::{build_prompts, PromptSet};
pub use types::{
    AnalyzedResult, CompetitiveLeaderboard, CompetitorStanding, FingerprintAnalysis, PromptKind,
    QueryTask, RankedMention, Sentiment, TargetStanding,
};

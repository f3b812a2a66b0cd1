//! Top-level fingerprint pipeline.
//!
//! 1. Validate the profile's crawled context (fatal if missing).
//! 2. Build the three prompts.
//! 3. Build the (model × prompt type) task set.
//! 4. Execute via the Model Gateway, absorbing per-task failures.
//! 5. Aggregate composite metrics and the competitive leaderboard.
//!
//! A score is always produced once crawled context exists, even under a
//! total provider outage; callers distinguish "zero visibility" from "the
//! run failed" by whether this function returned `Ok` at all.

use aivis_core::{BusinessProfile, FingerprintConfig, RunOptions};
use aivis_gateway::ModelGateway;
use chrono::Utc;

use crate::analyzer::AnalyzerConfig;
use crate::error::FingerprintError;
use crate::leaderboard::build_leaderboard;
use crate::metrics::aggregate;
use crate::orchestrator::{build_tasks, run_tasks};
use crate::prompts::build_prompts;
use crate::types::FingerprintAnalysis;

/// Run a full AI-visibility fingerprint for one business.
///
/// # Errors
///
/// Returns [`FingerprintError::InvalidProfile`] when the profile has no
/// crawled context. All other failures (provider errors, unknown models)
/// degrade into per-task sentinel results and never propagate.
pub async fn fingerprint<G>(
    gateway: &G,
    profile: &BusinessProfile,
    config: &FingerprintConfig,
    options: RunOptions,
) -> Result<FingerprintAnalysis, FingerprintError>
where
    G: ModelGateway + ?Sized,
{
    let prompts = build_prompts(profile)?;
    let tasks = build_tasks(&config.models, &prompts);
    let (parallel, batch_size) = config.effective_mode(options);

    tracing::info!(
        business = %profile.name,
        tasks = tasks.len(),
        models = config.models.len(),
        parallel,
        batch_size,
        "starting fingerprint run"
    );

    let analyzer = AnalyzerConfig::default();
    let results = run_tasks(
        gateway,
        &analyzer,
        &profile.name,
        tasks,
        parallel,
        batch_size,
    )
    .await;

    let metrics = aggregate(&results, &config.weights);
    let leaderboard = build_leaderboard(&profile.name, &results);

    tracing::info!(
        business = %profile.name,
        visibility_score = metrics.visibility_score,
        mention_rate = metrics.mention_rate,
        competitors = leaderboard.competitors.len(),
        "fingerprint run complete"
    );

    Ok(FingerprintAnalysis {
        business_id: profile.id,
        business_name: profile.name.clone(),
        visibility_score: metrics.visibility_score,
        mention_rate: metrics.mention_rate,
        sentiment_score: metrics.sentiment_score,
        accuracy_score: metrics.accuracy_score,
        avg_rank_position: metrics.avg_rank_position,
        results,
        leaderboard,
        generated_at: Utc::now(),
    })
}

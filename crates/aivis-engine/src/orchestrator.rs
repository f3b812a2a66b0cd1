//! Query orchestration: task construction and partial-failure-tolerant
//! execution across the model battery.
//!
//! Three execution modes share one settle wrapper: sequential, one
//! unbounded concurrent wave, and sequential waves of `batch_size`
//! concurrent tasks (the provider rate-limit lever). A gateway failure
//! never aborts the run; it becomes a degraded result, so N tasks always
//! yield exactly N results.

use aivis_core::ModelSpec;
use aivis_gateway::ModelGateway;
use futures::future::join_all;

use crate::analyzer::{self, AnalyzerConfig};
use crate::prompts::PromptSet;
use crate::types::{AnalyzedResult, PromptKind, QueryTask, Sentiment};

/// Build the (model × prompt type) cross product, model-major order.
#[must_use]
pub fn build_tasks(models: &[ModelSpec], prompts: &PromptSet) -> Vec<QueryTask> {
    let mut tasks = Vec::with_capacity(models.len() * PromptKind::ALL.len());
    for model in models {
        for kind in PromptKind::ALL {
            tasks.push(QueryTask {
                model_id: model.model_id.clone(),
                kind,
                prompt: prompts.get(kind).to_owned(),
            });
        }
    }
    tasks
}

/// Execute all tasks and return one [`AnalyzedResult`] per task.
///
/// `parallel = false` runs tasks one at a time in input order. With
/// `parallel = true`, tasks run in concurrent waves of `batch_size`; a
/// `batch_size` at or above the task count collapses to a single unbounded
/// wave. Concurrent modes do not guarantee input ordering within a wave's
/// settlement, which downstream aggregation never relies on.
pub async fn run_tasks<G>(
    gateway: &G,
    analyzer: &AnalyzerConfig,
    business_name: &str,
    tasks: Vec<QueryTask>,
    parallel: bool,
    batch_size: usize,
) -> Vec<AnalyzedResult>
where
    G: ModelGateway + ?Sized,
{
    let mut results = Vec::with_capacity(tasks.len());

    if parallel {
        let batch_size = batch_size.max(1);
        for wave in tasks.chunks(batch_size) {
            let settled = join_all(
                wave.iter()
                    .map(|task| settle_task(gateway, analyzer, business_name, task)),
            )
            .await;
            results.extend(settled);
        }
    } else {
        for task in &tasks {
            results.push(settle_task(gateway, analyzer, business_name, task).await);
        }
    }

    results
}

/// Run one task to completion, converting any gateway failure into a
/// degraded sentinel result instead of an error.
async fn settle_task<G>(
    gateway: &G,
    analyzer: &AnalyzerConfig,
    business_name: &str,
    task: &QueryTask,
) -> AnalyzedResult
where
    G: ModelGateway + ?Sized,
{
    match gateway.query(&task.model_id, &task.prompt).await {
        Ok(reply) => {
            let analysis = analyzer::analyze(analyzer, &reply.content, business_name, task.kind);
            tracing::debug!(
                model = %task.model_id,
                kind = task.kind.as_str(),
                mentioned = analysis.mentioned,
                tokens = reply.tokens_used,
                "query analyzed"
            );
            AnalyzedResult {
                model: reply.model,
                kind: task.kind,
                mentioned: analysis.mentioned,
                sentiment: analysis.sentiment,
                accuracy: analysis.accuracy,
                rank_position: analysis.rank_position,
                competitor_mentions: analysis.competitor_mentions,
                raw_response: reply.content,
                tokens_used: reply.tokens_used,
            }
        }
        Err(e) => {
            tracing::warn!(
                model = %task.model_id,
                kind = task.kind.as_str(),
                error = %e,
                "model query failed; recording degraded result"
            );
            failed_result(task, &e.to_string())
        }
    }
}

/// The degraded sentinel emitted for a failed query: no mention, neutral
/// sentiment, zero accuracy, and an error marker in the raw response.
fn failed_result(task: &QueryTask, error: &str) -> AnalyzedResult {
    AnalyzedResult {
        model: task.model_id.clone(),
        kind: task.kind,
        mentioned: false,
        sentiment: Sentiment::Neutral,
        accuracy: 0.0,
        rank_position: None,
        competitor_mentions: None,
        raw_response: format!("[query failed: {error}]"),
        tokens_used: 0,
    }
}

//! End-to-end engine tests against a scripted in-memory gateway.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

use aivis_core::{BusinessProfile, CrawlData, FingerprintConfig, Location, ModelSpec, RunOptions};
use aivis_engine::{fingerprint, FingerprintError, PromptKind};
use aivis_gateway::{GatewayError, ModelGateway, ModelReply};
use async_trait::async_trait;
use uuid::Uuid;

/// Scripted gateway: answers per prompt type, fails for listed models,
/// counts every call.
struct FakeGateway {
    factual: String,
    opinion: String,
    recommendation: String,
    failing_models: HashSet<String>,
    calls: AtomicUsize,
}

impl FakeGateway {
    fn new(factual: &str, opinion: &str, recommendation: &str) -> Self {
        Self {
            factual: factual.to_owned(),
            opinion: opinion.to_owned(),
            recommendation: recommendation.to_owned(),
            failing_models: HashSet::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing_for(mut self, models: &[&str]) -> Self {
        self.failing_models = models.iter().map(|m| (*m).to_owned()).collect();
        self
    }

    fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ModelGateway for FakeGateway {
    async fn query(&self, model_id: &str, prompt: &str) -> Result<ModelReply, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_models.contains(model_id) {
            return Err(GatewayError::Api {
                status: 503,
                message: "provider down".to_owned(),
            });
        }
        // The three battery prompts are distinguishable by their phrasing.
        let content = if prompt.contains("ranked list") {
            self.recommendation.clone()
        } else if prompt.contains("honest opinion") {
            self.opinion.clone()
        } else {
            self.factual.clone()
        };
        Ok(ModelReply {
            content,
            tokens_used: 42,
            model: model_id.to_owned(),
        })
    }
}

fn profile() -> BusinessProfile {
    BusinessProfile {
        id: Uuid::new_v4(),
        name: "Acme Cafe".to_owned(),
        industry: "cafe".to_owned(),
        location: Some(Location {
            city: "Portland".to_owned(),
            state: "OR".to_owned(),
            country: None,
        }),
        crawl: Some(CrawlData {
            description: Some("Locally roasted coffee.".to_owned()),
            ..CrawlData::default()
        }),
    }
}

fn config(models: &[(&str, &str)]) -> FingerprintConfig {
    FingerprintConfig {
        models: models
            .iter()
            .map(|(provider, id)| ModelSpec::new(provider, id))
            .collect(),
        ..FingerprintConfig::default()
    }
}

fn mentioning_gateway() -> FakeGateway {
    FakeGateway::new(
        "Acme Cafe is a Portland staple with excellent espresso and friendly, \
         professional baristas.",
        "Acme Cafe is great, I recommend it. Excellent pastries too.",
        "1. Acme Cafe - the local favorite\n2. Rival Roasters - strong espresso\n3. Bean Palace",
    )
}

#[tokio::test]
async fn happy_path_produces_full_analysis() {
    let gateway = mentioning_gateway();
    let config = config(&[("openai", "gpt-4o-mini"), ("anthropic", "claude-3-5-haiku")]);

    let analysis = fingerprint(&gateway, &profile(), &config, RunOptions::default())
        .await
        .expect("run succeeds");

    assert_eq!(analysis.results.len(), 6);
    assert_eq!(analysis.business_name, "Acme Cafe");
    assert!((analysis.mention_rate - 100.0).abs() < f64::EPSILON);
    assert_eq!(analysis.avg_rank_position, Some(1.0));
    assert!(analysis.visibility_score > 50.0);
    assert!(analysis.visibility_score <= 100.0);
    assert!((analysis.accuracy_score - 0.7).abs() < f64::EPSILON);

    let board = &analysis.leaderboard;
    assert_eq!(board.total_recommendation_queries, 2);
    assert_eq!(board.target.mention_count, 2);
    assert_eq!(board.target.rank, Some(1.0));
    assert_eq!(board.competitors[0].name, "Rival Roasters");
    assert_eq!(board.competitors[0].mention_count, 2);
}

#[tokio::test]
async fn result_count_equals_task_count_in_all_modes_under_mixed_failure() {
    let specs = [
        ("openai", "gpt-4o-mini"),
        ("anthropic", "claude-3-5-haiku"),
        ("google", "gemini-2.0-flash"),
    ];
    let modes = [
        RunOptions {
            parallel: Some(false),
            batch_size: None,
        },
        // Unbounded: batch at or above the 9-task count.
        RunOptions {
            parallel: Some(true),
            batch_size: Some(100),
        },
        // Batched waves.
        RunOptions {
            parallel: Some(true),
            batch_size: Some(2),
        },
    ];

    for options in modes {
        let gateway = mentioning_gateway().failing_for(&["claude-3-5-haiku"]);
        let analysis = fingerprint(&gateway, &profile(), &config(&specs), options)
            .await
            .expect("run succeeds despite failures");
        assert_eq!(analysis.results.len(), 9, "options: {options:?}");
        assert_eq!(gateway.call_count(), 9, "options: {options:?}");

        let degraded: Vec<_> = analysis
            .results
            .iter()
            .filter(|r| r.raw_response.starts_with("[query failed:"))
            .collect();
        assert_eq!(degraded.len(), 3, "options: {options:?}");
        assert!(degraded.iter().all(|r| !r.mentioned && r.tokens_used == 0));
    }
}

#[tokio::test]
async fn sequential_mode_preserves_task_order() {
    let gateway = mentioning_gateway();
    let config = config(&[("openai", "gpt-4o-mini"), ("anthropic", "claude-3-5-haiku")]);
    let options = RunOptions {
        parallel: Some(false),
        batch_size: None,
    };

    let analysis = fingerprint(&gateway, &profile(), &config, options)
        .await
        .expect("run succeeds");

    let kinds: Vec<PromptKind> = analysis.results.iter().map(|r| r.kind).collect();
    assert_eq!(
        kinds,
        vec![
            PromptKind::Factual,
            PromptKind::Opinion,
            PromptKind::Recommendation,
            PromptKind::Factual,
            PromptKind::Opinion,
            PromptKind::Recommendation,
        ]
    );
    assert_eq!(analysis.results[0].model, "gpt-4o-mini");
    assert_eq!(analysis.results[3].model, "claude-3-5-haiku");
}

#[tokio::test]
async fn missing_crawl_data_fails_before_any_query() {
    let gateway = mentioning_gateway();
    let mut profile = profile();
    profile.crawl = None;

    let err = fingerprint(
        &gateway,
        &profile,
        &config(&[("openai", "gpt-4o-mini")]),
        RunOptions::default(),
    )
    .await
    .expect_err("expected validation error");

    assert!(matches!(err, FingerprintError::InvalidProfile(_)));
    assert_eq!(gateway.call_count(), 0, "no queries may issue");
}

#[tokio::test]
async fn total_provider_outage_still_scores() {
    let gateway =
        mentioning_gateway().failing_for(&["gpt-4o-mini", "claude-3-5-haiku", "gemini-2.0-flash"]);
    let config = config(&[
        ("openai", "gpt-4o-mini"),
        ("anthropic", "claude-3-5-haiku"),
        ("google", "gemini-2.0-flash"),
    ]);

    let analysis = fingerprint(&gateway, &profile(), &config, RunOptions::default())
        .await
        .expect("outage must not fail the run");

    assert_eq!(analysis.results.len(), 9);
    assert!((analysis.mention_rate - 0.0).abs() < f64::EPSILON);
    assert!((analysis.sentiment_score - 0.0).abs() < f64::EPSILON);
    assert!((analysis.accuracy_score - 0.0).abs() < f64::EPSILON);
    assert!(analysis.avg_rank_position.is_none());
    // Only the neutral ranking default contributes.
    assert!((analysis.visibility_score - 5.0).abs() < f64::EPSILON);
    assert_eq!(analysis.leaderboard.target.mention_count, 0);
    assert!(analysis.leaderboard.competitors.is_empty());
}

#[tokio::test]
async fn unmentioning_responses_yield_zero_visibility_components() {
    let gateway = FakeGateway::new(
        "There are many coffee shops in Portland.",
        "I cannot speak to specific businesses.",
        "1. Rival Roasters\n2. Bean Palace",
    );
    let config = config(&[("openai", "gpt-4o-mini")]);

    let analysis = fingerprint(&gateway, &profile(), &config, RunOptions::default())
        .await
        .expect("run succeeds");

    assert!((analysis.mention_rate - 0.0).abs() < f64::EPSILON);
    assert!((analysis.sentiment_score - 0.0).abs() < f64::EPSILON);
    assert_eq!(analysis.leaderboard.target.mention_count, 0);
    // Competitors are still surfaced even when the target never appears.
    assert_eq!(analysis.leaderboard.competitors.len(), 2);
}

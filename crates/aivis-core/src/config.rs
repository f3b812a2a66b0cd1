//! Engine configuration: model battery, execution mode, scoring weights.
//!
//! Defaults are compiled in; deployments override them through env vars.
//! Parsing goes through an injectable lookup closure so tests can drive it
//! with a plain `HashMap` instead of mutating process environment.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// One provider + model-id pair in the fingerprint battery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSpec {
    /// Provider key, matched against gateway endpoint names (e.g. `"openai"`).
    pub provider: String,
    pub model_id: String,
}

impl ModelSpec {
    #[must_use]
    pub fn new(provider: &str, model_id: &str) -> Self {
        Self {
            provider: provider.to_owned(),
            model_id: model_id.to_owned(),
        }
    }
}

/// Weights for the composite visibility score.
///
/// `visibility = mention_rate * mention_rate_weight
///             + sentiment * sentiment_weight
///             + accuracy * accuracy_weight
///             + ranking component (scaled by rank_weight)`
///
/// `neutral_rank_component` is the score contribution used when no rank was
/// observed in any response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    pub mention_rate: f64,
    pub sentiment: f64,
    pub accuracy: f64,
    pub rank: f64,
    pub neutral_rank_component: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            mention_rate: 0.4,
            sentiment: 30.0,
            accuracy: 20.0,
            rank: 10.0,
            neutral_rank_component: 5.0,
        }
    }
}

/// Full engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FingerprintConfig {
    /// Models to probe; each model is asked every prompt type.
    pub models: Vec<ModelSpec>,
    /// Run tasks concurrently (in waves of `batch_size`) instead of one
    /// at a time.
    pub parallel: bool,
    /// Wave size for parallel execution. A value at or above the task count
    /// means one unbounded wave. Ignored in sequential mode.
    pub batch_size: usize,
    pub weights: ScoreWeights,
}

impl Default for FingerprintConfig {
    fn default() -> Self {
        Self {
            models: vec![
                ModelSpec::new("openai", "gpt-4o-mini"),
                ModelSpec::new("anthropic", "claude-3-5-haiku"),
                ModelSpec::new("google", "gemini-2.0-flash"),
            ],
            parallel: true,
            batch_size: 3,
            weights: ScoreWeights::default(),
        }
    }
}

/// Per-call overrides accepted by `fingerprint`. `None` fields fall back to
/// the [`FingerprintConfig`] values.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub parallel: Option<bool>,
    pub batch_size: Option<usize>,
}

impl FingerprintConfig {
    /// Load configuration from process env vars, falling back to defaults.
    ///
    /// Recognized vars: `AIVIS_MODELS` (comma-separated `provider:model_id`
    /// pairs), `AIVIS_PARALLEL` (`true`/`false`), `AIVIS_BATCH_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] on malformed values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::build(|key| std::env::var(key))
    }

    /// Core parsing logic, decoupled from the actual environment so it can
    /// be tested with a pure `HashMap` lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidEnvVar`] on malformed values.
    pub fn build<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let mut config = Self::default();

        if let Ok(raw) = lookup("AIVIS_MODELS") {
            config.models = parse_model_list(&raw)?;
        }

        if let Ok(raw) = lookup("AIVIS_PARALLEL") {
            config.parallel = raw
                .parse::<bool>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "AIVIS_PARALLEL".to_owned(),
                    reason: e.to_string(),
                })?;
        }

        if let Ok(raw) = lookup("AIVIS_BATCH_SIZE") {
            let batch_size = raw
                .parse::<usize>()
                .map_err(|e| ConfigError::InvalidEnvVar {
                    var: "AIVIS_BATCH_SIZE".to_owned(),
                    reason: e.to_string(),
                })?;
            if batch_size == 0 {
                return Err(ConfigError::InvalidEnvVar {
                    var: "AIVIS_BATCH_SIZE".to_owned(),
                    reason: "batch size must be at least 1".to_owned(),
                });
            }
            config.batch_size = batch_size;
        }

        Ok(config)
    }

    /// Apply per-call [`RunOptions`] over the configured defaults, returning
    /// the effective `(parallel, batch_size)` pair.
    #[must_use]
    pub fn effective_mode(&self, options: RunOptions) -> (bool, usize) {
        (
            options.parallel.unwrap_or(self.parallel),
            options.batch_size.unwrap_or(self.batch_size).max(1),
        )
    }
}

/// Parse `"openai:gpt-4o-mini,anthropic:claude-3-5-haiku"` into model specs.
fn parse_model_list(raw: &str) -> Result<Vec<ModelSpec>, ConfigError> {
    let mut models = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let Some((provider, model_id)) = entry.split_once(':') else {
            return Err(ConfigError::InvalidEnvVar {
                var: "AIVIS_MODELS".to_owned(),
                reason: format!("expected provider:model_id, got '{entry}'"),
            });
        };
        if provider.is_empty() || model_id.is_empty() {
            return Err(ConfigError::InvalidEnvVar {
                var: "AIVIS_MODELS".to_owned(),
                reason: format!("empty provider or model id in '{entry}'"),
            });
        }
        models.push(ModelSpec::new(provider.trim(), model_id.trim()));
    }
    if models.is_empty() {
        return Err(ConfigError::InvalidEnvVar {
            var: "AIVIS_MODELS".to_owned(),
            reason: "model list is empty".to_owned(),
        });
    }
    Ok(models)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_with_empty_env_uses_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let cfg = FingerprintConfig::build(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.models.len(), 3);
        assert!(cfg.parallel);
        assert_eq!(cfg.batch_size, 3);
        assert_eq!(cfg.weights, ScoreWeights::default());
    }

    #[test]
    fn build_parses_model_list_override() {
        let mut map = HashMap::new();
        map.insert("AIVIS_MODELS", "openai:gpt-4o, anthropic:claude-sonnet-4");
        let cfg = FingerprintConfig::build(lookup_from_map(&map)).unwrap();
        assert_eq!(
            cfg.models,
            vec![
                ModelSpec::new("openai", "gpt-4o"),
                ModelSpec::new("anthropic", "claude-sonnet-4"),
            ]
        );
    }

    #[test]
    fn build_rejects_model_entry_without_colon() {
        let mut map = HashMap::new();
        map.insert("AIVIS_MODELS", "gpt-4o");
        let result = FingerprintConfig::build(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AIVIS_MODELS"),
            "expected InvalidEnvVar(AIVIS_MODELS), got: {result:?}"
        );
    }

    #[test]
    fn build_rejects_empty_model_list() {
        let mut map = HashMap::new();
        map.insert("AIVIS_MODELS", " , ");
        let result = FingerprintConfig::build(lookup_from_map(&map));
        assert!(result.is_err(), "expected error, got: {result:?}");
    }

    #[test]
    fn build_parses_parallel_override() {
        let mut map = HashMap::new();
        map.insert("AIVIS_PARALLEL", "false");
        let cfg = FingerprintConfig::build(lookup_from_map(&map)).unwrap();
        assert!(!cfg.parallel);
    }

    #[test]
    fn build_rejects_invalid_parallel() {
        let mut map = HashMap::new();
        map.insert("AIVIS_PARALLEL", "maybe");
        let result = FingerprintConfig::build(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AIVIS_PARALLEL"),
            "expected InvalidEnvVar(AIVIS_PARALLEL), got: {result:?}"
        );
    }

    #[test]
    fn build_parses_batch_size_override() {
        let mut map = HashMap::new();
        map.insert("AIVIS_BATCH_SIZE", "5");
        let cfg = FingerprintConfig::build(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.batch_size, 5);
    }

    #[test]
    fn build_rejects_zero_batch_size() {
        let mut map = HashMap::new();
        map.insert("AIVIS_BATCH_SIZE", "0");
        let result = FingerprintConfig::build(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "AIVIS_BATCH_SIZE"),
            "expected InvalidEnvVar(AIVIS_BATCH_SIZE), got: {result:?}"
        );
    }

    #[test]
    fn effective_mode_prefers_run_options() {
        let cfg = FingerprintConfig::default();
        let (parallel, batch) = cfg.effective_mode(RunOptions {
            parallel: Some(false),
            batch_size: Some(7),
        });
        assert!(!parallel);
        assert_eq!(batch, 7);
    }

    #[test]
    fn effective_mode_falls_back_to_config() {
        let cfg = FingerprintConfig::default();
        let (parallel, batch) = cfg.effective_mode(RunOptions::default());
        assert!(parallel);
        assert_eq!(batch, 3);
    }

    #[test]
    fn effective_mode_clamps_zero_batch_to_one() {
        let cfg = FingerprintConfig::default();
        let (_, batch) = cfg.effective_mode(RunOptions {
            parallel: None,
            batch_size: Some(0),
        });
        assert_eq!(batch, 1);
    }
}

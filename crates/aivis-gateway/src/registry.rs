//! Provider registry: config-driven routing from model ids to endpoints.
//!
//! Adding a provider means adding a [`ProviderEndpoint`] entry; no routing
//! logic changes. The registry is itself a [`ModelGateway`], so the engine
//! never sees individual providers.

use async_trait::async_trait;

use crate::error::GatewayError;
use crate::openai::ChatCompletionsClient;
use crate::{ModelGateway, ModelReply};

/// One configured provider: a chat-completions endpoint plus the model ids
/// it serves.
#[derive(Debug, Clone)]
pub struct ProviderEndpoint {
    pub name: String,
    pub base_url: String,
    pub api_key: String,
    pub models: Vec<String>,
}

/// Routes `query` calls to the first endpoint serving the requested model.
pub struct ProviderRegistry {
    entries: Vec<(ProviderEndpoint, ChatCompletionsClient)>,
}

impl ProviderRegistry {
    /// Builds a registry from endpoint configs, constructing one HTTP client
    /// per endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if a client cannot be constructed.
    pub fn new(endpoints: Vec<ProviderEndpoint>) -> Result<Self, GatewayError> {
        let mut entries = Vec::with_capacity(endpoints.len());
        for endpoint in endpoints {
            let client = ChatCompletionsClient::new(&endpoint.base_url, &endpoint.api_key)?;
            entries.push((endpoint, client));
        }
        Ok(Self { entries })
    }

    /// Builds a registry from env vars, one optional provider per prefix:
    /// `AIVIS_<NAME>_BASE_URL`, `AIVIS_<NAME>_API_KEY`, `AIVIS_<NAME>_MODELS`
    /// (comma-separated). Prefixes checked: `OPENAI`, `ANTHROPIC`, `GOOGLE`.
    /// Providers with no base URL set are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if a client cannot be constructed.
    pub fn from_env() -> Result<Self, GatewayError> {
        Self::build(|key| std::env::var(key))
    }

    /// Env parsing decoupled from the process environment for tests.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if a client cannot be constructed.
    pub fn build<F>(lookup: F) -> Result<Self, GatewayError>
    where
        F: Fn(&str) -> Result<String, std::env::VarError>,
    {
        let mut endpoints = Vec::new();
        for name in ["openai", "anthropic", "google"] {
            let prefix = format!("AIVIS_{}", name.to_uppercase());
            let Ok(base_url) = lookup(&format!("{prefix}_BASE_URL")) else {
                continue;
            };
            let api_key = lookup(&format!("{prefix}_API_KEY")).unwrap_or_default();
            let models = lookup(&format!("{prefix}_MODELS"))
                .map(|raw| {
                    raw.split(',')
                        .map(str::trim)
                        .filter(|m| !m.is_empty())
                        .map(str::to_owned)
                        .collect()
                })
                .unwrap_or_default();
            endpoints.push(ProviderEndpoint {
                name: name.to_owned(),
                base_url,
                api_key,
                models,
            });
        }
        Self::new(endpoints)
    }

    /// Names of all configured providers, in routing order.
    #[must_use]
    pub fn provider_names(&self) -> Vec<&str> {
        self.entries.iter().map(|(e, _)| e.name.as_str()).collect()
    }

    fn client_for(&self, model_id: &str) -> Option<&ChatCompletionsClient> {
        self.entries
            .iter()
            .find(|(endpoint, _)| endpoint.models.iter().any(|m| m == model_id))
            .map(|(_, client)| client)
    }
}

#[async_trait]
impl ModelGateway for ProviderRegistry {
    async fn query(&self, model_id: &str, prompt: &str) -> Result<ModelReply, GatewayError> {
        let client = self
            .client_for(model_id)
            .ok_or_else(|| GatewayError::UnknownModel(model_id.to_owned()))?;
        tracing::debug!(model = model_id, "dispatching prompt to provider");
        client.complete(model_id, prompt).await
    }
}

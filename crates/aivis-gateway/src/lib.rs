//! Model Gateway boundary for AIVIS.
//!
//! The engine talks to LLM providers exclusively through the
//! [`ModelGateway`] trait: one model, one prompt, one reply (or one error).
//! [`ChatCompletionsClient`] speaks the OpenAI-compatible chat-completions
//! dialect that all configured providers expose, and [`ProviderRegistry`]
//! routes model ids to the endpoint that serves them.

pub mod error;
pub mod openai;
pub mod registry;

use async_trait::async_trait;

pub use error::GatewayError;
pub use openai::ChatCompletionsClient;
pub use registry::{ProviderEndpoint, ProviderRegistry};

/// One model's answer to one prompt.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub content: String,
    pub tokens_used: u32,
    /// Model identifier as reported by the provider.
    pub model: String,
}

/// Invokes a single model with a single prompt.
///
/// Implementations own transport concerns (auth, timeouts, retries); the
/// engine treats any error as a per-task failure and never retries here.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send `prompt` to `model_id` and return the reply text plus usage.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] on transport failure, provider-side errors,
    /// empty completions, or unknown model ids.
    async fn query(&self, model_id: &str, prompt: &str) -> Result<ModelReply, GatewayError>;
}

//! OpenAI-compatible chat-completions client.
//!
//! Wraps `reqwest` with bearer auth, typed request/response shapes, and
//! mapping of provider-side failures onto [`GatewayError`]. Every provider
//! in the default battery exposes this dialect, so one client covers all of
//! them; only the base URL and key differ per endpoint.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::GatewayError;
use crate::ModelReply;

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Client for one OpenAI-compatible chat-completions endpoint.
#[derive(Debug, Clone)]
pub struct ChatCompletionsClient {
    client: Client,
    base_url: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    total_tokens: u32,
}

impl ChatCompletionsClient {
    /// Creates a client for `base_url` (scheme + host, no trailing path).
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, GatewayError> {
        Self::with_timeout(base_url, api_key, DEFAULT_TIMEOUT_SECS)
    }

    /// Creates a client with an explicit request timeout in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_timeout(
        base_url: &str,
        api_key: &str,
        timeout_secs: u64,
    ) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("aivis/0.1 (ai-visibility)")
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key: api_key.to_owned(),
        })
    }

    /// Sends one user prompt to `model_id` and returns the first completion.
    ///
    /// # Errors
    ///
    /// - [`GatewayError::Http`] on network failure.
    /// - [`GatewayError::Api`] on a non-2xx provider response.
    /// - [`GatewayError::EmptyResponse`] when the provider returns no
    ///   choices or an empty message.
    pub async fn complete(&self, model_id: &str, prompt: &str) -> Result<ModelReply, GatewayError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: model_id,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Api {
                status: status.as_u16(),
                message: truncate_message(&message),
            });
        }

        let body: ChatResponse = response.json().await?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or_else(|| GatewayError::EmptyResponse(model_id.to_owned()))?;

        Ok(ModelReply {
            content,
            tokens_used: body.usage.map_or(0, |u| u.total_tokens),
            model: body.model.unwrap_or_else(|| model_id.to_owned()),
        })
    }
}

/// Keep error bodies loggable without dumping whole HTML error pages.
fn truncate_message(message: &str) -> String {
    const MAX: usize = 300;
    if message.len() <= MAX {
        message.to_owned()
    } else {
        let cut = message
            .char_indices()
            .take_while(|(i, _)| *i < MAX)
            .last()
            .map_or(0, |(i, c)| i + c.len_utf8());
        format!("{}…", &message[..cut])
    }
}

//! Integration tests for the chat-completions client and provider registry
//! using wiremock HTTP mocks.

use aivis_gateway::{
    ChatCompletionsClient, GatewayError, ModelGateway, ProviderEndpoint, ProviderRegistry,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(model: &str, content: &str, total_tokens: u32) -> serde_json::Value {
    serde_json::json!({
        "id": "chatcmpl-test",
        "model": model,
        "choices": [
            { "index": 0, "message": { "role": "assistant", "content": content } }
        ],
        "usage": { "prompt_tokens": 10, "completion_tokens": 20, "total_tokens": total_tokens }
    })
}

#[tokio::test]
async fn complete_returns_content_and_usage() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({ "model": "gpt-4o-mini" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("gpt-4o-mini", "Acme Cafe is a popular spot.", 30)),
        )
        .mount(&server)
        .await;

    let client = ChatCompletionsClient::new(&server.uri(), "sk-test").expect("client");
    let reply = client
        .complete("gpt-4o-mini", "What do you know about Acme Cafe?")
        .await
        .expect("should parse completion");

    assert_eq!(reply.content, "Acme Cafe is a popular spot.");
    assert_eq!(reply.tokens_used, 30);
    assert_eq!(reply.model, "gpt-4o-mini");
}

#[tokio::test]
async fn complete_maps_api_errors() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limit exceeded"))
        .mount(&server)
        .await;

    let client = ChatCompletionsClient::new(&server.uri(), "sk-test").expect("client");
    let err = client
        .complete("gpt-4o-mini", "prompt")
        .await
        .expect_err("expected API error");

    match err {
        GatewayError::Api { status, message } => {
            assert_eq!(status, 429);
            assert!(message.contains("rate limit"), "got: {message}");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn complete_rejects_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "chatcmpl-test",
            "model": "gpt-4o-mini",
            "choices": []
        })))
        .mount(&server)
        .await;

    let client = ChatCompletionsClient::new(&server.uri(), "sk-test").expect("client");
    let err = client
        .complete("gpt-4o-mini", "prompt")
        .await
        .expect_err("expected empty-response error");

    assert!(matches!(err, GatewayError::EmptyResponse(ref m) if m == "gpt-4o-mini"));
}

#[tokio::test]
async fn registry_routes_model_to_owning_provider() {
    let openai = MockServer::start().await;
    let anthropic = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("claude-3-5-haiku", "From Anthropic.", 12)),
        )
        .mount(&anthropic)
        .await;

    let registry = ProviderRegistry::new(vec![
        ProviderEndpoint {
            name: "openai".to_owned(),
            base_url: openai.uri(),
            api_key: "sk-openai".to_owned(),
            models: vec!["gpt-4o-mini".to_owned()],
        },
        ProviderEndpoint {
            name: "anthropic".to_owned(),
            base_url: anthropic.uri(),
            api_key: "sk-anthropic".to_owned(),
            models: vec!["claude-3-5-haiku".to_owned()],
        },
    ])
    .expect("registry");

    let reply = registry
        .query("claude-3-5-haiku", "prompt")
        .await
        .expect("should route to anthropic");
    assert_eq!(reply.content, "From Anthropic.");
}

#[tokio::test]
async fn registry_rejects_unknown_model() {
    let registry = ProviderRegistry::new(vec![]).expect("registry");
    let err = registry
        .query("mystery-model", "prompt")
        .await
        .expect_err("expected unknown-model error");
    assert!(matches!(err, GatewayError::UnknownModel(ref m) if m == "mystery-model"));
}

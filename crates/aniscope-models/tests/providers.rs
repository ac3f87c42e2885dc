//! Integration tests for the HTTP provider adapters using wiremock.

use aniscope_core::SentimentLabel;
use aniscope_models::hosted::HostedModels;
use aniscope_models::{
    ChatCompletionsProvider, HostedInferenceProvider, ModelError, TextModelProvider,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn chat_provider(base_url: &str) -> ChatCompletionsProvider {
    ChatCompletionsProvider::with_base_url("sk-test", "gpt-3.5-turbo", 30, base_url)
        .expect("provider construction should not fail")
}

fn hosted_provider(base_url: &str) -> HostedInferenceProvider {
    let models = HostedModels {
        sentiment: "sentiment-model".to_string(),
        summary: "summary-model".to_string(),
        generation: "generation-model".to_string(),
    };
    HostedInferenceProvider::with_base_url("hf-test", models, 30, base_url)
        .expect("provider construction should not fail")
}

fn chat_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{ "message": { "role": "assistant", "content": content } }]
    })
}

#[tokio::test]
async fn chat_classify_parses_one_word_answer() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(serde_json::json!({
            "model": "gpt-3.5-turbo",
            "temperature": 0.0
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("Positive")))
        .mount(&server)
        .await;

    let provider = chat_provider(&server.uri());
    let label = provider
        .classify_sentiment("a genuinely moving finale")
        .await
        .unwrap();
    assert_eq!(label, SentimentLabel::Positive);
}

#[tokio::test]
async fn chat_reflect_uses_sampling_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(serde_json::json!({ "temperature": 0.7 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_body("A thoughtful take.")))
        .mount(&server)
        .await;

    let provider = chat_provider(&server.uri());
    let out = provider.reflect("Reflect on this summary").await.unwrap();
    assert_eq!(out, "A thoughtful take.");
}

#[tokio::test]
async fn chat_non_2xx_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("rate limited"))
        .mount(&server)
        .await;

    let provider = chat_provider(&server.uri());
    let err = provider.summarize("some reviews").await.unwrap_err();
    assert!(matches!(err, ModelError::Api { status: 429, .. }));
}

#[tokio::test]
async fn chat_empty_choices_is_an_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "choices": [] })),
        )
        .mount(&server)
        .await;

    let provider = chat_provider(&server.uri());
    let err = provider.summarize("some reviews").await.unwrap_err();
    assert!(matches!(err, ModelError::EmptyResponse { .. }));
}

#[tokio::test]
async fn hosted_classify_takes_argmax_label() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/sentiment-model"))
        .and(header("authorization", "Bearer hf-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([[
            { "label": "NEGATIVE", "score": 0.91 },
            { "label": "POSITIVE", "score": 0.09 }
        ]])))
        .mount(&server)
        .await;

    let provider = hosted_provider(&server.uri());
    let label = provider.classify_sentiment("a slog to finish").await.unwrap();
    assert_eq!(label, SentimentLabel::Negative);
}

#[tokio::test]
async fn hosted_summarize_sends_decoding_constraints() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/summary-model"))
        .and(body_partial_json(serde_json::json!({
            "parameters": { "max_length": 80, "min_length": 30, "do_sample": false }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "summary_text": "  Reviewers praise the pacing.  " }
        ])))
        .mount(&server)
        .await;

    let provider = hosted_provider(&server.uri());
    let summary = provider.summarize("chunk of cleaned reviews").await.unwrap();
    assert_eq!(summary, "Reviewers praise the pacing.");
}

#[tokio::test]
async fn hosted_reflect_strips_echoed_prompt() {
    let server = MockServer::start().await;
    let prompt = "Reflect on this positive anime review summary:\n\nGreat pacing.";
    Mock::given(method("POST"))
        .and(path("/models/generation-model"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "generated_text": format!("{prompt} The pacing clearly carried the show.") }
        ])))
        .mount(&server)
        .await;

    let provider = hosted_provider(&server.uri());
    let out = provider.reflect(prompt).await.unwrap();
    assert_eq!(out, "The pacing clearly carried the show.");
}

#[tokio::test]
async fn hosted_non_2xx_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/generation-model"))
        .respond_with(ResponseTemplate::new(503).set_body_string("model loading"))
        .mount(&server)
        .await;

    let provider = hosted_provider(&server.uri());
    let err = provider.reflect("prompt").await.unwrap_err();
    assert!(matches!(err, ModelError::Api { status: 503, .. }));
}

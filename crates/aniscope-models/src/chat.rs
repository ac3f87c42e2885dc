//! OpenAI-compatible chat-completions adapter.
//!
//! One request per operation. Classification constrains the model to a
//! one-word answer and parses it leniently; summarization and reflection
//! return the message content verbatim. Reflection samples at temperature
//! 0.7, the other two operations decode greedily.

use std::time::Duration;

use aniscope_core::SentimentLabel;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::TextModelProvider;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Adapter for any `POST {base}/chat/completions` endpoint with bearer auth.
pub struct ChatCompletionsProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: String,
}

impl ChatCompletionsProvider {
    /// Creates a provider against the production OpenAI endpoint.
    ///
    /// The key comes from configuration (environment), never a literal.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(api_key: &str, model: &str, timeout_secs: u64) -> Result<Self, ModelError> {
        Self::with_base_url(api_key, model, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a provider with a custom base URL (for testing with wiremock,
    /// or for OpenAI-compatible servers).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        api_key: &str,
        model: &str,
        timeout_secs: u64,
        base_url: &str,
    ) -> Result<Self, ModelError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("aniscope/0.1 (review-digest)")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    async fn complete(&self, content: &str, temperature: f64) -> Result<String, ModelError> {
        let url = format!("{}/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: [ChatMessage {
                role: "user",
                content,
            }],
            temperature,
        };

        tracing::debug!(model = %self.model, temperature, "chat completion request");
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
            return Err(ModelError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let parsed: ChatResponse =
            serde_json::from_str(&body).map_err(|e| ModelError::Deserialize {
                context: url.clone(),
                source: e,
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.trim().to_string())
            .ok_or(ModelError::EmptyResponse { context: url })
    }
}

impl TextModelProvider for ChatCompletionsProvider {
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentLabel, ModelError> {
        let prompt = format!(
            "Classify the sentiment of this anime review. \
             Answer with exactly one word: positive, negative, or neutral.\n\n{text}"
        );
        let answer = self.complete(&prompt, 0.0).await?;
        Ok(SentimentLabel::parse(&answer))
    }

    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        let prompt = format!(
            "Summarize the following anime reviews in two or three sentences:\n\n{text}"
        );
        self.complete(&prompt, 0.0).await
    }

    async fn reflect(&self, prompt: &str) -> Result<String, ModelError> {
        self.complete(prompt, 0.7).await
    }
}

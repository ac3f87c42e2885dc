//! HuggingFace-style hosted inference adapter.
//!
//! Each operation targets a different model behind the same
//! `POST {base}/models/{model}` shape: the classifier returns nested
//! label/score pairs, the summarizer returns `summary_text`, and the
//! generator returns `generated_text` (with the prompt echoed back, which
//! this adapter strips).

use std::time::Duration;

use aniscope_core::SentimentLabel;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::TextModelProvider;

const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Summarization decoding constraints, matching the upstream model defaults
/// this pipeline was tuned against.
const SUMMARY_MAX_LENGTH: u32 = 80;
const SUMMARY_MIN_LENGTH: u32 = 30;

/// Model names for the three operations.
#[derive(Debug, Clone)]
pub struct HostedModels {
    pub sentiment: String,
    pub summary: String,
    pub generation: String,
}

/// Adapter for a hosted inference API with per-model routes.
pub struct HostedInferenceProvider {
    client: reqwest::Client,
    base_url: String,
    token: String,
    models: HostedModels,
}

#[derive(Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameters: Option<SummaryParameters>,
}

#[derive(Serialize)]
struct SummaryParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Deserialize)]
struct LabelScore {
    label: String,
    score: f64,
}

#[derive(Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

#[derive(Deserialize)]
struct GenerationOutput {
    generated_text: String,
}

impl HostedInferenceProvider {
    /// Creates a provider against the production inference endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, models: HostedModels, timeout_secs: u64) -> Result<Self, ModelError> {
        Self::with_base_url(token, models, timeout_secs, DEFAULT_BASE_URL)
    }

    /// Creates a provider with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn with_base_url(
        token: &str,
        models: HostedModels,
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
            token: token.to_string(),
            models,
        })
    }

    async fn infer<T: serde::de::DeserializeOwned>(
        &self,
        model: &str,
        request: &InferenceRequest<'_>,
    ) -> Result<T, ModelError> {
        let url = format!("{}/models/{model}", self.base_url);
        tracing::debug!(model, "hosted inference request");
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(request)
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
        serde_json::from_str(&body).map_err(|e| ModelError::Deserialize {
            context: url,
            source: e,
        })
    }
}

impl TextModelProvider for HostedInferenceProvider {
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentLabel, ModelError> {
        let request = InferenceRequest {
            inputs: text,
            parameters: None,
        };
        // Classifier output is `[[{"label", "score"}, ...]]`.
        let scores: Vec<Vec<LabelScore>> = self.infer(&self.models.sentiment, &request).await?;

        let best = scores
            .into_iter()
            .flatten()
            .max_by(|a, b| a.score.total_cmp(&b.score))
            .ok_or_else(|| ModelError::EmptyResponse {
                context: self.models.sentiment.clone(),
            })?;

        Ok(SentimentLabel::parse(&best.label))
    }

    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        let request = InferenceRequest {
            inputs: text,
            parameters: Some(SummaryParameters {
                max_length: SUMMARY_MAX_LENGTH,
                min_length: SUMMARY_MIN_LENGTH,
                do_sample: false,
            }),
        };
        let outputs: Vec<SummaryOutput> = self.infer(&self.models.summary, &request).await?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text.trim().to_string())
            .ok_or_else(|| ModelError::EmptyResponse {
                context: self.models.summary.clone(),
            })
    }

    async fn reflect(&self, prompt: &str) -> Result<String, ModelError> {
        let request = InferenceRequest {
            inputs: prompt,
            parameters: None,
        };
        let outputs: Vec<GenerationOutput> = self.infer(&self.models.generation, &request).await?;

        let generated = outputs
            .into_iter()
            .next()
            .map(|o| o.generated_text)
            .ok_or_else(|| ModelError::EmptyResponse {
                context: self.models.generation.clone(),
            })?;

        // Causal models echo the prompt before the continuation.
        let continuation = generated.strip_prefix(prompt).unwrap_or(&generated);
        Ok(continuation.trim().to_string())
    }
}

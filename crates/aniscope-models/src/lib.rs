//! Text model providers for the aniscope pipeline.
//!
//! The pipeline needs exactly three text capabilities: sentiment
//! classification, summarization, and free-form reflection. The
//! [`TextModelProvider`] trait captures those, and each deployment picks a
//! concrete adapter: an OpenAI-compatible chat endpoint
//! ([`ChatCompletionsProvider`]), a HuggingFace-style hosted inference
//! endpoint ([`HostedInferenceProvider`]), or the offline
//! [`LexiconProvider`] that needs no network or credentials.

pub mod chat;
pub mod error;
pub mod hosted;
pub mod lexicon;

use aniscope_core::SentimentLabel;

pub use chat::ChatCompletionsProvider;
pub use error::ModelError;
pub use hosted::{HostedInferenceProvider, HostedModels};
pub use lexicon::LexiconProvider;

/// The three text-model operations the pipeline delegates.
///
/// Implementations are used through generics, so `async fn` in the trait is
/// fine; no trait objects are handed across the pipeline boundary.
#[allow(async_fn_in_trait)]
pub trait TextModelProvider {
    /// Assigns a polarity label to a piece of review text.
    ///
    /// Callers truncate input to the classifier context limit before calling.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the backing model call fails.
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentLabel, ModelError>;

    /// Reduces a chunk of review text to a short summary.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the backing model call fails.
    async fn summarize(&self, text: &str) -> Result<String, ModelError>;

    /// Generates free-form commentary from a prompt.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError`] if the backing model call fails.
    async fn reflect(&self, prompt: &str) -> Result<String, ModelError>;
}

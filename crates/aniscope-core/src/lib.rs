//! Shared types and configuration for aniscope.
//!
//! The pipeline crates all speak in terms of the types defined here:
//! [`AnimeId`], [`Review`], [`SentimentLabel`], and [`LabeledReview`].
//! Configuration is loaded from environment variables via [`config`].

pub mod app_config;
pub mod config;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use app_config::{AppConfig, ProviderKind};
pub use config::{load_app_config, load_app_config_from_env};

/// Catalog identifier for a titled work (the Jikan `mal_id`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnimeId(pub i64);

impl std::fmt::Display for AnimeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A single review after collection-time filtering.
///
/// Spoiler-flagged and too-short entries never become a `Review`, so the
/// record carries no spoiler flag. `text` has newlines normalized to spaces.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    pub username: String,
    pub score: Option<f64>,
    pub text: String,
}

/// Polarity assigned to a review by a sentiment classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Parses a classifier output label, case-insensitively.
    ///
    /// Classifiers disagree on spelling (`POSITIVE`, `LABEL_1`, `pos`), so
    /// anything that does not clearly read as positive or negative maps to
    /// [`SentimentLabel::Neutral`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        if lower.starts_with("pos") || lower == "label_1" {
            Self::Positive
        } else if lower.starts_with("neg") || lower == "label_0" {
            Self::Negative
        } else {
            Self::Neutral
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        }
    }
}

impl std::fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A review with its sentiment label attached. The label is assigned exactly
/// once; reviews that fail classification are dropped rather than relabeled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabeledReview {
    pub review: Review,
    pub label: SentimentLabel,
}

/// Configuration loading failures.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

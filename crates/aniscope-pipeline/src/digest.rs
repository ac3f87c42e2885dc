//! Digest result types.

use aniscope_core::{AnimeId, SentimentLabel};
use serde::Serialize;

/// Per-polarity slice of the digest.
#[derive(Debug, Clone, Serialize)]
pub struct LabelDigest {
    pub label: SentimentLabel,
    /// Reviews that carried this label after classification.
    pub review_count: usize,
    /// Mean reviewer score across the labeled reviews, when any carried one.
    pub mean_score: Option<f64>,
    /// Joined chunk summaries. `None` is the "no data" sentinel — it is
    /// never an empty-but-present string.
    pub summary: Option<String>,
    /// Generated commentary, or the templated no-reviews message when
    /// `summary` is absent.
    pub reflection: String,
}

/// The full output of one pipeline run.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewDigest {
    pub anime_id: AnimeId,
    pub title: String,
    /// Reviews that survived collection-time filtering.
    pub collected_reviews: usize,
    /// Reviews that were successfully labeled.
    pub labeled_reviews: usize,
    pub positive: LabelDigest,
    pub negative: LabelDigest,
}

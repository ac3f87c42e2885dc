//! Pipeline orchestration: fetch → clean/chunk → classify/summarize → reflect.

use aniscope_core::{LabeledReview, Review, SentimentLabel};
use aniscope_jikan::JikanClient;
use aniscope_models::TextModelProvider;

use crate::digest::{LabelDigest, ReviewDigest};
use crate::error::PipelineError;
use crate::text::{chunk, clean, truncate_chars, CHUNK_GROUP_SIZE};

/// Classifier context limit: review text is truncated to this many
/// characters before classification.
const CLASSIFY_CHAR_CAP: usize = 512;

/// Cleaned texts this short carry too little signal to summarize.
const MIN_CLEANED_CHARS: usize = 30;

/// At most this many chunks are summarized per label, bounding latency
/// and model cost per run.
const MAX_SUMMARY_CHUNKS: usize = 3;

/// Runs the full digest pipeline for one title.
///
/// Model-call failures are absorbed per unit of work: a review whose
/// classification fails is dropped, a chunk whose summarization fails is
/// skipped, and a failed reflection becomes an inline message. Only catalog
/// failures abort the run.
///
/// # Errors
///
/// - [`PipelineError::Jikan`] if the title search itself fails.
/// - [`PipelineError::TitleNotFound`] if the title resolves to nothing.
/// - [`PipelineError::NoReviews`] if no review survives collection filtering.
pub async fn run_review_digest<P: TextModelProvider>(
    client: &JikanClient,
    provider: &P,
    title: &str,
    pages: u32,
    filter_spoilers: bool,
) -> Result<ReviewDigest, PipelineError> {
    let Some(anime_id) = client.search_anime(title).await? else {
        return Err(PipelineError::TitleNotFound {
            title: title.to_string(),
        });
    };
    tracing::info!(%anime_id, title, "resolved title");

    let reviews = client.collect_reviews(anime_id, pages, filter_spoilers).await;
    if reviews.is_empty() {
        return Err(PipelineError::NoReviews {
            title: title.to_string(),
        });
    }
    let collected_reviews = reviews.len();
    tracing::info!(%anime_id, count = collected_reviews, "collected reviews");

    let labeled = label_reviews(provider, reviews).await;
    let labeled_reviews = labeled.len();

    let positive = digest_label(provider, &labeled, SentimentLabel::Positive).await;
    let negative = digest_label(provider, &labeled, SentimentLabel::Negative).await;

    Ok(ReviewDigest {
        anime_id,
        title: title.to_string(),
        collected_reviews,
        labeled_reviews,
        positive,
        negative,
    })
}

/// Classifies each review, dropping the ones whose classification fails.
async fn label_reviews<P: TextModelProvider>(
    provider: &P,
    reviews: Vec<Review>,
) -> Vec<LabeledReview> {
    let mut labeled = Vec::with_capacity(reviews.len());

    for review in reviews {
        let input = truncate_chars(&review.text, CLASSIFY_CHAR_CAP);
        match provider.classify_sentiment(&input).await {
            Ok(label) => labeled.push(LabeledReview { review, label }),
            Err(e) => {
                tracing::warn!(
                    username = %review.username,
                    error = %e,
                    "sentiment classification failed — dropping review"
                );
            }
        }
    }

    labeled
}

/// Builds the summary and reflection for one polarity.
async fn digest_label<P: TextModelProvider>(
    provider: &P,
    labeled: &[LabeledReview],
    label: SentimentLabel,
) -> LabelDigest {
    let matching: Vec<&Review> = labeled
        .iter()
        .filter(|l| l.label == label)
        .map(|l| &l.review)
        .collect();

    let scores: Vec<f64> = matching.iter().filter_map(|r| r.score).collect();
    #[allow(clippy::cast_precision_loss)]
    let mean_score = if scores.is_empty() {
        None
    } else {
        Some(scores.iter().sum::<f64>() / scores.len() as f64)
    };

    let summary = summarize_reviews(provider, &matching, label).await;
    let reflection = reflect_on_summary(provider, summary.as_deref(), label).await;

    LabelDigest {
        label,
        review_count: matching.len(),
        mean_score,
        summary,
        reflection,
    }
}

/// Cleans, chunks, and summarizes the reviews for one label.
///
/// Returns `None` when no chunk exists or every chunk's summarization
/// failed — the "no data" sentinel, never an empty string.
async fn summarize_reviews<P: TextModelProvider>(
    provider: &P,
    reviews: &[&Review],
    label: SentimentLabel,
) -> Option<String> {
    let cleaned: Vec<String> = reviews
        .iter()
        .map(|r| clean(&r.text))
        .filter(|t| t.chars().count() > MIN_CLEANED_CHARS)
        .collect();

    let chunks = chunk(&cleaned, CHUNK_GROUP_SIZE);
    let mut summaries = Vec::new();

    for (index, piece) in chunks.iter().take(MAX_SUMMARY_CHUNKS).enumerate() {
        match provider.summarize(piece).await {
            Ok(summary) => summaries.push(summary),
            Err(e) => {
                tracing::warn!(
                    %label,
                    chunk = index,
                    error = %e,
                    "chunk summarization failed — skipping chunk"
                );
            }
        }
    }

    if summaries.is_empty() {
        None
    } else {
        Some(summaries.join("\n\n"))
    }
}

/// Reflects on a summary, or produces the templated message for an absent one.
///
/// An absent summary never reaches the provider. A failed reflection call is
/// reported inline rather than propagated.
async fn reflect_on_summary<P: TextModelProvider>(
    provider: &P,
    summary: Option<&str>,
    label: SentimentLabel,
) -> String {
    let Some(summary) = summary else {
        return format!("No {label} reviews available to reflect on.");
    };

    let prompt = format!("Reflect on this {label} anime review summary:\n\n{summary}");
    match provider.reflect(&prompt).await {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(%label, error = %e, "reflection failed");
            format!("reflection unavailable: {e}")
        }
    }
}

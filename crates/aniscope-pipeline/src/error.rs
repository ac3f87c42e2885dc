use thiserror::Error;

/// Run-level pipeline failures.
///
/// Model-call failures never appear here: classification, summarization, and
/// reflection errors are absorbed per review, per chunk, and per reflection
/// respectively, so a flaky model backend degrades the digest instead of
/// aborting the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The catalog search failed outright (network, bad status).
    #[error("catalog error: {0}")]
    Jikan(#[from] aniscope_jikan::JikanError),

    /// The title resolved to no catalog id.
    #[error("no anime found matching \"{title}\"")]
    TitleNotFound { title: String },

    /// Zero reviews survived collection-time filtering.
    #[error("no qualifying reviews found for \"{title}\"")]
    NoReviews { title: String },
}

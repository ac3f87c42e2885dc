//! The review digest pipeline.
//!
//! One linear chain per run: resolve the title, collect reviews, attach a
//! sentiment label to each, then per polarity build a summary from chunked
//! cleaned text and a reflection on that summary. No state survives the run.

pub mod digest;
pub mod error;
pub mod text;

mod run;

pub use digest::{LabelDigest, ReviewDigest};
pub use error::PipelineError;
pub use run::run_review_digest;

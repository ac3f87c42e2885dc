//! Offline lexicon/extractive provider.
//!
//! Stands in for the local-model deployment variant where no model server is
//! reachable: sentiment comes from a word-weight lexicon, summaries from
//! leading-sentence extraction, and reflections from a deterministic
//! template. Everything here is pure and synchronous under the hood; the
//! async trait methods never touch the network.

use aniscope_core::SentimentLabel;

use crate::error::ModelError;
use crate::TextModelProvider;

/// Scores above this are positive, below its negation negative.
const POLARITY_THRESHOLD: f32 = 0.15;

/// Extractive summaries stop after roughly this many words.
const SUMMARY_WORD_BUDGET: usize = 80;

/// Anime-review word weights.
///
/// Keys are lowercase single words. Values in `(0.0, 1.0]` are positive,
/// in `[-1.0, 0.0)` are negative. The final score is clamped to `[-1.0, 1.0]`.
const LEXICON: &[(&str, f32)] = &[
    // Positive signals
    ("masterpiece", 0.6),
    ("amazing", 0.5),
    ("excellent", 0.5),
    ("best", 0.5),
    ("love", 0.5),
    ("loved", 0.5),
    ("beautiful", 0.4),
    ("great", 0.4),
    ("stunning", 0.4),
    ("recommend", 0.4),
    ("gripping", 0.4),
    ("memorable", 0.4),
    ("fun", 0.3),
    ("good", 0.3),
    ("enjoyable", 0.3),
    ("solid", 0.3),
    ("charming", 0.3),
    ("rewatch", 0.3),
    // Negative signals
    ("worst", -0.6),
    ("terrible", -0.6),
    ("awful", -0.6),
    ("unwatchable", -0.6),
    ("hate", -0.5),
    ("hated", -0.5),
    ("boring", -0.5),
    ("disappointing", -0.5),
    ("disappointment", -0.5),
    ("dropped", -0.4),
    ("bad", -0.4),
    ("bland", -0.4),
    ("mediocre", -0.4),
    ("filler", -0.3),
    ("slow", -0.3),
    ("rushed", -0.3),
    ("predictable", -0.3),
    ("overrated", -0.3),
];

/// Score a text string using the review lexicon.
///
/// Splits text into lowercase words, sums matching weights, and clamps
/// the result to `[-1.0, 1.0]`. Returns `0.0` for empty or unknown text.
#[must_use]
pub fn lexicon_score(text: &str) -> f32 {
    let mut score = 0.0_f32;
    for word in text.split_whitespace() {
        let w = word
            .trim_matches(|c: char| !c.is_alphabetic())
            .to_lowercase();
        for &(lex_word, weight) in LEXICON {
            if w == lex_word {
                score += weight;
                break;
            }
        }
    }
    score.clamp(-1.0, 1.0)
}

/// Extracts leading sentences until the word budget is spent.
///
/// Always keeps at least the first sentence, however long it runs.
fn extract_summary(text: &str) -> String {
    let mut summary = String::new();
    let mut words = 0usize;

    for sentence in split_sentences(text) {
        let sentence_words = sentence.split_whitespace().count();
        if !summary.is_empty() && words + sentence_words > SUMMARY_WORD_BUDGET {
            break;
        }
        if !summary.is_empty() {
            summary.push(' ');
        }
        summary.push_str(sentence.trim());
        words += sentence_words;
    }

    summary
}

/// Splits on sentence-ending punctuation, keeping the terminator.
fn split_sentences(text: &str) -> impl Iterator<Item = &str> {
    text.split_inclusive(['.', '!', '?'])
        .filter(|s| !s.trim().is_empty())
}

/// The offline provider. Construct with [`LexiconProvider::new`].
#[derive(Debug, Default)]
pub struct LexiconProvider;

impl LexiconProvider {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl TextModelProvider for LexiconProvider {
    async fn classify_sentiment(&self, text: &str) -> Result<SentimentLabel, ModelError> {
        let score = lexicon_score(text);
        let label = if score >= POLARITY_THRESHOLD {
            SentimentLabel::Positive
        } else if score <= -POLARITY_THRESHOLD {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        };
        Ok(label)
    }

    async fn summarize(&self, text: &str) -> Result<String, ModelError> {
        Ok(extract_summary(text))
    }

    async fn reflect(&self, prompt: &str) -> Result<String, ModelError> {
        // The pipeline embeds the summary after the first blank line.
        let summary = prompt
            .split_once("\n\n")
            .map_or(prompt, |(_, tail)| tail)
            .trim();
        Ok(format!(
            "Taken together, the reviews come down to this: {summary}"
        ))
    }
}

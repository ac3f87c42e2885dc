//! Collection-time text normalization for raw review records.

/// Reviews whose normalized text is this many characters or fewer are
/// dropped at collection time — they carry too little signal to classify.
pub(crate) const MIN_REVIEW_CHARS: usize = 50;

/// Flattens newlines to spaces and trims surrounding whitespace.
///
/// Review bodies arrive with hard line breaks; downstream cleaning and
/// chunking expect a single line of text.
pub(crate) fn normalize_review_text(raw: &str) -> String {
    raw.replace(['\n', '\r'], " ").trim().to_string()
}

/// Returns `true` when the normalized text is long enough to keep.
pub(crate) fn passes_length_filter(normalized: &str) -> bool {
    normalized.chars().count() > MIN_REVIEW_CHARS
}

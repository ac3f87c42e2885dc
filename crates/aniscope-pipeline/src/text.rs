//! Review text cleaning and chunking.

use regex::Regex;

/// Upper bound on a single chunk, in characters.
pub const CHUNK_CHAR_CAP: usize = 1024;

/// How many cleaned review texts are concatenated into one chunk.
pub const CHUNK_GROUP_SIZE: usize = 3;

/// Strips URL runs and punctuation noise from review text.
///
/// Removes `http...` substrings up to the next whitespace, then every
/// character outside letters, digits, `.,!?` and space, then trims.
/// Idempotent: cleaning already-clean text is a no-op.
#[must_use]
pub fn clean(text: &str) -> String {
    let urls = Regex::new(r"http\S+").expect("valid URL regex");
    let noise = Regex::new(r"[^a-zA-Z0-9.,!? ]+").expect("valid noise regex");

    let without_urls = urls.replace_all(text, "");
    let without_noise = noise.replace_all(&without_urls, "");
    without_noise.trim().to_string()
}

/// Groups consecutive cleaned texts into bounded chunks.
///
/// Each group of `size` texts is joined with single spaces and truncated to
/// [`CHUNK_CHAR_CAP`] characters. Deterministic for a given ordered input.
/// A `size` of zero is treated as one text per chunk.
#[must_use]
pub fn chunk(texts: &[String], size: usize) -> Vec<String> {
    let size = size.max(1);
    texts
        .chunks(size)
        .map(|group| truncate_chars(&group.join(" "), CHUNK_CHAR_CAP))
        .collect()
}

/// Truncates to at most `cap` characters, respecting char boundaries.
pub(crate) fn truncate_chars(text: &str, cap: usize) -> String {
    match text.char_indices().nth(cap) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_strips_urls() {
        assert_eq!(
            clean("watch it here https://example.com/ep1 now"),
            "watch it here  now"
        );
    }

    #[test]
    fn clean_strips_non_allowed_characters() {
        assert_eq!(clean("so good™ — 10/10 (really)"), "so good  1010 really");
        assert_eq!(clean("騙された! subbed only"), "! subbed only");
    }

    #[test]
    fn clean_keeps_allowed_punctuation() {
        assert_eq!(clean("Wait, what?! Yes."), "Wait, what?! Yes.");
    }

    #[test]
    fn clean_is_idempotent() {
        let inputs = [
            "plain text already",
            "mixed: http://x.y/z and ünïcode!",
            "  padded  ",
            "",
        ];
        for input in inputs {
            let once = clean(input);
            assert_eq!(clean(&once), once, "clean not idempotent for {input:?}");
        }
    }

    #[test]
    fn chunk_groups_by_size_with_space_joins() {
        let texts: Vec<String> = ["a", "b", "c", "d", "e"]
            .iter()
            .map(ToString::to_string)
            .collect();
        let chunks = chunk(&texts, 3);
        assert_eq!(chunks, vec!["a b c".to_string(), "d e".to_string()]);
    }

    #[test]
    fn chunk_respects_char_cap_for_any_size() {
        let long = "x".repeat(700);
        let texts = vec![long.clone(), long.clone(), long];
        for size in 1..=4 {
            for piece in chunk(&texts, size) {
                assert!(piece.chars().count() <= CHUNK_CHAR_CAP);
            }
        }
    }

    #[test]
    fn chunk_of_empty_input_is_empty() {
        assert!(chunk(&[], 3).is_empty());
    }

    #[test]
    fn chunk_size_zero_falls_back_to_one() {
        let texts = vec!["a".to_string(), "b".to_string()];
        assert_eq!(chunk(&texts, 0).len(), 2);
    }

    #[test]
    fn truncate_does_not_split_multibyte_chars() {
        let text = "é".repeat(10);
        let cut = truncate_chars(&text, 4);
        assert_eq!(cut.chars().count(), 4);
        assert_eq!(cut, "éééé");
    }
}

//! # Text Normalization and Keyword Matching
//!
//! This module is the single place where free-form speech transcripts are
//! turned into something the quiz can reason about. Speech recognizers hand
//! back several alternative transcriptions per utterance, all of them messy:
//! mixed case, diacritics, stray punctuation. Everything the session controller
//! matches — player counts, game types, artist names, song titles, the repeat
//! command — goes through the same two-step pipeline:
//!
//! 1. [`normalize`] folds a string into a flat token sequence
//! 2. [`find_keyword_matches`] scans tokens against labeled word-variant groups
//!
//! ## Normalization Pipeline
//!
//! - Locale-invariant lowercasing
//! - Unicode NFD decomposition, then dropping combining marks so that
//!   `"Mötley Crüe"` and `"motley crue"` compare equal
//! - Splitting on a fixed delimiter set (see [`DELIMITERS`])
//!
//! Consecutive delimiters produce empty tokens, and those are kept as-is.
//! Keyword variants are never empty, so empty tokens can never match; keeping
//! them preserves positional structure for callers that care about it.
//!
//! ## Examples
//!
//! ```
//! use maestro::text::{normalize, find_keyword_matches, KeywordGroup};
//!
//! let tokens = normalize("Mötley Crüe!");
//! assert!(tokens.contains(&"motley".to_string()));
//! assert!(tokens.contains(&"crue".to_string()));
//!
//! let groups = vec![
//!     KeywordGroup::new("artist", &["elton", "john"]),
//!     KeywordGroup::new("title", &["rocket", "man"]),
//! ];
//! let heard = vec!["the artist is Elton John".to_string()];
//! assert_eq!(find_keyword_matches(&heard, &groups, false), vec!["artist"]);
//! ```

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// The fixed character set transcripts are split on.
///
/// Anything not in this set (apostrophes, for instance) stays inside a token.
pub const DELIMITERS: [char; 16] = [
    ' ', '-', ',', ';', '?', '!', '.', '(', ')', '/', '_', '+', '=', '&', '@', ':',
];

/// A label mapped to the word variants that count as saying it.
///
/// Used for numbers ("two" / "2" / "too"), game types, repeat commands, and
/// the per-track artist/title token sets built at guess time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordGroup {
    pub label: String,
    pub variants: Vec<String>,
}

impl KeywordGroup {
    /// Build a group from static variant words.
    #[must_use]
    pub fn new(label: &str, variants: &[&str]) -> Self {
        Self {
            label: label.to_string(),
            variants: variants.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    /// Build a group whose variants are the normalized, non-empty tokens of
    /// the given phrases. This is how artist and title groups are derived
    /// from track metadata.
    #[must_use]
    pub fn from_phrases(label: &str, phrases: &[String]) -> Self {
        let variants = phrases
            .iter()
            .flat_map(|p| normalize(p))
            .filter(|t| !t.is_empty())
            .collect();
        Self {
            label: label.to_string(),
            variants,
        }
    }
}

/// Fold a free-form string into a flat sequence of comparable tokens.
///
/// Lowercases, strips diacritics via NFD decomposition, then splits on
/// [`DELIMITERS`]. Empty tokens from consecutive delimiters are included.
#[must_use]
pub fn normalize(text: &str) -> Vec<String> {
    let folded: String = text
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();

    folded
        .split(&DELIMITERS[..])
        .map(str::to_string)
        .collect()
}

/// Render a list of strings as a human-readable comma-joined string.
///
/// Used for multi-artist display ("Simon, Garfunkel") and tie announcements.
#[must_use]
pub fn join_for_display(items: &[String]) -> String {
    items.join(", ")
}

/// Scan candidate utterances against labeled keyword groups.
///
/// For each candidate (in order), tokens are checked against every variant of
/// every group — group-iteration order first, then variant order, then token
/// order. The first match of a label records it; with `stop_at_first` the
/// function returns immediately with that single label. Otherwise scanning
/// continues over all candidates and the distinct matched labels are returned
/// in order of first occurrence.
#[must_use]
pub fn find_keyword_matches(
    candidates: &[String],
    groups: &[KeywordGroup],
    stop_at_first: bool,
) -> Vec<String> {
    let mut matched: Vec<String> = Vec::new();

    for candidate in candidates {
        let tokens = normalize(candidate);

        for group in groups {
            for variant in &group.variants {
                for token in &tokens {
                    if token == variant {
                        if !matched.contains(&group.label) {
                            matched.push(group.label.clone());
                        }
                        if stop_at_first {
                            return matched;
                        }
                        break;
                    }
                }
            }
        }
    }

    matched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_diacritics() {
        let tokens = normalize("Mötley Crüe!");
        assert!(tokens.contains(&"motley".to_string()));
        assert!(tokens.contains(&"crue".to_string()));
    }

    #[test]
    fn test_normalize_lowercases() {
        assert_eq!(normalize("HELLO"), vec!["hello"]);
    }

    #[test]
    fn test_normalize_splits_on_every_delimiter() {
        for delim in DELIMITERS {
            let text = format!("left{delim}right");
            let tokens = normalize(&text);
            assert_eq!(
                tokens,
                vec!["left".to_string(), "right".to_string()],
                "delimiter {delim:?} should split"
            );
        }
    }

    #[test]
    fn test_normalize_keeps_empty_tokens() {
        // Consecutive delimiters produce empty strings and they are kept.
        let tokens = normalize("a, b");
        assert_eq!(tokens, vec!["a", "", "b"]);

        let tokens = normalize("rock-!");
        assert_eq!(tokens, vec!["rock", "", ""]);
    }

    #[test]
    fn test_normalize_keeps_non_delimiter_punctuation() {
        // Apostrophe is not in the delimiter set.
        assert_eq!(normalize("don't"), vec!["don't"]);
    }

    #[test]
    fn test_join_for_display() {
        let artists = vec!["Simon".to_string(), "Garfunkel".to_string()];
        assert_eq!(join_for_display(&artists), "Simon, Garfunkel");
        assert_eq!(join_for_display(&["Solo".to_string()]), "Solo");
        assert_eq!(join_for_display(&[]), "");
    }

    #[test]
    fn test_matching_first_label_order() {
        let groups = vec![
            KeywordGroup::new("artist", &["elton", "john"]),
            KeywordGroup::new("title", &["rocket", "man"]),
        ];
        let heard = vec!["the artist is Elton John".to_string()];

        let matches = find_keyword_matches(&heard, &groups, false);
        assert_eq!(matches, vec!["artist"]);
    }

    #[test]
    fn test_matching_multiple_distinct_labels() {
        let groups = vec![
            KeywordGroup::new("artist", &["elton"]),
            KeywordGroup::new("title", &["rocket"]),
        ];
        let heard = vec!["rocket by elton".to_string()];

        // Group order decides label order, not token position.
        let matches = find_keyword_matches(&heard, &groups, false);
        assert_eq!(matches, vec!["artist", "title"]);
    }

    #[test]
    fn test_matching_stop_at_first() {
        let groups = vec![
            KeywordGroup::new("one", &["one", "1"]),
            KeywordGroup::new("two", &["two", "2"]),
        ];
        let heard = vec!["two players please".to_string()];

        let matches = find_keyword_matches(&heard, &groups, true);
        assert_eq!(matches, vec!["two"]);
    }

    #[test]
    fn test_matching_deduplicates_labels() {
        let groups = vec![KeywordGroup::new("title", &["rocket", "man"])];
        let heard = vec![
            "rocket man".to_string(),
            "the rocket one".to_string(),
        ];

        let matches = find_keyword_matches(&heard, &groups, false);
        assert_eq!(matches, vec!["title"]);
    }

    #[test]
    fn test_matching_scans_later_candidates() {
        let groups = vec![KeywordGroup::new("title", &["rocket"])];
        let heard = vec![
            "no idea".to_string(),
            "maybe rocket".to_string(),
        ];

        let matches = find_keyword_matches(&heard, &groups, false);
        assert_eq!(matches, vec!["title"]);
    }

    #[test]
    fn test_matching_ignores_diacritics_in_utterance() {
        let groups = vec![KeywordGroup::new("artist", &["motley", "crue"])];
        let heard = vec!["Mötley Crüe".to_string()];

        let matches = find_keyword_matches(&heard, &groups, true);
        assert_eq!(matches, vec!["artist"]);
    }

    #[test]
    fn test_group_from_phrases_normalizes_and_drops_empties() {
        let group = KeywordGroup::from_phrases(
            "artist",
            &["Sigur Rós".to_string(), "Jónsi!".to_string()],
        );
        assert_eq!(group.variants, vec!["sigur", "ros", "jonsi"]);
    }

    #[test]
    fn test_no_match_returns_empty() {
        let groups = vec![KeywordGroup::new("title", &["rocket"])];
        let heard = vec!["something else entirely".to_string()];
        assert!(find_keyword_matches(&heard, &groups, false).is_empty());
    }
}

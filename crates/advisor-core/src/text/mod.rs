//! Text processing utilities for word extraction and autocorrelation input

use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;
use tracing::warn;

/// Tokens containing any of these are dropped by [`get_words`], as are tokens with digits
const DISALLOWED: &[char] = &[
    '"', '\'', '[', ']', '{', '}', '(', ')', ',', '.', ';', ':', '<', '>', '?', '/', '\\',
];

struct WordPatterns {
    /// A space followed by a run of non-alphanumerics
    leading_symbols: Regex,
    /// A run of non-alphanumerics followed by a space
    trailing_symbols: Regex,
    spaces: Regex,
}

static WORD_PATTERNS: OnceLock<Option<WordPatterns>> = OnceLock::new();

fn compile_word_patterns() -> Result<WordPatterns, regex::Error> {
    Ok(WordPatterns {
        leading_symbols: Regex::new(" ([^a-zA-Z0-9]+)")?,
        trailing_symbols: Regex::new("([^a-zA-Z0-9]+) ")?,
        spaces: Regex::new(" +")?,
    })
}

fn word_patterns() -> Option<&'static WordPatterns> {
    WORD_PATTERNS
        .get_or_init(|| match compile_word_patterns() {
            Ok(patterns) => Some(patterns),
            Err(e) => {
                warn!(error = %e, "Failed to compile word extraction regex");
                None
            }
        })
        .as_ref()
}

/// Normalize abstract whitespace: newlines become spaces, then runs of two or
/// more spaces collapse to one
pub fn normalize_abstract(text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    let mut previous_space = false;
    for c in text.chars() {
        let c = if c == '\n' { ' ' } else { c };
        if c == ' ' && previous_space {
            continue;
        }
        previous_space = c == ' ';
        normalized.push(c);
    }
    normalized
}

/// Lowercase `text` and drop every character that is not `a-z`, `-` or a space
///
/// Removed characters are not replaced, so words separated only by
/// punctuation or digits fuse together.
pub fn clean_for_autocorrelation(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .filter(|c| c.is_ascii_lowercase() || *c == '-' || *c == ' ')
        .collect()
}

/// Extract the unique words of `text` in order of first occurrence
///
/// Punctuation touching a space is split off into its own token; any token
/// still carrying punctuation or a digit is discarded whole.
pub fn get_words(text: &str) -> Vec<String> {
    let Some(patterns) = word_patterns() else {
        return Vec::new();
    };

    let text = text.replace('\t', " ");
    let text = patterns.leading_symbols.replace_all(&text, " $1 ");
    let text = patterns.trailing_symbols.replace_all(&text, " $1 ");
    let text = text.replace('\n', " ");
    let text = patterns.spaces.replace_all(&text, " ").to_lowercase();

    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for token in text.split(' ') {
        if token.is_empty() || !is_allowed_word(token) {
            continue;
        }
        if seen.insert(token) {
            words.push(token.to_string());
        }
    }
    words
}

fn is_allowed_word(token: &str) -> bool {
    !token
        .chars()
        .any(|c| c.is_ascii_digit() || DISALLOWED.contains(&c))
}

/// Lowercase and deduplicate a word list, keeping first occurrences in order
pub fn dedup_lowercase<I, S>(words: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    words
        .into_iter()
        .map(|w| w.as_ref().to_lowercase())
        .filter(|w| seen.insert(w.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_abstract_newlines_and_runs() {
        let text = "\n  We study\nthe  dynamics   of stars.\n";
        assert_eq!(normalize_abstract(text), " We study the dynamics of stars. ");
    }

    #[test]
    fn test_normalize_abstract_keeps_tabs() {
        assert_eq!(normalize_abstract("a\t\tb"), "a\t\tb");
    }

    #[test]
    fn test_clean_strips_without_separator() {
        assert_eq!(clean_for_autocorrelation("Dark-Matter halos!"), "dark-matter halos");
        // Digits and punctuation vanish, fusing neighbours
        assert_eq!(clean_for_autocorrelation("spin-1/2 fields"), "spin- fields");
        assert_eq!(clean_for_autocorrelation("end.Start"), "endstart");
    }

    #[test]
    fn test_clean_drops_newlines_and_tabs() {
        assert_eq!(clean_for_autocorrelation("a\nb\tc"), "abc");
    }

    #[test]
    fn test_get_words_splits_punctuation_near_spaces() {
        let words = get_words("Gravitational waves (GW) from 2 sources.");
        // "sources." has no trailing space, so its period stays attached and it is dropped
        assert_eq!(words, vec!["gravitational", "waves", "gw", "from"]);
    }

    #[test]
    fn test_get_words_unique_in_order() {
        let words = get_words("Black holes and black Holes, and more");
        assert_eq!(words, vec!["black", "holes", "and", "more"]);
    }

    #[test]
    fn test_get_words_drops_tokens_with_digits() {
        let words = get_words("the SU3 model in 4d");
        assert_eq!(words, vec!["the", "model", "in"]);
    }

    #[test]
    fn test_get_words_keeps_hyphens_and_other_symbols() {
        let words = get_words("non-abelian gauge ! theory");
        assert_eq!(words, vec!["non-abelian", "gauge", "!", "theory"]);
    }

    #[test]
    fn test_get_words_handles_tabs_and_newlines() {
        let words = get_words("quantum\tfield\ntheory");
        assert_eq!(words, vec!["quantum", "field", "theory"]);
    }

    #[test]
    fn test_get_words_empty() {
        assert!(get_words("").is_empty());
        assert!(get_words("  ( ) . ").is_empty());
    }

    #[test]
    fn test_dedup_lowercase() {
        let words = dedup_lowercase(["Gravity", "waves", "GRAVITY", "Waves"]);
        assert_eq!(words, vec!["gravity", "waves"]);
    }
}

//! Common-word exclusion list
//!
//! Loaded once from a `word:rank` file and shared read-only between the
//! autocorrelator, the comparator and the record parser.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use crate::error::{AdvisorError, Result};

/// Set of common words excluded from scoring, with their optional frequency rank
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommonWordSet {
    words: HashMap<String, Option<u32>>,
}

impl CommonWordSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from bare words without ranks
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(|w| (w.into(), None)).collect(),
        }
    }

    /// Parse `word:rank` lines
    ///
    /// The word is everything before the first colon. Blank lines are skipped
    /// and a line without a colon is a word with no rank.
    pub fn parse(content: &str) -> Self {
        let mut words = HashMap::new();
        for line in content.lines() {
            if line.trim().is_empty() {
                continue;
            }
            let (word, rank) = match line.split_once(':') {
                Some((word, rest)) => {
                    let rank_field = rest.split(':').next().unwrap_or_default();
                    (word.trim(), rank_field.trim().parse::<u32>().ok())
                }
                None => (line.trim(), None),
            };
            words.insert(word.to_string(), rank);
        }
        Self { words }
    }

    /// Load the word list from a file
    #[tracing::instrument(skip(path), fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| AdvisorError::file_operation("read common words from", path, e))?;
        let set = Self::parse(&content);
        tracing::debug!(words = set.len(), "Loaded common words");
        Ok(set)
    }

    /// Whether `word` is a common word
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains_key(word)
    }

    /// Frequency rank of `word`, if it is listed with one
    pub fn rank(&self, word: &str) -> Option<u32> {
        self.words.get(word).copied().flatten()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

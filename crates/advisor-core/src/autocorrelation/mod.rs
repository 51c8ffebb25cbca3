//! Autocorrelation scoring for picking out words with shared roots
//!
//! Every character position is scored by how often the substring starting
//! there recurs anywhere in the text. Words collect the scores of their
//! characters, so "gravity" ranks high in a text that also talks about
//! "gravitational" and "graviton".

use std::collections::HashMap;
use std::time::Instant;

use serde::Serialize;

use crate::bail_invalid;
use crate::common::CommonWordSet;
use crate::error::{AdvisorError, Result};
use crate::text::clean_for_autocorrelation;
use crate::trace_time;

/// Kernel lengths used when none are configured
pub const DEFAULT_KERNELS: &[usize] = &[3];

/// A word and its normalized autocorrelation score
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordScore {
    pub word: String,
    /// Score in [0.0, 1.0]; the top word scores exactly 1.0
    pub score: f64,
}

/// Words ranked by descending autocorrelation score
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutocorrelationResult {
    entries: Vec<WordScore>,
    index: HashMap<String, usize>,
}

impl AutocorrelationResult {
    fn from_ranked(entries: Vec<WordScore>) -> Self {
        let index = entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (entry.word.clone(), i))
            .collect();
        Self { entries, index }
    }

    /// Score of `word`, if it survived exclusion
    pub fn get(&self, word: &str) -> Option<f64> {
        self.index.get(word).map(|&i| self.entries[i].score)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Entries in rank order
    pub fn iter(&self) -> impl Iterator<Item = &WordScore> {
        self.entries.iter()
    }

    pub fn entries(&self) -> &[WordScore] {
        &self.entries
    }

    /// Highest-ranked word
    pub fn top(&self) -> Option<&WordScore> {
        self.entries.first()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a AutocorrelationResult {
    type Item = &'a WordScore;
    type IntoIter = std::slice::Iter<'a, WordScore>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Rank the words of `text` by autocorrelation
///
/// Words in `excluded` are dropped after scoring, repeated words have their
/// scores summed, and the result is divided by the largest score. Ties keep
/// the order in which words first appear.
///
/// # Errors
///
/// - `InvalidValue` if `kernels` is empty
/// - `InvalidKernel` if a kernel is zero or not shorter than the cleaned text
/// - `EmptyVocabulary` if no word with a positive score survives exclusion
pub fn autocorrelate(
    text: &str,
    excluded: &CommonWordSet,
    kernels: &[usize],
) -> Result<AutocorrelationResult> {
    let start = Instant::now();

    if kernels.is_empty() {
        bail_invalid!("kernel list", "[]");
    }

    let cleaned = clean_for_autocorrelation(text);
    let bytes = cleaned.as_bytes();
    if let Some(&kernel) = kernels.iter().find(|&&k| k == 0 || k >= bytes.len()) {
        return Err(AdvisorError::InvalidKernel {
            kernel,
            text_len: bytes.len(),
        });
    }

    let positions = position_scores(bytes, kernels);
    let words: Vec<&str> = cleaned.split(' ').collect();
    let raw = word_scores(bytes, &positions, words.len());

    let word_count = words.len() as f64;
    let kernel_count = kernels.len() as f64;

    let mut combined: Vec<(String, f64)> = Vec::new();
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (word, raw_score) in words.iter().copied().zip(raw) {
        let damping = (1.0 + word.len() as f64) * (1.0 + word_count) + (1.0 + kernel_count);
        let score = raw_score as f64 / damping;

        if excluded.contains(word) {
            continue;
        }
        match seen.get(word) {
            Some(&i) => combined[i].1 += score,
            None => {
                seen.insert(word, combined.len());
                combined.push((word.to_string(), score));
            }
        }
    }

    let max_score = combined
        .iter()
        .map(|(_, score)| *score)
        .fold(0.0_f64, f64::max);
    if max_score <= 0.0 {
        tracing::debug!(
            candidates = combined.len(),
            "No scorable words after exclusion"
        );
        return Err(AdvisorError::EmptyVocabulary);
    }

    let mut entries: Vec<WordScore> = combined
        .into_iter()
        .map(|(word, score)| WordScore {
            word,
            score: score / max_score,
        })
        .collect();
    // Stable: equal scores keep first-appearance order
    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    trace_time!(
        start,
        "autocorrelate",
        text_len = bytes.len(),
        words = entries.len()
    );
    Ok(AutocorrelationResult::from_ranked(entries))
}

/// Count, for each position `n`, how many positions start the same `k`
/// characters, summed over kernels
///
/// The text is read as a ring: windows near the end wrap around to the start.
/// Every position is compared against every position, itself included, so
/// each score is at least the number of kernels.
fn position_scores(text: &[u8], kernels: &[usize]) -> Vec<u64> {
    let len = text.len();
    let mut scores = vec![0u64; len];

    for &k in kernels {
        let ring: Vec<u8> = text.iter().chain(&text[..k]).copied().collect();
        for n in 0..len {
            let window = &ring[n..n + k];
            let matches = (0..len).filter(|&m| &ring[m..m + k] == window).count();
            scores[n] += matches as u64;
        }
    }

    scores
}

/// Sum position scores into the space-delimited words they fall in
fn word_scores(text: &[u8], positions: &[u64], word_count: usize) -> Vec<u64> {
    let mut scores = vec![0u64; word_count];
    let mut current = 0;

    for (&byte, &score) in text.iter().zip(positions) {
        if byte == b' ' {
            current += 1;
            continue;
        }
        scores[current] += score;
    }

    scores
}

#[cfg(test)]
mod tests;

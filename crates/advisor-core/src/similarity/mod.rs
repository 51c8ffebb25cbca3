//! Article comparison for related-work discovery
//!
//! Two articles score by shared autocorrelated vocabulary, shared uncommon
//! title words and matching categories, divided by the best score the
//! smaller side of each signal could reach.

mod ranking;
mod weights;

pub use ranking::RelatedArticle;
pub use weights::{
    ScoringWeights, AUTHOR_MATCH_WEIGHT, CATEGORY_MATCH, SUB_CATEGORY_MATCH,
    UNCOMMON_ABSTRACT_MATCH, UNCOMMON_TITLE_MATCH,
};

use std::time::Instant;

use serde::Serialize;

use crate::article::ParsedArticle;
use crate::autocorrelation::{autocorrelate, AutocorrelationResult, DEFAULT_KERNELS};
use crate::common::CommonWordSet;
use crate::error::{AdvisorError, Result};
use crate::trace_time;

/// An article together with its autocorrelated vocabulary
#[derive(Debug, Clone)]
pub struct ArticleProfile<'a> {
    article: &'a ParsedArticle,
    vocabulary: AutocorrelationResult,
}

impl<'a> ArticleProfile<'a> {
    pub fn article(&self) -> &'a ParsedArticle {
        self.article
    }

    /// Autocorrelated title+abstract words; empty when every word is common
    pub fn vocabulary(&self) -> &AutocorrelationResult {
        &self.vocabulary
    }
}

/// Components of a comparison score
///
/// Each overlap is the numerator contribution of one signal. `total` is their
/// sum, accumulated in the order abstract, title, category, subcategory,
/// author.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreBreakdown {
    pub abstract_overlap: f64,
    pub title_overlap: f64,
    pub category_overlap: f64,
    pub sub_category_overlap: f64,
    pub author_overlap: f64,
    pub total: f64,
    pub max_score: f64,
}

impl ScoreBreakdown {
    /// Normalized score `total / max_score`
    ///
    /// Usually within [0, 1], but duplicate categories on the first article
    /// can push it above 1. A zero or non-finite maximum has no defined score.
    pub fn score(&self) -> Result<f64> {
        if self.max_score == 0.0 || !self.max_score.is_finite() || !self.total.is_finite() {
            return Err(AdvisorError::UndefinedScore);
        }
        Ok(self.total / self.max_score)
    }
}

/// Compares articles against a shared common-word list
#[derive(Debug, Clone)]
pub struct Comparator<'a> {
    common: &'a CommonWordSet,
    weights: ScoringWeights,
    kernels: Vec<usize>,
}

impl<'a> Comparator<'a> {
    /// Create a comparator with default weights and kernels
    pub fn new(common: &'a CommonWordSet) -> Self {
        Comparator {
            common,
            weights: ScoringWeights::default(),
            kernels: DEFAULT_KERNELS.to_vec(),
        }
    }

    pub fn with_weights(mut self, weights: ScoringWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_kernels(mut self, kernels: Vec<usize>) -> Self {
        self.kernels = kernels;
        self
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    pub fn kernels(&self) -> &[usize] {
        &self.kernels
    }

    /// Autocorrelate an article's title and abstract
    ///
    /// An article whose words are all common gets an empty vocabulary instead
    /// of an error, so it can still be compared on its other signals.
    pub fn profile<'b>(&self, article: &'b ParsedArticle) -> Result<ArticleProfile<'b>> {
        let vocabulary = match autocorrelate(&article.scoring_text(), self.common, &self.kernels) {
            Ok(vocabulary) => vocabulary,
            Err(AdvisorError::EmptyVocabulary) => {
                tracing::debug!(
                    identifier = article.identifier().unwrap_or_default(),
                    "Article has no uncommon vocabulary"
                );
                AutocorrelationResult::default()
            }
            Err(e) => return Err(e),
        };
        Ok(ArticleProfile {
            article,
            vocabulary,
        })
    }

    /// Score how related two articles are
    ///
    /// # Errors
    ///
    /// - `UndefinedScore` if neither article carries any comparable signal
    /// - `InvalidKernel` if an article's text is shorter than a kernel
    pub fn compare(&self, a1: &ParsedArticle, a2: &ParsedArticle) -> Result<f64> {
        self.breakdown(a1, a2)?.score()
    }

    /// Score two articles and keep the individual components
    pub fn breakdown(&self, a1: &ParsedArticle, a2: &ParsedArticle) -> Result<ScoreBreakdown> {
        let p1 = self.profile(a1)?;
        let p2 = self.profile(a2)?;
        Ok(self.breakdown_profiles(&p1, &p2))
    }

    /// Score two already profiled articles
    pub fn compare_profiles(&self, p1: &ArticleProfile<'_>, p2: &ArticleProfile<'_>) -> Result<f64> {
        self.breakdown_profiles(p1, p2).score()
    }

    /// Compute the score components for two profiled articles
    pub fn breakdown_profiles(
        &self,
        p1: &ArticleProfile<'_>,
        p2: &ArticleProfile<'_>,
    ) -> ScoreBreakdown {
        let start = Instant::now();
        let w = &self.weights;
        let (a1, a2) = (p1.article, p2.article);
        let mut total = 0.0;

        let mut abstract_overlap = 0.0;
        for entry in p1.vocabulary.iter() {
            if let Some(other) = p2.vocabulary.get(&entry.word) {
                let term = w.uncommon_abstract_match * entry.score * other;
                abstract_overlap += term;
                total += term;
            }
        }

        let title_overlap = add_matches(
            &mut total,
            a1.uncommon_title_words(),
            a2.uncommon_title_words(),
            w.uncommon_title_match,
        );
        let category_overlap = add_matches(
            &mut total,
            a1.categories(),
            a2.categories(),
            w.category_match,
        );
        let sub_category_overlap = add_matches(
            &mut total,
            a1.sub_categories(),
            a2.sub_categories(),
            w.sub_category_match,
        );
        let author_overlap = match w.author_match {
            Some(weight) => add_matches(&mut total, a1.authors(), a2.authors(), weight),
            None => 0.0,
        };

        let mut max_score = w.uncommon_title_match
            * min_len(a1.uncommon_title_words(), a2.uncommon_title_words())
            + w.uncommon_abstract_match * p1.vocabulary.len().min(p2.vocabulary.len()) as f64
            + w.category_match * min_len(a1.categories(), a2.categories())
            + w.sub_category_match * min_len(a1.sub_categories(), a2.sub_categories());
        if let Some(weight) = w.author_match {
            max_score += weight * min_len(a1.authors(), a2.authors());
        }

        tracing::debug!(
            abstract_overlap,
            title_overlap,
            category_overlap,
            sub_category_overlap,
            total,
            max_score,
            "Compared articles"
        );
        trace_time!(start, "compare_articles");

        ScoreBreakdown {
            abstract_overlap,
            title_overlap,
            category_overlap,
            sub_category_overlap,
            author_overlap,
            total,
            max_score,
        }
    }
}

/// Add `weight` to `total` for every item of `ours` that appears in `theirs`
///
/// Duplicates in `ours` each count.
fn add_matches(total: &mut f64, ours: &[String], theirs: &[String], weight: f64) -> f64 {
    let mut overlap = 0.0;
    for item in ours {
        if theirs.contains(item) {
            overlap += weight;
            *total += weight;
        }
    }
    overlap
}

fn min_len(a: &[String], b: &[String]) -> f64 {
    a.len().min(b.len()) as f64
}

/// Score two articles with the default weights and a kernel of 3
pub fn compare_articles(
    a1: &ParsedArticle,
    a2: &ParsedArticle,
    common: &CommonWordSet,
) -> Result<f64> {
    Comparator::new(common).compare(a1, a2)
}

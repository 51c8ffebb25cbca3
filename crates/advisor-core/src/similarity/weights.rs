//! Scoring weights for article comparison
//!
//! - uncommon title word match: 10
//! - shared autocorrelated word: 1 (scaled by both articles' scores)
//! - category match: 100
//! - subcategory match: 100

use serde::{Deserialize, Serialize};

use crate::error::{AdvisorError, Result};

/// Weight per uncommon title word shared by both articles
pub const UNCOMMON_TITLE_MATCH: f64 = 10.0;

/// Weight per autocorrelated word shared by both articles
pub const UNCOMMON_ABSTRACT_MATCH: f64 = 1.0;

/// Weight per matching category occurrence
pub const CATEGORY_MATCH: f64 = 100.0;

/// Weight per matching subcategory occurrence
pub const SUB_CATEGORY_MATCH: f64 = 100.0;

/// Suggested author overlap weight. Only applied when configured through
/// [`ScoringWeights::author_match`].
pub const AUTHOR_MATCH_WEIGHT: f64 = 15.0;

/// Weights applied by the comparator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringWeights {
    #[serde(default = "default_uncommon_title_match")]
    pub uncommon_title_match: f64,

    #[serde(default = "default_uncommon_abstract_match")]
    pub uncommon_abstract_match: f64,

    #[serde(default = "default_category_match")]
    pub category_match: f64,

    #[serde(default = "default_sub_category_match")]
    pub sub_category_match: f64,

    /// Author overlap bonus; unset leaves authors out of the score entirely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_match: Option<f64>,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            uncommon_title_match: UNCOMMON_TITLE_MATCH,
            uncommon_abstract_match: UNCOMMON_ABSTRACT_MATCH,
            category_match: CATEGORY_MATCH,
            sub_category_match: SUB_CATEGORY_MATCH,
            author_match: None,
        }
    }
}

impl ScoringWeights {
    /// Enable the author overlap bonus with the given weight
    pub fn with_author_match(mut self, weight: f64) -> Self {
        self.author_match = Some(weight);
        self
    }

    /// Reject weights that are negative or not finite
    ///
    /// Either would let a comparison produce NaN or cancel its maximum to zero.
    pub fn validate(&self) -> Result<()> {
        let weights = [
            ("scoring.uncommon_title_match", Some(self.uncommon_title_match)),
            ("scoring.uncommon_abstract_match", Some(self.uncommon_abstract_match)),
            ("scoring.category_match", Some(self.category_match)),
            ("scoring.sub_category_match", Some(self.sub_category_match)),
            ("scoring.author_match", self.author_match),
        ];
        for (field, weight) in weights {
            if let Some(weight) = weight.filter(|w| !w.is_finite() || *w < 0.0) {
                return Err(AdvisorError::invalid_value(field, weight));
            }
        }
        Ok(())
    }
}

fn default_uncommon_title_match() -> f64 {
    UNCOMMON_TITLE_MATCH
}

fn default_uncommon_abstract_match() -> f64 {
    UNCOMMON_ABSTRACT_MATCH
}

fn default_category_match() -> f64 {
    CATEGORY_MATCH
}

fn default_sub_category_match() -> f64 {
    SUB_CATEGORY_MATCH
}

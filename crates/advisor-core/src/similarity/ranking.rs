//! Ranking candidate articles against a reference article

use serde::Serialize;

use super::Comparator;
use crate::article::ParsedArticle;
use crate::error::Result;

/// A candidate's score against the reference article
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelatedArticle {
    /// Position of the candidate in the input slice
    pub index: usize,
    /// arXiv identifier, if the candidate has one
    pub id: Option<String>,
    pub score: f64,
}

impl Comparator<'_> {
    /// Rank `candidates` by their score against `reference`
    ///
    /// Candidates that cannot be scored (no shared signal, text too short for
    /// a kernel) are skipped. Results below `threshold` are dropped; the rest
    /// are sorted by descending score, ties keeping input order, and cut to
    /// `limit`.
    ///
    /// # Errors
    ///
    /// Fails only if the reference article itself cannot be profiled.
    #[tracing::instrument(
        skip(self, reference, candidates),
        fields(candidates = candidates.len())
    )]
    pub fn find_related(
        &self,
        reference: &ParsedArticle,
        candidates: &[ParsedArticle],
        limit: usize,
        threshold: f64,
    ) -> Result<Vec<RelatedArticle>> {
        let reference = self.profile(reference)?;
        let mut results = Vec::new();

        for (index, candidate) in candidates.iter().enumerate() {
            let score = self
                .profile(candidate)
                .and_then(|profile| self.compare_profiles(&reference, &profile));
            let score = match score {
                Ok(score) => score,
                Err(e) if e.is_scoring_error() => {
                    tracing::debug!(
                        index,
                        id = candidate.identifier(),
                        error = %e,
                        "Skipping candidate"
                    );
                    continue;
                }
                Err(e) => return Err(e),
            };

            if score >= threshold {
                results.push(RelatedArticle {
                    index,
                    id: candidate.identifier().map(str::to_string),
                    score,
                });
            }
        }

        results.sort_by(|a, b| b.score.total_cmp(&a.score));
        results.truncate(limit);
        Ok(results)
    }
}

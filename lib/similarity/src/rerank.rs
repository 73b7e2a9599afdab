//! Reranker for mood-aware recommendations
//!
//! Scores an embedding candidate pool with a weighted blend of semantic
//! similarity and mood-tag overlap, then deduplicates by `(title, author)`
//! and keeps the top `n`.

use crate::config::{RankError, RankWeights};
use crate::distance::{jaccard_sets, semantic_score};
use ahash::AHashSet;
use psyreco_core::CandidateItem;

/// A candidate with its component scores
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub item: CandidateItem,
    /// `1 - distance`
    pub semantic_score: f32,
    /// Jaccard index of query tags and the item's emotion + mindset tags
    pub mood_score: f32,
    /// `alpha * semantic_score + beta * mood_score`
    pub weighted_score: f32,
}

/// Weighted reranker
#[derive(Debug, Clone, Copy, Default)]
pub struct Reranker {
    weights: RankWeights,
}

impl Reranker {
    /// Create a reranker. Weights are used exactly as given.
    pub fn new(weights: RankWeights) -> Self {
        Self { weights }
    }

    /// Score a single candidate against a prepared query tag set
    pub fn score(&self, item: CandidateItem, query_tags: &AHashSet<&str>) -> ScoredCandidate {
        let semantic = semantic_score(item.distance);
        let item_tags: AHashSet<&str> = item.tags().collect();
        let mood = jaccard_sets(query_tags, &item_tags);
        let weighted = self.weights.alpha * semantic + self.weights.beta * mood;

        ScoredCandidate {
            item,
            semantic_score: semantic,
            mood_score: mood,
            weighted_score: weighted,
        }
    }

    /// Rerank a pool and keep the `n` best unique books
    ///
    /// The sort is stable, so equal scores keep pool order. The first
    /// (highest scoring) occurrence of each `(title, author)` wins; later
    /// duplicates are dropped. Fewer than `n` unique books returns them all.
    pub fn rerank<S: AsRef<str>>(
        &self,
        pool: Vec<CandidateItem>,
        query_tags: &[S],
        n: usize,
    ) -> Result<Vec<ScoredCandidate>, RankError> {
        if n == 0 {
            return Err(RankError::ZeroResultCount);
        }

        let query: AHashSet<&str> = query_tags.iter().map(AsRef::as_ref).collect();
        let mut scored: Vec<ScoredCandidate> = pool
            .into_iter()
            .map(|item| self.score(item, &query))
            .collect();

        scored.sort_by(|a, b| b.weighted_score.total_cmp(&a.weighted_score));

        let keep: Vec<bool> = {
            let mut seen: AHashSet<(&str, &str)> = AHashSet::with_capacity(scored.len());
            let mut kept = 0;
            scored
                .iter()
                .map(|candidate| {
                    let first = kept < n && seen.insert(candidate.item.dedup_key());
                    if first {
                        kept += 1;
                    }
                    first
                })
                .collect()
        };

        Ok(scored
            .into_iter()
            .zip(keep)
            .filter_map(|(candidate, first)| first.then_some(candidate))
            .collect())
    }

    /// Like [`Reranker::rerank`], returning only the items
    pub fn rank<S: AsRef<str>>(
        &self,
        pool: Vec<CandidateItem>,
        query_tags: &[S],
        n: usize,
    ) -> Result<Vec<CandidateItem>, RankError> {
        Ok(self
            .rerank(pool, query_tags, n)?
            .into_iter()
            .map(|scored| scored.item)
            .collect())
    }
}

/// Rerank `pool` with weights `alpha` and `beta`, validating them first
pub fn rank<S: AsRef<str>>(
    pool: Vec<CandidateItem>,
    query_tags: &[S],
    n: usize,
    alpha: f32,
    beta: f32,
) -> Result<Vec<CandidateItem>, RankError> {
    Reranker::new(RankWeights::new(alpha, beta)?).rank(pool, query_tags, n)
}

//! End-to-end recommendation over injected collaborators
//!
//! `tags -> query text -> vector -> candidate pool -> rerank`. The
//! embedder and candidate source are constructed by the caller and shared
//! through `Arc`; the recommender keeps no per-request state.

use crate::config::{RankError, RankWeights, RecommendConfig};
use crate::rerank::{Reranker, ScoredCandidate};
use psyreco_core::{CandidateItem, CandidateSource, TextEmbedder, Vector};
use std::sync::Arc;
use tracing::{debug, warn};

/// Outcome of asking the candidate source for a pool
#[derive(Debug, Clone, PartialEq)]
pub enum Pool {
    Retrieved(Vec<CandidateItem>),
    /// The source failed; the request degrades to an empty result
    Unavailable(String),
}

/// Ranked, deduplicated recommendations for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Recommendations {
    results: Vec<ScoredCandidate>,
    query_tags: Vec<String>,
    candidates_considered: usize,
    source_unavailable: bool,
}

impl Recommendations {
    /// Explicitly empty result for a request whose pool could not be fetched
    pub fn unavailable(query_tags: Vec<String>) -> Self {
        Self {
            results: Vec::new(),
            query_tags,
            candidates_considered: 0,
            source_unavailable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn scored(&self) -> &[ScoredCandidate] {
        &self.results
    }

    pub fn items(&self) -> Vec<&CandidateItem> {
        self.results.iter().map(|r| &r.item).collect()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.results.iter().map(|r| r.item.id.as_str()).collect()
    }

    pub fn distances(&self) -> Vec<f32> {
        self.results.iter().map(|r| r.item.distance).collect()
    }

    /// Tags the request was actually ranked against, after default substitution
    pub fn query_tags(&self) -> &[String] {
        &self.query_tags
    }

    pub fn candidates_considered(&self) -> usize {
        self.candidates_considered
    }

    pub fn source_unavailable(&self) -> bool {
        self.source_unavailable
    }
}

/// Composes an embedder, a candidate source and the reranker
pub struct Recommender {
    embedder: Arc<dyn TextEmbedder>,
    source: Arc<dyn CandidateSource>,
    config: RecommendConfig,
}

impl Recommender {
    pub fn new(
        embedder: Arc<dyn TextEmbedder>,
        source: Arc<dyn CandidateSource>,
        config: RecommendConfig,
    ) -> Result<Self, RankError> {
        config.validate()?;
        Ok(Self {
            embedder,
            source,
            config,
        })
    }

    pub fn config(&self) -> &RecommendConfig {
        &self.config
    }

    /// The tags a request ranks against: `query_tags`, or the configured
    /// defaults when none were given
    pub fn effective_tags<S: AsRef<str>>(&self, query_tags: &[S]) -> Vec<String> {
        if query_tags.is_empty() {
            self.config.default_tags.clone()
        } else {
            query_tags.iter().map(|t| t.as_ref().to_string()).collect()
        }
    }

    /// Embed the space-joined tags
    pub fn query_vector(&self, tags: &[String]) -> Vector {
        self.embedder.embed(&tags.join(" "))
    }

    /// Fetch `k` candidates, converting a source failure into [`Pool::Unavailable`]
    pub fn fetch_pool(&self, vector: &Vector, k: usize) -> Pool {
        match self.source.query(vector, k) {
            Ok(items) => {
                debug!("Candidate source returned {} of {} requested", items.len(), k);
                Pool::Retrieved(items)
            }
            Err(e) => {
                warn!("Candidate source unavailable: {}", e);
                Pool::Unavailable(e.to_string())
            }
        }
    }

    /// Recommend `n` books for `query_tags` with explicit weights
    pub fn recommend<S: AsRef<str>>(
        &self,
        query_tags: &[S],
        n: usize,
        weights: RankWeights,
    ) -> Result<Recommendations, RankError> {
        if n == 0 {
            return Err(RankError::ZeroResultCount);
        }
        weights.validate()?;

        let tags = self.effective_tags(query_tags);
        let vector = self.query_vector(&tags);
        let pool_size = self.config.effective_pool_size(n);

        let candidates = match self.fetch_pool(&vector, pool_size) {
            Pool::Retrieved(items) => items,
            Pool::Unavailable(_) => return Ok(Recommendations::unavailable(tags)),
        };

        let candidates_considered = candidates.len();
        let results = Reranker::new(weights).rerank(candidates, &tags, n)?;
        debug!(
            "Ranked {} candidates into {} recommendations",
            candidates_considered,
            results.len()
        );

        Ok(Recommendations {
            results,
            query_tags: tags,
            candidates_considered,
            source_unavailable: false,
        })
    }

    /// Recommend with the configured result count and weights
    pub fn recommend_default<S: AsRef<str>>(
        &self,
        query_tags: &[S],
    ) -> Result<Recommendations, RankError> {
        self.recommend(query_tags, self.config.default_n, self.config.weights)
    }
}

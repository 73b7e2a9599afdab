//! Ranking parameters
//!
//! Weights and pool sizing for the recommender. Values are validated once
//! when a [`crate::Recommender`] is built or a request arrives; the reranker
//! itself trusts what it is given.

use serde::{Deserialize, Serialize};

/// Default number of recommendations
pub const DEFAULT_RESULT_COUNT: usize = 5;

/// Default number of candidates fetched before reranking
pub const DEFAULT_POOL_SIZE: usize = 50;

/// Default weight of embedding similarity
pub const DEFAULT_ALPHA: f32 = 0.7;

/// Default weight of mood-tag similarity
pub const DEFAULT_BETA: f32 = 0.3;

/// Tags used when the mood profile carries no interest tags
pub const DEFAULT_TAGS: [&str; 3] = ["fiction", "self-help", "psychology"];

/// Weights of the two similarity signals
///
/// `alpha + beta` is expected to be 1.0 but is neither enforced nor
/// normalized. Other sums simply move scores outside [0, 1].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RankWeights {
    /// Weight of `1 - distance`
    #[serde(default = "default_alpha")]
    pub alpha: f32,
    /// Weight of the tag Jaccard index
    #[serde(default = "default_beta")]
    pub beta: f32,
}

fn default_alpha() -> f32 {
    DEFAULT_ALPHA
}

fn default_beta() -> f32 {
    DEFAULT_BETA
}

impl Default for RankWeights {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            beta: DEFAULT_BETA,
        }
    }
}

impl RankWeights {
    /// Build validated weights
    pub fn new(alpha: f32, beta: f32) -> Result<Self, RankError> {
        let weights = Self { alpha, beta };
        weights.validate()?;
        Ok(weights)
    }

    /// Each weight must be finite and within [0, 1]
    pub fn validate(&self) -> Result<(), RankError> {
        for (name, value) in [("alpha", self.alpha), ("beta", self.beta)] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(RankError::WeightOutOfRange { name, value });
            }
        }
        Ok(())
    }
}

/// Recommender configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecommendConfig {
    /// Candidates requested from the source before reranking.
    /// Raised to `n` when a caller asks for more results than this.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// Result count used when the caller does not pass one
    #[serde(default = "default_result_count")]
    pub default_n: usize,

    #[serde(default)]
    pub weights: RankWeights,

    /// Substituted for an empty tag list at the recommend boundary
    #[serde(default = "default_tags")]
    pub default_tags: Vec<String>,
}

fn default_pool_size() -> usize {
    DEFAULT_POOL_SIZE
}

fn default_result_count() -> usize {
    DEFAULT_RESULT_COUNT
}

fn default_tags() -> Vec<String> {
    DEFAULT_TAGS.iter().map(|t| t.to_string()).collect()
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            pool_size: DEFAULT_POOL_SIZE,
            default_n: DEFAULT_RESULT_COUNT,
            weights: RankWeights::default(),
            default_tags: default_tags(),
        }
    }
}

impl RecommendConfig {
    pub fn validate(&self) -> Result<(), RankError> {
        if self.pool_size == 0 {
            return Err(RankError::ZeroPoolSize);
        }
        if self.default_n == 0 {
            return Err(RankError::ZeroResultCount);
        }
        if self.default_tags.is_empty() {
            return Err(RankError::EmptyDefaultTags);
        }
        self.weights.validate()
    }

    /// Pool size for a request of `n` results, never smaller than `n`
    #[inline]
    pub fn effective_pool_size(&self, n: usize) -> usize {
        self.pool_size.max(n)
    }
}

/// Invalid ranking parameters. These point at a misconfigured caller and
/// are returned rather than degraded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RankError {
    #[error("Result count must be at least 1")]
    ZeroResultCount,

    #[error("Pool size must be at least 1")]
    ZeroPoolSize,

    #[error("Weight '{name}' must be within [0, 1], got {value}")]
    WeightOutOfRange { name: &'static str, value: f32 },

    #[error("Default tag list cannot be empty")]
    EmptyDefaultTags,
}

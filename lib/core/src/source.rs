//! Collaborator seams used by the recommender
//!
//! Both traits are object safe so callers can construct a concrete embedder
//! and index once and hand them over as `Arc<dyn ...>`.

use crate::{CandidateItem, Result, Vector};

/// Maps text to a fixed-length embedding
pub trait TextEmbedder: Send + Sync {
    /// Dimension of every vector this embedder produces
    fn dim(&self) -> usize;

    fn embed(&self, text: &str) -> Vector;
}

/// Answers nearest-neighbor queries over an item index
pub trait CandidateSource: Send + Sync {
    /// Return up to `k` candidates ordered by distance ascending
    fn query(&self, vector: &Vector, k: usize) -> Result<Vec<CandidateItem>>;
}

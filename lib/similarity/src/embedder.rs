//! Hashed text embedder
//!
//! Turns free text into a fixed-length unit vector without a model.
//! Good enough to place summaries and tag queries that share vocabulary
//! near each other; swap in a learned embedder through [`TextEmbedder`].

use crate::distance::hash_text_to_vector;
use psyreco_core::{TextEmbedder, Vector};

/// Default embedding dimension
pub const DEFAULT_EMBEDDING_DIM: usize = 256;

#[derive(Debug, Clone, Copy)]
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new() -> Self {
        Self {
            dim: DEFAULT_EMBEDDING_DIM,
        }
    }

    pub fn with_dim(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new()
    }
}

impl TextEmbedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, text: &str) -> Vector {
        Vector::new(hash_text_to_vector(text, self.dim))
    }
}

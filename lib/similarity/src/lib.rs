//! # PsyReco Similarity
//!
//! Mood-aware reranking of embedding candidates.
//!
//! An embedding search returns a pool of books ordered by distance. This
//! crate rescores that pool with
//!
//! ```text
//! score = alpha * (1 - distance) + beta * jaccard(query_tags, emotion_tags ∪ mindset_tags)
//! ```
//!
//! then deduplicates by `(title, author)` and keeps the top `n`.
//!
//! ## Example
//!
//! ```rust
//! use psyreco_core::Book;
//! use psyreco_similarity::{Reranker, RankWeights};
//!
//! let pool = vec![
//!     Book::new("1", "Quiet", "Susan Cain").into_candidate(0.4),
//!     Book::new("2", "Stillness Is the Key", "Ryan Holiday")
//!         .with_emotion_tags(["anxious"])
//!         .with_mindset_tags(["calm"])
//!         .into_candidate(0.45),
//! ];
//!
//! let reranker = Reranker::new(RankWeights::default());
//! let top = reranker.rank(pool, &["anxious", "calm"], 5).unwrap();
//! assert_eq!(top[0].title, "Stillness Is the Key");
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Query tags │────>│  Embedder   │────>│  Candidate  │
//! │             │     │ (tags→v)    │     │   Source    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!       │                                        │ pool (M ≥ N)
//!       │              ┌─────────────┐           │
//!       └─────────────>│  Reranker   │<──────────┘
//!                      │ score/dedup │
//!                      └─────────────┘
//!                             │ top N
//!                      ┌─────────────┐
//!                      │  Explain    │
//!                      └─────────────┘
//! ```

pub mod config;
pub mod distance;
pub mod embedder;
pub mod explain;
pub mod recommend;
pub mod rerank;

pub use config::{
    RankError, RankWeights, RecommendConfig, DEFAULT_ALPHA, DEFAULT_BETA, DEFAULT_POOL_SIZE,
    DEFAULT_RESULT_COUNT, DEFAULT_TAGS,
};
pub use distance::{jaccard_similarity, semantic_score};
pub use embedder::{HashEmbedder, DEFAULT_EMBEDDING_DIM};
pub use explain::{ExplainedRecommendation, RecommendationStats};
pub use recommend::{Pool, Recommendations, Recommender};
pub use rerank::{rank, Reranker, ScoredCandidate};

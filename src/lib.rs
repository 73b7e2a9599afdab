//! # PsyReco
//!
//! Book recommendations that take the reader's mood into account.
//!
//! A free-text description of how someone feels is turned into
//! `{emotion, mindset, interest_tags}` by a language model. The interest
//! tags are embedded and matched against book summaries; the closest
//! candidates are then reranked by
//!
//! ```text
//! 0.7 * (1 - distance) + 0.3 * jaccard(interest_tags, book emotion + mindset tags)
//! ```
//!
//! deduplicated by title and author, and cut to the top N.
//!
//! ## Quick Start
//!
//! ### As a Server
//!
//! ```bash
//! export MISTRAL_API_KEY=...
//! psyreco --catalog data/books.json --http-port 8080
//! curl -X POST localhost:8080/recommend -H 'content-type: application/json' \
//!      -d '{"text": "burned out and anxious about my career"}'
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use psyreco::prelude::*;
//! use std::sync::Arc;
//!
//! let embedder = Arc::new(HashEmbedder::new());
//! let collection = Arc::new(BookCollection::new(CollectionConfig {
//!     vector_dim: embedder.dim(),
//!     ..Default::default()
//! }));
//! collection
//!     .insert_books(
//!         vec![Book::new("1", "Quiet", "Susan Cain")
//!             .with_summary("the power of introverts")
//!             .with_mindset_tags(["introspective"])],
//!         embedder.as_ref(),
//!     )
//!     .unwrap();
//!
//! let recommender =
//!     Recommender::new(embedder, collection, RecommendConfig::default()).unwrap();
//! let recs = recommender.recommend_default(&["introspective"]).unwrap();
//! assert_eq!(recs.items()[0].title, "Quiet");
//! ```
//!
//! ## Crate Structure
//!
//! - `psyreco-core` - Books, candidates, vectors, the in-memory collection
//! - `psyreco-similarity` - Similarity functions, reranker, recommender
//! - `psyreco-mood` - Mood extraction client and payload parsing
//! - `psyreco-api` - REST API

pub use psyreco_core::{
    Book, BookCollection, CandidateItem, CandidateSource, CollectionConfig, Distance, Error,
    Result, TextEmbedder, Vector,
};

pub use psyreco_similarity::{
    jaccard_similarity, rank, semantic_score, ExplainedRecommendation, HashEmbedder, Pool,
    RankError, RankWeights, RecommendConfig, RecommendationStats, Recommendations, Recommender,
    Reranker, ScoredCandidate,
};

pub use psyreco_mood::{
    parse_mood_content, AnalyzerConfig, MistralAnalyzer, MoodError, MoodExtraction,
    MoodExtractor, MoodProfile,
};

pub use psyreco_api::{AppState, RestApi};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        AnalyzerConfig, Book, BookCollection, CandidateItem, CandidateSource, CollectionConfig,
        Distance, HashEmbedder, MistralAnalyzer, MoodExtraction, MoodExtractor, MoodProfile,
        RankWeights, RecommendConfig, Recommendations, Recommender, Reranker, TextEmbedder,
        Vector,
    };
}

//! # PsyReco Core
//!
//! Core data structures for the PsyReco book recommender.
//!
//! - [`Vector`] - Dense embedding vector
//! - [`Book`] - A catalog record with emotion and mindset tags
//! - [`CandidateItem`] - A book paired with its distance to a query
//! - [`BookCollection`] - In-memory index answering nearest-neighbor queries
//! - [`TextEmbedder`] / [`CandidateSource`] - Seams the recommender is built on
//!
//! ## Example
//!
//! ```rust
//! use psyreco_core::{Book, BookCollection, CollectionConfig, Distance, Vector};
//!
//! let collection = BookCollection::new(CollectionConfig {
//!     name: "books".to_string(),
//!     vector_dim: 3,
//!     distance: Distance::Cosine,
//! });
//!
//! let book = Book::new("1", "Man's Search for Meaning", "Viktor Frankl")
//!     .with_emotion_tags(["hope"]);
//! collection.upsert(book, Vector::new(vec![1.0, 0.0, 0.0])).unwrap();
//!
//! let pool = collection.search(&Vector::new(vec![1.0, 0.0, 0.0]), 10).unwrap();
//! assert_eq!(pool[0].title, "Man's Search for Meaning");
//! ```

pub mod book;
pub mod collection;
pub mod error;
pub mod source;
pub mod vector;

pub use book::{Book, CandidateItem};
pub use collection::{BookCollection, CollectionConfig, Distance};
pub use error::{Error, Result};
pub use source::{CandidateSource, TextEmbedder};
pub use vector::Vector;

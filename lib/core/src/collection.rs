use crate::{Book, CandidateItem, CandidateSource, Error, Result, TextEmbedder, Vector};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

/// Configuration for a book collection
#[derive(Debug, Clone)]
pub struct CollectionConfig {
    pub name: String,
    pub vector_dim: usize,
    pub distance: Distance,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            name: "books".to_string(),
            vector_dim: 256,
            distance: Distance::Cosine,
        }
    }
}

/// Distance metric reported with every candidate. Smaller is closer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distance {
    /// `1 - cosine`, in [0, 2]
    #[default]
    Cosine,
    /// Euclidean distance, unbounded
    Euclidean,
    /// `1 - dot`, meaningful for unit vectors
    Dot,
}

impl Distance {
    #[inline]
    pub fn between(self, a: &Vector, b: &Vector) -> f32 {
        match self {
            Distance::Cosine => 1.0 - a.cosine_similarity(b),
            Distance::Euclidean => a.l2_distance(b),
            Distance::Dot => 1.0 - a.dot(b),
        }
    }
}

impl FromStr for Distance {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cosine" => Ok(Distance::Cosine),
            "euclidean" | "l2" => Ok(Distance::Euclidean),
            "dot" => Ok(Distance::Dot),
            other => Err(Error::InvalidConfig(format!("unknown distance metric '{}'", other))),
        }
    }
}

struct Entry {
    book: Book,
    vector: Vector,
}

#[derive(Default)]
struct Inner {
    entries: Vec<Entry>,
    positions: HashMap<String, usize>,
}

/// In-memory book index with exact nearest-neighbor search
///
/// Entries keep insertion order, so candidates at equal distance come back
/// in the order they were added.
pub struct BookCollection {
    config: CollectionConfig,
    inner: RwLock<Inner>,
}

impl BookCollection {
    pub fn new(config: CollectionConfig) -> Self {
        Self {
            config,
            inner: RwLock::new(Inner::default()),
        }
    }

    /// Build a collection from a JSON catalog file, embedding each summary
    pub fn from_catalog<P: AsRef<Path>>(
        path: P,
        config: CollectionConfig,
        embedder: &dyn TextEmbedder,
    ) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)?;
        let books: Vec<Book> = serde_json::from_str(&raw)
            .map_err(|e| Error::Catalog(format!("{}: {}", path.display(), e)))?;

        let collection = Self::new(config);
        let count = collection.insert_books(books, embedder)?;
        info!("Loaded {} books from {}", count, path.display());
        Ok(collection)
    }

    /// Embed and insert books. Books without an id get their position in `books`.
    ///
    /// Ids must be unique within `books` and must not already be in the
    /// collection; a clash fails the whole batch before anything is inserted.
    pub fn insert_books(&self, mut books: Vec<Book>, embedder: &dyn TextEmbedder) -> Result<usize> {
        if embedder.dim() != self.config.vector_dim {
            return Err(Error::InvalidConfig(format!(
                "embedder produces {}-dim vectors but collection '{}' expects {}",
                embedder.dim(),
                self.config.name,
                self.config.vector_dim
            )));
        }

        for (row, book) in books.iter_mut().enumerate() {
            if book.id.is_empty() {
                book.id = row.to_string();
            }
        }
        self.check_new_ids(&books)?;

        let count = books.len();
        for book in books {
            let text = if book.summary.trim().is_empty() {
                book.title.as_str()
            } else {
                book.summary.as_str()
            };
            let vector = embedder.embed(text);
            self.upsert(book, vector)?;
        }
        Ok(count)
    }

    fn check_new_ids(&self, books: &[Book]) -> Result<()> {
        let inner = self.inner.read();
        let mut seen = HashSet::with_capacity(books.len());
        for book in books {
            if inner.positions.contains_key(&book.id) || !seen.insert(book.id.as_str()) {
                return Err(Error::Catalog(format!(
                    "duplicate book id '{}' ({} by {})",
                    book.id, book.title, book.author
                )));
            }
        }
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn vector_dim(&self) -> usize {
        self.config.vector_dim
    }

    pub fn distance(&self) -> Distance {
        self.config.distance
    }

    pub fn count(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Insert a book or replace the one with the same id in place
    pub fn upsert(&self, book: Book, vector: Vector) -> Result<()> {
        if vector.dim() != self.config.vector_dim {
            return Err(Error::InvalidDimension {
                expected: self.config.vector_dim,
                actual: vector.dim(),
            });
        }

        let mut inner = self.inner.write();
        let existing = inner.positions.get(&book.id).copied();
        match existing {
            Some(pos) => {
                debug!("Replacing book {}", book.id);
                inner.entries[pos] = Entry { book, vector };
            }
            None => {
                let pos = inner.entries.len();
                inner.positions.insert(book.id.clone(), pos);
                inner.entries.push(Entry { book, vector });
            }
        }
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Book> {
        let inner = self.inner.read();
        inner
            .positions
            .get(id)
            .map(|&pos| inner.entries[pos].book.clone())
    }

    /// Exact search: the `limit` closest books, distance ascending
    pub fn search(&self, query: &Vector, limit: usize) -> Result<Vec<CandidateItem>> {
        if query.dim() != self.config.vector_dim {
            return Err(Error::InvalidDimension {
                expected: self.config.vector_dim,
                actual: query.dim(),
            });
        }

        let inner = self.inner.read();
        let metric = self.config.distance;
        let mut scored: Vec<(usize, f32)> = inner
            .entries
            .par_iter()
            .enumerate()
            .map(|(pos, entry)| (pos, metric.between(query, &entry.vector)))
            .collect();

        // stable: equal distances stay in insertion order
        scored.sort_by(|a, b| a.1.total_cmp(&b.1));
        scored.truncate(limit);

        Ok(scored
            .into_iter()
            .map(|(pos, distance)| inner.entries[pos].book.clone().into_candidate(distance))
            .collect())
    }
}

impl CandidateSource for BookCollection {
    fn query(&self, vector: &Vector, k: usize) -> Result<Vec<CandidateItem>> {
        self.search(vector, k)
    }
}

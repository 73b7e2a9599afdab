//! Similarity primitives used by the reranker
//!
//! Both scoring functions are pure and total over finite inputs.

use ahash::AHashSet;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Convert an embedding distance to a similarity: `1 - distance`
///
/// Not clamped. Distances above 1 produce negative similarity and that
/// value flows into the weighted score unchanged.
#[inline]
pub fn semantic_score(distance: f32) -> f32 {
    1.0 - distance
}

/// Jaccard index of two tag lists
///
/// Tags are compared as exact, case-sensitive strings. Two empty lists
/// score 0.0: an untagged book never counts as a mood match.
pub fn jaccard_similarity<A, B>(a: &[A], b: &[B]) -> f32
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let set_a: AHashSet<&str> = a.iter().map(AsRef::as_ref).collect();
    let set_b: AHashSet<&str> = b.iter().map(AsRef::as_ref).collect();
    jaccard_sets(&set_a, &set_b)
}

/// Jaccard index of two prepared tag sets
pub fn jaccard_sets(a: &AHashSet<&str>, b: &AHashSet<&str>) -> f32 {
    if a.is_empty() && b.is_empty() {
        return 0.0;
    }

    let intersection = a.intersection(b).count();
    let union = a.len() + b.len() - intersection;
    intersection as f32 / union as f32
}

/// Hash text into a unit vector of length `dim`
///
/// Character trigrams and whole words are hashed into buckets; words weigh
/// twice as much. Deterministic for a given input and dimension.
pub fn hash_text_to_vector(text: &str, dim: usize) -> Vec<f32> {
    let mut vector = vec![0.0f32; dim];
    if dim == 0 {
        return vector;
    }

    let normalized = text.to_lowercase();

    for trigram in generate_trigrams(&normalized) {
        vector[bucket(&trigram, dim)] += 1.0;
    }

    for word in normalized.split_whitespace() {
        vector[bucket(word, dim)] += 2.0;
    }

    let magnitude: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if magnitude > 0.0 {
        for v in &mut vector {
            *v /= magnitude;
        }
    }

    vector
}

fn bucket(feature: &str, dim: usize) -> usize {
    let mut hasher = DefaultHasher::new();
    feature.hash(&mut hasher);
    (hasher.finish() % dim as u64) as usize
}

/// Character trigrams of each word, padded with spaces
fn generate_trigrams(s: &str) -> AHashSet<String> {
    let mut trigrams = AHashSet::new();
    for word in s.split_whitespace() {
        let chars: Vec<char> = format!(" {} ", word).chars().collect();
        for window in chars.windows(3) {
            trigrams.insert(window.iter().collect());
        }
    }
    trigrams
}

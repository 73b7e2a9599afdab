//! Explainability for recommendations
//!
//! Serializable views of ranked results that expose the score breakdown.

use crate::recommend::Recommendations;
use crate::rerank::ScoredCandidate;
use serde::Serialize;

/// A recommendation with its score components
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ExplainedRecommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub id: String,
    pub title: String,
    pub author: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    pub distance: f32,
    pub semantic_score: f32,
    pub mood_score: f32,
    /// Weighted score used for ranking
    pub score: f32,
}

impl ExplainedRecommendation {
    pub fn from_scored(rank: usize, scored: &ScoredCandidate) -> Self {
        let item = &scored.item;
        Self {
            rank,
            id: item.id.clone(),
            title: item.title.clone(),
            author: item.author.clone(),
            summary: item.summary.clone(),
            genre: item.genre.clone(),
            distance: item.distance,
            semantic_score: scored.semantic_score,
            mood_score: scored.mood_score,
            score: scored.weighted_score,
        }
    }

    pub fn from_recommendations(recs: &Recommendations) -> Vec<Self> {
        recs.scored()
            .iter()
            .enumerate()
            .map(|(i, scored)| Self::from_scored(i + 1, scored))
            .collect()
    }
}

/// Summary statistics for a recommendation request
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RecommendationStats {
    /// Number of candidates reranked
    pub candidates_count: usize,
    /// Number of results returned
    pub results_count: usize,
    /// Average weighted score of results
    pub avg_score: f32,
    /// Weighted score of the best result
    pub best_score: f32,
    /// Whether the candidate source failed for this request
    pub source_unavailable: bool,
}

impl RecommendationStats {
    pub fn from_recommendations(recs: &Recommendations) -> Self {
        let scores: Vec<f32> = recs.scored().iter().map(|r| r.weighted_score).collect();
        let avg_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f32>() / scores.len() as f32
        };

        Self {
            candidates_count: recs.candidates_considered(),
            results_count: scores.len(),
            avg_score,
            best_score: scores.first().copied().unwrap_or(0.0),
            source_unavailable: recs.source_unavailable(),
        }
    }
}

use serde::{Deserialize, Serialize};

/// A catalog record for one book
///
/// Tag lists default to empty when absent from the catalog, so a record
/// with missing tags still scores (with an empty tag set) instead of
/// failing the whole load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    /// Index-local identifier. Filled with the row index when the catalog omits it.
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub emotion_tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mindset_tags: Vec<String>,
}

impl Book {
    pub fn new(id: impl Into<String>, title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            author: author.into(),
            summary: String::new(),
            genre: None,
            emotion_tags: Vec::new(),
            mindset_tags: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    #[must_use]
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.genre = Some(genre.into());
        self
    }

    #[must_use]
    pub fn with_emotion_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.emotion_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_mindset_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mindset_tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Pair this book with its distance to a query vector
    pub fn into_candidate(self, distance: f32) -> CandidateItem {
        CandidateItem {
            id: self.id,
            title: self.title,
            author: self.author,
            summary: self.summary,
            genre: self.genre,
            emotion_tags: self.emotion_tags,
            mindset_tags: self.mindset_tags,
            distance,
        }
    }
}

/// One entry of a candidate pool, as returned by a [`crate::CandidateSource`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateItem {
    pub id: String,
    pub title: String,
    pub author: String,
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default)]
    pub emotion_tags: Vec<String>,
    #[serde(default)]
    pub mindset_tags: Vec<String>,
    /// Embedding distance to the query; smaller is closer
    pub distance: f32,
}

impl CandidateItem {
    /// Identity used to collapse duplicate editions of the same book
    #[inline]
    pub fn dedup_key(&self) -> (&str, &str) {
        (self.title.as_str(), self.author.as_str())
    }

    /// Emotion and mindset tags, in that order
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.emotion_tags
            .iter()
            .chain(self.mindset_tags.iter())
            .map(String::as_str)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

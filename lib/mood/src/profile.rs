//! Mood profile record
//!
//! Language models are loose about shapes, so deserialization accepts
//! `null`, blank strings, a bare string where a list is expected and a
//! list where a string is expected. Whatever arrives, all three fields
//! come out populated.

use serde::de::IgnoredAny;
use serde::{Deserialize, Deserializer, Serialize};

/// Structured reading of a user's state
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MoodProfile {
    /// Dominant emotion
    #[serde(default, deserialize_with = "loose_text")]
    pub emotion: Option<String>,
    /// Short description of the current outlook
    #[serde(default, deserialize_with = "loose_text")]
    pub mindset: Option<String>,
    /// Topical tags (genres, themes)
    #[serde(default, deserialize_with = "loose_tags")]
    pub interest_tags: Vec<String>,
}

impl MoodProfile {
    pub fn new<I, S>(emotion: Option<&str>, mindset: Option<&str>, interest_tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            emotion: emotion.map(str::to_string),
            mindset: mindset.map(str::to_string),
            interest_tags: interest_tags.into_iter().map(Into::into).collect(),
        }
    }

    /// Profile carrying `text` as its only interest tag
    pub fn from_text(text: &str) -> Self {
        Self {
            emotion: None,
            mindset: None,
            interest_tags: vec![text.to_string()],
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Loose {
    Text(String),
    List(Vec<String>),
    Other(IgnoredAny),
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn loose_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => non_blank(&s),
        Loose::List(items) => items.iter().find_map(|s| non_blank(s)),
        Loose::Other(_) => None,
    })
}

fn loose_tags<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Loose::deserialize(deserializer)? {
        Loose::Text(s) => s.split(',').filter_map(non_blank).collect(),
        Loose::List(items) => items.iter().filter_map(|s| non_blank(s)).collect(),
        Loose::Other(_) => Vec::new(),
    })
}

//! # PsyReco Mood
//!
//! Mood extraction from free text.
//!
//! [`MistralAnalyzer`] asks a chat-completion model for
//! `{emotion, mindset, interest_tags}` and reads the reply with
//! [`parse_mood_content`]. The outcome is a [`MoodExtraction`] naming the
//! branch taken; callers that only need tags use
//! [`MoodExtraction::into_profile`].
//!
//! ```rust
//! use psyreco_mood::{parse_mood_content, MoodExtraction};
//!
//! let reply = r#"Here you go: {"emotion": "anxious", "interest_tags": ["calm"]}"#;
//! let extraction = parse_mood_content(reply).unwrap();
//! assert!(matches!(extraction, MoodExtraction::Embedded(_)));
//! assert_eq!(extraction.profile().interest_tags, vec!["calm"]);
//! ```

pub mod client;
pub mod error;
pub mod parse;
pub mod profile;

pub use client::{
    AnalyzerConfig, MistralAnalyzer, MoodExtractor, DEFAULT_MAX_TOKENS, DEFAULT_MODEL,
    DEFAULT_TEMPERATURE, DEFAULT_TIMEOUT_SECS, MISTRAL_BASE_URL,
};
pub use error::MoodError;
pub use parse::{parse_mood_content, MoodExtraction};
pub use profile::MoodProfile;

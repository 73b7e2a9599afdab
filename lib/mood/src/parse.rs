//! Mood payload parsing
//!
//! The model is asked for a JSON object but may wrap it in prose or a code
//! fence, or answer in plain sentences. Each way of reading the reply is a
//! named [`MoodExtraction`] variant.

use crate::error::MoodError;
use crate::profile::MoodProfile;

/// How a mood profile was obtained
#[derive(Debug, Clone, PartialEq)]
pub enum MoodExtraction {
    /// The whole reply was the JSON object
    Direct(MoodProfile),
    /// A JSON object was cut out of surrounding text
    Embedded(MoodProfile),
    /// The reply had no braces; its text is the only interest tag
    PlainText(MoodProfile),
    /// Upstream failed; the user's input is the only interest tag
    Fallback { profile: MoodProfile, reason: MoodError },
}

impl MoodExtraction {
    /// Fall back to `input` as the sole interest tag
    pub fn fallback(input: &str, reason: MoodError) -> Self {
        MoodExtraction::Fallback {
            profile: MoodProfile::from_text(input),
            reason,
        }
    }

    pub fn profile(&self) -> &MoodProfile {
        match self {
            MoodExtraction::Direct(p) | MoodExtraction::Embedded(p) | MoodExtraction::PlainText(p) => p,
            MoodExtraction::Fallback { profile, .. } => profile,
        }
    }

    pub fn into_profile(self) -> MoodProfile {
        match self {
            MoodExtraction::Direct(p) | MoodExtraction::Embedded(p) | MoodExtraction::PlainText(p) => p,
            MoodExtraction::Fallback { profile, .. } => profile,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, MoodExtraction::Fallback { .. })
    }

    /// Short branch name, for logs and API responses
    pub fn kind(&self) -> &'static str {
        match self {
            MoodExtraction::Direct(_) => "direct",
            MoodExtraction::Embedded(_) => "embedded",
            MoodExtraction::PlainText(_) => "plain_text",
            MoodExtraction::Fallback { .. } => "fallback",
        }
    }
}

/// Read a mood profile out of a model reply
///
/// Tried in order: the whole reply as a JSON object, then the span from
/// the first `{` to the last `}`, then (only when the reply has no braces
/// at all) the trimmed reply as a single tag. A brace span that does not parse is
/// an error so the caller can fall back to the user's own words.
pub fn parse_mood_content(content: &str) -> Result<MoodExtraction, MoodError> {
    let trimmed = content.trim();
    if trimmed.is_empty() {
        return Err(MoodError::EmptyContent);
    }

    // serde would also read a JSON array positionally into the struct
    if trimmed.starts_with('{') {
        if let Ok(profile) = serde_json::from_str::<MoodProfile>(trimmed) {
            return Ok(MoodExtraction::Direct(profile));
        }
    }

    match (trimmed.find('{'), trimmed.rfind('}')) {
        (Some(start), Some(end)) if start < end => {
            serde_json::from_str::<MoodProfile>(&trimmed[start..=end])
                .map(MoodExtraction::Embedded)
                .map_err(|e| MoodError::MalformedPayload(e.to_string()))
        }
        (None, None) => Ok(MoodExtraction::PlainText(MoodProfile::from_text(trimmed))),
        _ => Err(MoodError::MalformedPayload("unbalanced braces".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direct_json() {
        let extraction = parse_mood_content(
            r#"{"emotion": "sad", "mindset": "reflective", "interest_tags": ["poetry"]}"#,
        )
        .unwrap();
        assert_eq!(extraction.kind(), "direct");
        assert_eq!(extraction.profile().emotion.as_deref(), Some("sad"));
    }

    #[test]
    fn test_json_inside_prose() {
        let content = "Sure! Here is the analysis:\n```json\n{\"emotion\": \"burned out\", \"mindset\": \"seeking clarity\", \"interest_tags\": [\"career\", \"calm\"]}\n```\nHope this helps.";
        let extraction = parse_mood_content(content).unwrap();
        assert!(matches!(extraction, MoodExtraction::Embedded(_)));
        assert_eq!(extraction.into_profile().interest_tags, vec!["career", "calm"]);
    }

    #[test]
    fn test_plain_prose_becomes_single_tag() {
        let extraction = parse_mood_content("I think you'd enjoy mystery novels").unwrap();
        assert_eq!(
            extraction,
            MoodExtraction::PlainText(MoodProfile::from_text("I think you'd enjoy mystery novels"))
        );
        assert!(extraction.profile().emotion.is_none());
        assert!(extraction.profile().mindset.is_none());
    }

    #[test]
    fn test_broken_json_span_is_malformed() {
        let err = parse_mood_content("Result: {emotion: sad, tags: [x]}").unwrap_err();
        assert!(matches!(err, MoodError::MalformedPayload(_)));
    }

    #[test]
    fn test_unbalanced_braces_are_malformed() {
        assert!(matches!(
            parse_mood_content("} backwards {"),
            Err(MoodError::MalformedPayload(_))
        ));
        assert!(matches!(
            parse_mood_content("only an opening { here"),
            Err(MoodError::MalformedPayload(_))
        ));
    }

    #[test]
    fn test_empty_content() {
        assert_eq!(parse_mood_content("  \n "), Err(MoodError::EmptyContent));
    }

    #[test]
    fn test_fallback_uses_input() {
        let extraction = MoodExtraction::fallback("tired of everything", MoodError::MissingContent);
        assert!(extraction.is_fallback());
        assert_eq!(extraction.kind(), "fallback");
        assert_eq!(extraction.into_profile(), MoodProfile::from_text("tired of everything"));
    }

    #[test]
    fn test_json_array_reply_is_plain_text() {
        let extraction = parse_mood_content(r#"["mystery", "thriller"]"#).unwrap();
        assert_eq!(
            extraction,
            MoodExtraction::PlainText(MoodProfile::from_text(r#"["mystery", "thriller"]"#))
        );
        assert!(extraction.profile().emotion.is_none());
    }

    #[test]
    fn test_object_inside_array_is_embedded() {
        let extraction =
            parse_mood_content(r#"[{"emotion": "calm", "interest_tags": ["poetry"]}]"#).unwrap();
        assert_eq!(extraction.kind(), "embedded");
        assert_eq!(extraction.profile().interest_tags, vec!["poetry"]);
    }
}

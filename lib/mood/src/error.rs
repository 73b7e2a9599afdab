use thiserror::Error;

/// Why a mood extraction fell back to the raw input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MoodError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Response has no message content")]
    MissingContent,

    #[error("Response content is empty")]
    EmptyContent,

    #[error("Malformed mood payload: {0}")]
    MalformedPayload(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

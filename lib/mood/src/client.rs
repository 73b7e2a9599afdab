//! Chat-completion mood analyzer
//!
//! Sends the user's text to a Mistral-compatible `/chat/completions`
//! endpoint and parses the reply into a [`MoodProfile`]. It never returns
//! an error: every failure becomes [`MoodExtraction::Fallback`] with the
//! user's text as the only interest tag.

use crate::error::MoodError;
use crate::parse::{parse_mood_content, MoodExtraction};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Default API base URL (includes the /v1 prefix)
pub const MISTRAL_BASE_URL: &str = "https://api.mistral.ai/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "mistral-tiny";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

pub const DEFAULT_MAX_TOKENS: u32 = 150;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Turns free text into a mood profile
pub trait MoodExtractor: Send + Sync {
    fn analyze(&self, text: &str) -> impl Future<Output = MoodExtraction> + Send;
}

/// Settings for [`MistralAnalyzer`]
#[derive(Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Without a key the analyzer falls back immediately, no request is made
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    MISTRAL_BASE_URL.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            model: default_model(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for AnalyzerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalyzerConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Mood analyzer backed by a chat-completion API
#[derive(Debug, Clone)]
pub struct MistralAnalyzer {
    client: Client,
    config: AnalyzerConfig,
}

impl MistralAnalyzer {
    pub fn new(config: AnalyzerConfig) -> Result<Self, MoodError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MoodError::Config(format!("Failed to build HTTP client: {}", e)))?;

        debug!(model = %config.model, base_url = %config.base_url, "Created mood analyzer");
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    /// Ask the model and return the raw message content
    pub async fn complete(&self, text: &str) -> Result<String, MoodError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(MoodError::MissingApiKey)?;

        let prompt = build_prompt(text);
        let request = ChatRequest {
            model: &self.config.model,
            messages: [ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| MoodError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| MoodError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(MoodError::Status {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(&body)
    }

    /// Analyze `text`, falling back to it as the only tag on any failure
    pub async fn analyze(&self, text: &str) -> MoodExtraction {
        let extraction = match self.complete(text).await {
            Ok(content) => parse_mood_content(&content)
                .unwrap_or_else(|reason| MoodExtraction::fallback(text, reason)),
            Err(reason) => MoodExtraction::fallback(text, reason),
        };

        if let MoodExtraction::Fallback { reason, .. } = &extraction {
            warn!("Mood analysis fell back to raw input: {}", reason);
        } else {
            debug!(branch = extraction.kind(), "Mood analysis parsed");
        }
        extraction
    }
}

impl MoodExtractor for MistralAnalyzer {
    async fn analyze(&self, text: &str) -> MoodExtraction {
        MistralAnalyzer::analyze(self, text).await
    }
}

fn build_prompt(text: &str) -> String {
    format!(
        r#"Analyze the psychological state of this user input: "{}"
and return a valid JSON object with the following keys:
- emotion: main emotion
- mindset: current mindset or outlook
- interest_tags: list of interest-based tags (genres, topics, etc.)

Respond with JSON only."#,
        text
    )
}

/// Pull the first choice's message content out of a chat-completion body
fn extract_content(body: &str) -> Result<String, MoodError> {
    let response: ChatResponse =
        serde_json::from_str(body).map_err(|e| MoodError::MalformedPayload(e.to_string()))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or(MoodError::MissingContent)
}

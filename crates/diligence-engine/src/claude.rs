//! Anthropic messages API client.
//!
//! One request per procedure invocation: the profile instructions and
//! output schema go in the system prompt, the transcript (or evidence
//! dossier) is the single user message. The model's reply is expected to
//! contain one JSON object, which is pulled out of any surrounding prose
//! or code fences before being returned.

use async_trait::async_trait;
use diligence_core::{AnalysisProfile, BackendError};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::backend::LanguageBackend;

const ANTHROPIC_API_URL: &str = "https://api.anthropic.com/v1/messages";
const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const MAX_TOKENS: u32 = 1024;

pub struct ClaudeBackend {
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl ClaudeBackend {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("reqwest client"),
        }
    }

    /// Read `ANTHROPIC_API_KEY` from the environment.
    pub fn from_env() -> Result<Self, BackendError> {
        let api_key = std::env::var("ANTHROPIC_API_KEY")
            .map_err(|_| BackendError::NotConfigured("language"))?;
        if api_key.is_empty() {
            return Err(BackendError::NotConfigured("language"));
        }
        Ok(Self::new(api_key))
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: String,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl LanguageBackend for ClaudeBackend {
    async fn complete(
        &self,
        profile: &AnalysisProfile,
        input: &str,
    ) -> Result<Value, BackendError> {
        if self.api_key.is_empty() {
            return Err(BackendError::NotConfigured("language"));
        }

        let system = format!(
            "{}\n\nRespond with a single JSON object conforming to this schema:\n{}",
            profile.instructions, profile.schema
        );
        let request = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system,
            messages: vec![Message {
                role: "user",
                content: input,
            }],
        };

        debug!(profile = profile.name, model = %self.model, "language backend request");

        let response = self
            .client
            .post(ANTHROPIC_API_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Unavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BackendError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        let text = parsed
            .content
            .first()
            .map(|c| c.text.as_str())
            .unwrap_or_default();

        extract_json(text).ok_or_else(|| {
            BackendError::Decode(format!("no JSON object in {} response", profile.name))
        })
    }
}

/// Pull the first JSON value out of a model reply that may wrap it in prose
/// or code fences.
fn extract_json(text: &str) -> Option<Value> {
    let start = text.find(['{', '['])?;
    let close = if text.as_bytes()[start] == b'{' { '}' } else { ']' };
    let end = text.rfind(close)?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

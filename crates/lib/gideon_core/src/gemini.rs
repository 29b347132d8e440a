//! Gemini `generateContent` client.
//!
//! Sends a single text prompt and extracts the text of the first part of the
//! first candidate. The response envelope is read defensively: a missing
//! candidate, content, part or text each resolve to the empty string.
//!
//! No retries. Network errors, timeouts, non-2xx statuses and undecodable
//! envelopes are returned as [`GeminiError`] for the caller to handle.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Default model used when none is configured.
pub const DEFAULT_MODEL: &str = "gemini-1.5-pro";
/// Default API base URL (without the `/models/...` suffix).
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default upstream request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Errors from the upstream call. All of them are transport-level; content
/// problems are handled by [`crate::normalize`].
#[derive(Debug, Error)]
pub enum GeminiError {
    #[error("Invalid Gemini endpoint: {0}")]
    Endpoint(String),

    #[error("Gemini request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("Gemini returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Gemini response parse error: {0}")]
    Decode(#[source] reqwest::Error),
}

/// Upstream connection settings.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key, sent as the `key` query parameter.
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Config with default model, base URL and timeout.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Builds a config from an optional credential.
    ///
    /// A missing or blank key yields `None`.
    pub fn from_api_key(api_key: Option<&str>) -> Option<Self> {
        api_key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(Self::new)
    }

    /// `{base_url}/models/{model}:generateContent`, without the key.
    pub fn endpoint(&self) -> Result<Url, GeminiError> {
        let base = self.base_url.trim_end_matches('/');
        let raw = format!("{base}/models/{}:generateContent", self.model);
        Url::parse(&raw).map_err(|e| GeminiError::Endpoint(format!("{raw}: {e}")))
    }
}

// Keep the key out of logs.
impl std::fmt::Debug for GeminiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single user turn carrying `prompt`.
    pub fn from_prompt(prompt: &str) -> Self {
        Self {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default, rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Lists may arrive as `null`; read that the same as a missing key.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate, or `""` if any level
    /// is missing.
    pub fn first_text(&self) -> &str {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .and_then(|content| content.parts.first())
            .and_then(|part| part.text.as_deref())
            .unwrap_or("")
    }
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// Reusable Gemini client. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    config: GeminiConfig,
    endpoint: Url,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, GeminiError> {
        let endpoint = config.endpoint()?;
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(GeminiError::Transport)?;
        Ok(Self {
            http,
            config,
            endpoint,
        })
    }

    /// Sends `prompt` and returns the raw text of the first candidate.
    pub async fn generate_text(&self, prompt: &str) -> Result<String, GeminiError> {
        debug!(
            endpoint = %self.endpoint,
            prompt_len = prompt.len(),
            "calling Gemini generateContent"
        );

        let resp = self
            .http
            .post(self.endpoint.clone())
            .query(&[("key", self.config.api_key.as_str())])
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await
            .map_err(|e| GeminiError::Transport(e.without_url()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp
                .text()
                .await
                .unwrap_or_else(|_| "<no body>".to_string());
            return Err(GeminiError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let data: GenerateContentResponse = resp
            .json()
            .await
            .map_err(|e| GeminiError::Decode(e.without_url()))?;

        debug!(
            candidates = data.candidates.len(),
            finish_reason = data
                .candidates
                .first()
                .and_then(|c| c.finish_reason.as_deref())
                .unwrap_or(""),
            "Gemini responded"
        );

        Ok(data.first_text().to_string())
    }
}

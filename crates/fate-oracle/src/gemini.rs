//! Minimal Gemini `generateContent` client.
//!
//! One request, one JSON reply, no streaming and no retries. The reply text
//! is returned verbatim for [`parse_reply`](crate::parse_reply) to validate.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::OracleConfig;
use crate::error::{OracleError, OracleResult};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

const MAX_ERROR_BODY_CHARS: usize = 512;

/// Client for a single Gemini model.
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    endpoint: String,
}

impl GeminiClient {
    /// Build a client from `config` using `api_key`.
    pub fn new(config: &OracleConfig, api_key: impl Into<String>) -> OracleResult<Self> {
        let http = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT.min(config.timeout))
            .timeout(config.timeout)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(OracleError::ClientBuild)?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            endpoint: format!("{}/models/{}:generateContent", config.base_url, config.model),
        })
    }

    /// The full URL requests are sent to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send `prompt` asking for a JSON reply and return the reply text.
    ///
    /// `Ok(None)` means the service answered but produced no text.
    pub async fn generate_json(&self, prompt: &str) -> OracleResult<Option<String>> {
        tracing::debug!(endpoint = %self.endpoint, "requesting fortune");
        let response = self
            .http
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(OracleError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        let reply: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(reply.text())
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

fn request_body(prompt: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [{ "text": prompt }]
        }],
        "generationConfig": {
            "responseMimeType": "application/json"
        }
    })
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Default, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, parts concatenated.
    fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

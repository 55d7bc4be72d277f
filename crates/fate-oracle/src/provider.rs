//! The fortune provider.

use fate_core::{DieKind, Fortune, FortuneRequest};

use crate::config::OracleConfig;
use crate::error::OracleResult;
use crate::gemini::GeminiClient;
use crate::prompt::build_prompt;
use crate::reply::{UNCLEAR_TEXT, parse_reply};

/// Shown when no credential is configured.
pub const UNAVAILABLE_TEXT: &str = "The stars are silent (API Key missing).";

/// Shown when the request or its reply failed.
pub const FALLBACK_TEXT: &str = "The mists of time obscure your fate.";

#[derive(Debug, Clone)]
enum Backend {
    /// No credential: answer locally, never touch the network.
    Offline,
    /// Credential present but the HTTP client could not be built.
    Broken,
    Remote(GeminiClient),
}

/// Produces a [`Fortune`] for a completed roll. Cheap to clone.
#[derive(Debug, Clone)]
pub struct FortuneProvider {
    backend: Backend,
}

impl FortuneProvider {
    /// Create a provider from configuration.
    pub fn new(config: &OracleConfig) -> Self {
        let Some(api_key) = config.api_key.as_deref() else {
            tracing::info!("no API key configured, fortunes will use the offline reply");
            return Self::offline();
        };
        let backend = match GeminiClient::new(config, api_key) {
            Ok(client) => {
                tracing::debug!(endpoint = client.endpoint(), "fortune client ready");
                Backend::Remote(client)
            }
            Err(e) => {
                tracing::error!(error = %e, "fortune client unavailable");
                Backend::Broken
            }
        };
        Self { backend }
    }

    /// A provider without a credential.
    pub fn offline() -> Self {
        Self {
            backend: Backend::Offline,
        }
    }

    /// Whether fortunes come from the remote service.
    pub fn is_online(&self) -> bool {
        matches!(self.backend, Backend::Remote(_))
    }

    /// Interpret a roll. Never fails; every failure yields a neutral fallback.
    ///
    /// Sends at most one request.
    pub async fn get_fortune(&self, value: u32, die: DieKind) -> Fortune {
        match &self.backend {
            Backend::Offline => Fortune::neutral(UNAVAILABLE_TEXT),
            Backend::Broken => Fortune::neutral(FALLBACK_TEXT),
            Backend::Remote(client) => match fetch(client, value, die).await {
                Ok(fortune) => fortune,
                Err(e) => {
                    tracing::warn!(error = %e, value, %die, "fortune request failed");
                    Fortune::neutral(FALLBACK_TEXT)
                }
            },
        }
    }

    /// Interpret the roll a session asked about.
    pub async fn fulfil(&self, request: &FortuneRequest) -> Fortune {
        self.get_fortune(request.value, request.die).await
    }
}

async fn fetch(client: &GeminiClient, value: u32, die: DieKind) -> OracleResult<Fortune> {
    let prompt = build_prompt(value, die);
    match client.generate_json(&prompt).await? {
        Some(text) => parse_reply(&text),
        None => {
            tracing::debug!("empty fortune reply");
            Ok(Fortune::neutral(UNCLEAR_TEXT))
        }
    }
}

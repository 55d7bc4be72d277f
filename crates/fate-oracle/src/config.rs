//! Configuration for the fortune provider.

use std::time::Duration;

/// Model asked for fortunes unless overridden.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Gemini REST base URL.
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Upper bound on one fortune request, connect through body.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(20);

/// Environment variables checked for the credential, in order.
pub const API_KEY_VARS: [&str; 2] = ["API_KEY", "GEMINI_API_KEY"];

/// Environment variable overriding the model.
pub const MODEL_VAR: &str = "FATE_MODEL";

/// Environment variable overriding the API base URL.
pub const API_BASE_VAR: &str = "FATE_API_BASE";

/// Configuration for a [`FortuneProvider`](crate::FortuneProvider).
#[derive(Clone)]
pub struct OracleConfig {
    /// Credential for the text-generation service. `None` disables remote calls.
    pub api_key: Option<String>,
    /// Model name.
    pub model: String,
    /// Base URL, without trailing slash.
    pub base_url: String,
    /// Whole-request timeout.
    pub timeout: Duration,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_API_BASE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OracleConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(key) = API_KEY_VARS.iter().find_map(|name| non_empty(lookup(name))) {
            config.api_key = Some(key);
        }
        if let Some(model) = non_empty(lookup(MODEL_VAR)) {
            config = config.with_model(model);
        }
        if let Some(base) = non_empty(lookup(API_BASE_VAR)) {
            config = config.with_base_url(base);
        }
        config
    }

    /// Set the credential. Blank keys count as absent.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = non_empty(Some(key.into()));
        self
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the base URL. A trailing slash is dropped.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for OracleConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OracleConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

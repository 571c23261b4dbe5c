//! Gateway configuration.

use serde::{Deserialize, Serialize};

/// OpenRouter API root.
pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";

/// Model used for script generation.
pub const DEFAULT_MODEL: &str = "openai/gpt-oss-20b";

/// Title reported to the gateway for attribution.
pub const DEFAULT_APP_TITLE: &str = "Vibe Script Creator";

/// Settings for calls to the generation gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// API root, without trailing slash.
    pub base_url: String,

    /// Model identifier.
    pub model: String,

    /// Sampling temperature.
    pub temperature: f32,

    /// Completion token limit.
    pub max_tokens: u32,

    /// Sent as `X-Title`.
    pub app_title: String,

    /// Sent as `HTTP-Referer` when set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referer: Option<String>,

    /// Whole-request timeout in seconds, enforced by the transport.
    pub timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            app_title: DEFAULT_APP_TITLE.to_string(),
            referer: None,
            timeout_secs: 120,
        }
    }
}

impl GatewayConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Builder: Set model.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Builder: Set temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Builder: Set max tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Builder: Set referer.
    pub fn with_referer(mut self, referer: impl Into<String>) -> Self {
        self.referer = Some(referer.into());
        self
    }

    /// Builder: Set timeout.
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Chat completions endpoint.
    pub fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Key validation endpoint.
    pub fn auth_key_url(&self) -> String {
        format!("{}/auth/key", self.base_url)
    }
}

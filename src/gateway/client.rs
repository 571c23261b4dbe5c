//! HTTP client for the OpenRouter chat completions API

use std::time::Duration;

use reqwest::{header, Client, Response};
use serde::{Deserialize, Serialize};

use crate::config::GatewayConfig;
use crate::error::{ScriptError, ScriptResult};
use crate::generation::{CompletionRequest, CompletionTransport};

/// Chat message in the request body
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// POST /chat/completions request body
#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

/// POST /chat/completions response, only the parts we read
#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    #[serde(default)]
    message: Option<ChatReply>,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Key details from GET /auth/key
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KeyInfo {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub usage: Option<f64>,
    #[serde(default)]
    pub limit: Option<f64>,
    #[serde(default)]
    pub is_free_tier: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct KeyInfoResponse {
    #[serde(default)]
    data: KeyInfo,
}

/// API client for the generation gateway
pub struct OpenRouterClient {
    client: Client,
    config: GatewayConfig,
}

impl OpenRouterClient {
    /// Create a new client. The API key is sent per request, not stored here.
    pub fn new(config: GatewayConfig) -> ScriptResult<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            "X-Title",
            header::HeaderValue::from_str(&config.app_title)
                .map_err(|e| ScriptError::transport(format!("invalid header value: {}", e)))?,
        );
        if let Some(ref referer) = config.referer {
            headers.insert(
                "HTTP-Referer",
                header::HeaderValue::from_str(referer)
                    .map_err(|e| ScriptError::transport(format!("invalid header value: {}", e)))?,
            );
        }

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(transport_error)?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// POST /chat/completions - Returns the first choice's message content
    pub async fn chat_completion(
        &self,
        api_key: &str,
        request: &CompletionRequest,
    ) -> ScriptResult<String> {
        let body = ChatRequest {
            model: &request.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.prompt,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        let resp = self
            .client
            .post(self.config.completions_url())
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(transport_error)?;
        let resp = check_status(resp).await?;

        let parsed: ChatResponse = resp.json().await.map_err(transport_error)?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or(ScriptError::EmptyCompletion)
    }

    /// GET /auth/key - Checks that a key is accepted
    pub async fn validate_key(&self, api_key: &str) -> ScriptResult<KeyInfo> {
        let resp = self
            .client
            .get(self.config.auth_key_url())
            .bearer_auth(api_key.trim())
            .send()
            .await
            .map_err(transport_error)?;
        let resp = check_status(resp).await?;

        let parsed: KeyInfoResponse = resp.json().await.map_err(transport_error)?;
        Ok(parsed.data)
    }
}

impl CompletionTransport for OpenRouterClient {
    async fn complete(&self, api_key: &str, request: &CompletionRequest) -> ScriptResult<String> {
        self.chat_completion(api_key, request).await
    }
}

fn transport_error(err: reqwest::Error) -> ScriptError {
    if err.is_timeout() {
        ScriptError::transport(format!("request timed out: {}", err))
    } else {
        ScriptError::transport(err.to_string())
    }
}

/// Non-success statuses become `UpstreamRejected` with the reason phrase.
async fn check_status(resp: Response) -> ScriptResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::debug!(status = status.as_u16(), %body, "gateway rejected request");
    let reason = status.canonical_reason().unwrap_or("Unknown Status");
    Err(ScriptError::upstream_rejected(status.as_u16(), reason))
}

//! Generation orchestrator.
//!
//! Checks prerequisites, dispatches one call through a
//! [`CompletionTransport`], and classifies the reply. Nothing is dispatched
//! unless a credential is stored.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::GatewayConfig;
use crate::error::{ScriptError, ScriptResult};
use crate::store::TextStore;

use super::assemble::GenerationPayload;
use super::model::{GenerationRequest, GenerationResult};
use super::prompt::{build_prompt, SYSTEM_PROMPT};

/// One chat completion call, independent of the wire format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Something that turns a completion request into assistant text.
///
/// Implementations map network failures to [`ScriptError::Transport`] and
/// non-success statuses to [`ScriptError::UpstreamRejected`]. No retries.
#[allow(async_fn_in_trait)]
pub trait CompletionTransport {
    /// Sends the request; returns the assistant message content.
    async fn complete(&self, api_key: &str, request: &CompletionRequest) -> ScriptResult<String>;
}

/// Marks a generation as outstanding for its lifetime.
#[derive(Debug)]
struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> ScriptResult<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| ScriptError::GenerationInFlight)?;
        Ok(Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Runs generation calls, one at a time.
pub struct ScriptGenerator<T> {
    transport: T,
    config: GatewayConfig,
    in_flight: AtomicBool,
}

impl<T: CompletionTransport> ScriptGenerator<T> {
    /// Creates a generator with the default gateway configuration.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            config: GatewayConfig::default(),
            in_flight: AtomicBool::new(false),
        }
    }

    /// Builder: Set gateway configuration.
    pub fn with_config(mut self, config: GatewayConfig) -> Self {
        self.config = config;
        self
    }

    /// Gets the gateway configuration.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Gets the transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// True while a call is outstanding.
    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Builds the completion request for `request`.
    pub fn completion_request(&self, request: &GenerationRequest) -> CompletionRequest {
        CompletionRequest {
            model: self.config.model.clone(),
            system: SYSTEM_PROMPT.to_string(),
            prompt: build_prompt(request),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        }
    }

    /// Generates a script.
    ///
    /// Refused before dispatch when the idea is blank, no credential is
    /// stored, or another call is outstanding. A reply that is not the
    /// expected JSON is not an error: it is completed with defaults.
    pub async fn generate<C>(
        &self,
        credentials: &C,
        request: &GenerationRequest,
    ) -> ScriptResult<GenerationResult>
    where
        C: TextStore + ?Sized,
    {
        if request.raw_input.trim().is_empty() {
            return Err(ScriptError::EmptyInput);
        }

        let api_key = credentials
            .get()?
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or(ScriptError::MissingCredential)?;

        let _guard = InFlightGuard::acquire(&self.in_flight)?;
        let generation_id = Uuid::new_v4();
        let completion = self.completion_request(request);

        tracing::info!(
            %generation_id,
            model = %completion.model,
            language = %request.language,
            length = %request.length,
            "dispatching generation"
        );

        let content = self
            .transport
            .complete(&api_key, &completion)
            .await
            .inspect_err(|e| tracing::warn!(%generation_id, error = %e, "generation failed"))?;

        if content.trim().is_empty() {
            tracing::warn!(%generation_id, "gateway returned no content");
            return Err(ScriptError::EmptyCompletion);
        }

        let payload = GenerationPayload::parse(&content);
        tracing::info!(
            %generation_id,
            structured = payload.is_structured(),
            chars = content.len(),
            "generation completed"
        );
        Ok(payload.into_result(request))
    }
}

//! Error types for script generation and session persistence.
//!
//! Text rendering never fails: malformed replies go down a fallback path.
//! The variants here cover what is left (missing prerequisites, the gateway
//! call, and the durable stores).

use thiserror::Error;

/// Result type alias for script operations.
pub type ScriptResult<T> = Result<T, ScriptError>;

/// Errors surfaced to the user through the notification channel.
#[derive(Error, Debug)]
pub enum ScriptError {
    /// No API key is stored; the generation call is refused before dispatch.
    #[error("OpenRouter API key not configured. Please enter your API key in the setup section.")]
    MissingCredential,

    /// The raw idea is blank.
    #[error("Please enter your script idea or topic.")]
    EmptyInput,

    /// A generation call is already outstanding.
    #[error("A script is already being generated")]
    GenerationInFlight,

    /// The gateway could not be reached.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status.
    #[error("API request failed: {status} {message}")]
    UpstreamRejected { status: u16, message: String },

    /// The gateway answered without any message content.
    #[error("No content received from API")]
    EmptyCompletion,

    /// Automerge error during session document operations.
    #[error("Automerge error: {0}")]
    Automerge(#[from] automerge::AutomergeError),

    /// Autosurgeon hydration error.
    #[error("Hydration error: {0}")]
    Hydrate(#[from] autosurgeon::HydrateError),

    /// Autosurgeon reconcile error.
    #[error("Reconcile error: {0}")]
    Reconcile(#[from] autosurgeon::ReconcileError),

    /// Session document structure is invalid.
    #[error("Schema violation: {0}")]
    SchemaViolation(String),

    /// Durable store I/O failure.
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl ScriptError {
    /// Creates a Transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates an UpstreamRejected error.
    pub fn upstream_rejected(status: u16, message: impl Into<String>) -> Self {
        Self::UpstreamRejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a SchemaViolation error.
    pub fn schema_violation(msg: impl Into<String>) -> Self {
        Self::SchemaViolation(msg.into())
    }

    /// Creates a Serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// True for errors raised before any request left the process.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential | Self::EmptyInput | Self::GenerationInFlight
        )
    }
}

impl From<serde_json::Error> for ScriptError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

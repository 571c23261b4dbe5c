//! Vibescript - script generation for short-form video.
//!
//! A raw idea plus form choices becomes one gateway call; the reply becomes
//! three views of the same script:
//!
//! - **Clean**: annotations and formatting stripped, one sentence per paragraph
//! - **Performer**: the clean text, laid out for a teleprompter
//! - **Detailed**: the script as written, with `[...]` annotations marked
//!
//! The user may replace the clean text with their own edit. The edit is kept in
//! a durable store and wins over the derived text until it is cleared.
//!
//! # Example
//!
//! ```rust
//! use vibescript::{render_view, normalize, RenderedView, SessionManager, View};
//!
//! let raw = r#"{"script": "[HOOK] Stop scrolling. pause: 2s This changes **everything**!"}"#;
//!
//! assert_eq!(normalize(raw), "Stop scrolling.\n\n(PAUSE)\n\nThis changes everything!");
//!
//! // The detailed view keeps annotations as separate segments
//! let detailed = render_view(raw, None, View::Detailed);
//! assert!(matches!(detailed, RenderedView::Segments(_)));
//!
//! // A session persists the active view and the user's edit
//! let mut session = SessionManager::new();
//! session.set_clean_override("My take. In my words.").unwrap();
//! let rendered = session.render(raw).unwrap();
//! assert_eq!(rendered.plain_text(), "My take.\n\nIn my words.");
//!
//! let bytes = session.save();
//! let mut restored = SessionManager::from_bytes(&bytes).unwrap();
//! assert_eq!(restored.clean_override().unwrap().as_deref(), Some("My take. In my words."));
//! ```

pub mod config;
pub mod error;
pub mod generation;
pub mod pipeline;
pub mod session;
pub mod store;

#[cfg(feature = "gateway")]
pub mod gateway;

// Re-exports for convenience
pub use config::GatewayConfig;
pub use error::{ScriptError, ScriptResult};
pub use generation::{
    assemble_result, build_prompt, CompletionRequest, CompletionTransport, GenerationPayload,
    GenerationRequest, GenerationResult, Language, ScriptGenerator, ScriptLength,
};
pub use pipeline::{
    export_view, normalize, render_annotated, render_view, to_performance_layout, EditOverlay,
    EmptyOverridePolicy, ExportArtifact, RenderedView, Segment, View,
};
pub use session::{DisplayState, SessionManager};
pub use store::{mask_secret, FileStore, MemoryStore, TextStore};

#[cfg(feature = "gateway")]
pub use gateway::OpenRouterClient;

#[cfg(feature = "wasm")]
pub use session::JsScriptSession;

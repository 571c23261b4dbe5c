//! Durable display state: active view and the clean-text override.

pub mod manager;
pub mod model;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use manager::SessionManager;
pub use model::DisplayState;

#[cfg(feature = "wasm")]
pub use wasm::JsScriptSession;

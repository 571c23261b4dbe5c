//! WASM bindings for the session document.

use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;

use super::manager::SessionManager;
use crate::pipeline::wasm::{js_result, parse_view, to_js_value};

/// JavaScript-friendly wrapper around SessionManager.
///
/// Persist `toBytes()` in IndexedDB or localStorage and restore with
/// `JsScriptSession.fromBytes` on the next visit.
#[wasm_bindgen]
pub struct JsScriptSession {
    inner: SessionManager,
}

#[wasm_bindgen]
impl JsScriptSession {
    /// Creates an empty session.
    ///
    /// # Example (JavaScript)
    /// ```js
    /// const session = new JsScriptSession();
    /// ```
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsScriptSession {
        JsScriptSession {
            inner: SessionManager::new(),
        }
    }

    /// Loads from binary bytes (Uint8Array).
    #[wasm_bindgen(js_name = fromBytes)]
    pub fn from_bytes(bytes: &[u8]) -> Result<JsScriptSession, JsValue> {
        let inner = js_result!(SessionManager::from_bytes(bytes))?;
        Ok(JsScriptSession { inner })
    }

    /// Saves to binary bytes (returns Uint8Array).
    #[wasm_bindgen(js_name = toBytes)]
    pub fn to_bytes(&mut self) -> Uint8Array {
        let bytes = self.inner.save();
        Uint8Array::from(&bytes[..])
    }

    /// Gets `{ currentView, cleanOverride? }`.
    #[wasm_bindgen(js_name = getState)]
    pub fn get_state(&mut self) -> Result<JsValue, JsValue> {
        let state = js_result!(self.inner.get_state())?;
        Ok(to_js_value(&state)?)
    }

    /// Active view name.
    #[wasm_bindgen(js_name = currentView)]
    pub fn current_view(&mut self) -> Result<String, JsValue> {
        let view = js_result!(self.inner.current_view())?;
        Ok(view.as_str().to_string())
    }

    /// Switches view: "clean", "detailed" or "performer".
    ///
    /// # Example (JavaScript)
    /// ```js
    /// session.setView('performer');
    /// ```
    #[wasm_bindgen(js_name = setView)]
    pub fn set_view(&mut self, view: &str) -> Result<(), JsValue> {
        let view = parse_view(view)?;
        js_result!(self.inner.set_view(view))?;
        Ok(())
    }

    /// Stored override, or undefined.
    #[wasm_bindgen(js_name = cleanOverride)]
    pub fn clean_override(&self) -> Result<Option<String>, JsValue> {
        js_result!(self.inner.clean_override())
    }

    #[wasm_bindgen(js_name = setCleanOverride)]
    pub fn set_clean_override(&mut self, text: &str) -> Result<(), JsValue> {
        js_result!(self.inner.set_clean_override(text))
    }

    /// Returns true when an override was removed.
    #[wasm_bindgen(js_name = clearCleanOverride)]
    pub fn clear_clean_override(&mut self) -> Result<bool, JsValue> {
        js_result!(self.inner.clear_clean_override())
    }

    /// Renders the active view of a raw script with this session's override.
    #[wasm_bindgen(js_name = render)]
    pub fn render(&mut self, raw_script: &str) -> Result<JsValue, JsValue> {
        let rendered = js_result!(self.inner.render(raw_script))?;
        Ok(to_js_value(&rendered)?)
    }

    /// Builds the download for the active view.
    #[wasm_bindgen(js_name = exportActive)]
    pub fn export_active(&mut self, raw_script: &str, target: Option<String>) -> Result<JsValue, JsValue> {
        let artifact = js_result!(self
            .inner
            .export(raw_script, target.as_deref().unwrap_or_default()))?;
        Ok(to_js_value(&artifact)?)
    }
}

impl Default for JsScriptSession {
    fn default() -> Self {
        Self::new()
    }
}

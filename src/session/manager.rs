//! Session document manager.
//!
//! Wraps an Automerge document holding one [`DisplayState`]. Bulk changes go
//! through hydrate/reconcile; view switches and override edits are single
//! targeted `put`/`delete` operations on the root map.

use automerge::{transaction::Transactable, AutoCommit, ReadDoc, ScalarValue, Value, ROOT};
use autosurgeon::{hydrate, reconcile};

use super::model::{read_string, DisplayState, OVERRIDE_KEY, VIEW_KEY};
use crate::error::{ScriptError, ScriptResult};
use crate::pipeline::{export_view, render_view, EmptyOverridePolicy, ExportArtifact, RenderedView, View};
use crate::store::TextStore;

/// Durable per-user display state.
#[derive(Debug)]
pub struct SessionManager {
    doc: AutoCommit,
    /// Hydrated state, dropped after any direct document mutation.
    cached_state: Option<DisplayState>,
    policy: EmptyOverridePolicy,
}

impl SessionManager {
    // =========================================================================
    // INITIALIZATION
    // =========================================================================

    /// Creates an empty session. Missing keys hydrate to defaults, so nothing
    /// is written until the first change.
    pub fn new() -> Self {
        Self {
            doc: AutoCommit::new(),
            cached_state: Some(DisplayState::default()),
            policy: EmptyOverridePolicy::default(),
        }
    }

    /// Loads a session saved with [`SessionManager::save`].
    pub fn from_bytes(bytes: &[u8]) -> ScriptResult<Self> {
        let doc = AutoCommit::load(bytes)?;
        let mut manager = Self {
            doc,
            cached_state: None,
            policy: EmptyOverridePolicy::default(),
        };
        manager.check_scalar(VIEW_KEY)?;
        manager.check_scalar(OVERRIDE_KEY)?;
        Ok(manager)
    }

    /// Builder: Set how an empty override is read back.
    pub fn with_policy(mut self, policy: EmptyOverridePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Saves the document to binary format.
    pub fn save(&mut self) -> Vec<u8> {
        self.doc.save()
    }

    /// Actor ID of this document instance.
    pub fn actor_id(&self) -> String {
        self.doc.get_actor().to_hex_string()
    }

    // =========================================================================
    // STATE (via Hydrate/Reconcile)
    // =========================================================================

    /// Hydrates the display state.
    pub fn get_state(&mut self) -> ScriptResult<DisplayState> {
        if let Some(ref cached) = self.cached_state {
            return Ok(cached.clone());
        }
        let state: DisplayState = hydrate(&self.doc)?;
        self.cached_state = Some(state.clone());
        Ok(state)
    }

    /// Mutates the state and reconciles it back into the document.
    pub fn update_state<F>(&mut self, f: F) -> ScriptResult<()>
    where
        F: FnOnce(&mut DisplayState),
    {
        let mut state = self.get_state()?;
        f(&mut state);
        reconcile(&mut self.doc, &state)?;
        self.cached_state = Some(state);
        Ok(())
    }

    /// Active view.
    pub fn current_view(&mut self) -> ScriptResult<View> {
        Ok(self.get_state()?.current_view)
    }

    // =========================================================================
    // TARGETED UPDATES (Direct put/delete)
    // =========================================================================

    /// Switches the active view.
    pub fn set_view(&mut self, view: View) -> ScriptResult<()> {
        self.cached_state = None;
        self.doc
            .put(ROOT, VIEW_KEY, ScalarValue::Str(view.as_str().into()))?;
        tracing::debug!(%view, "view switched");
        Ok(())
    }

    /// Reads the override as stored, without applying the empty policy.
    pub fn clean_override(&self) -> ScriptResult<Option<String>> {
        Ok(read_string(&self.doc, &ROOT, OVERRIDE_KEY)?)
    }

    /// Stores the user's clean text.
    pub fn set_clean_override(&mut self, text: &str) -> ScriptResult<()> {
        self.cached_state = None;
        self.doc
            .put(ROOT, OVERRIDE_KEY, ScalarValue::Str(text.into()))?;
        Ok(())
    }

    /// Drops the user's clean text. Returns whether one was stored.
    pub fn clear_clean_override(&mut self) -> ScriptResult<bool> {
        if self.doc.get(ROOT, OVERRIDE_KEY)?.is_none() {
            return Ok(false);
        }
        self.cached_state = None;
        self.doc.delete(ROOT, OVERRIDE_KEY)?;
        Ok(true)
    }

    // =========================================================================
    // RENDERING
    // =========================================================================

    /// Renders the active view of `raw_script` with this session's override.
    pub fn render(&mut self, raw_script: &str) -> ScriptResult<RenderedView> {
        let state = self.get_state()?;
        let clean_override = self.policy.apply(state.clean_override);
        Ok(render_view(raw_script, clean_override.as_deref(), state.current_view))
    }

    /// Exports the active view of `raw_script`.
    pub fn export(&mut self, raw_script: &str, target: &str) -> ScriptResult<ExportArtifact> {
        let state = self.get_state()?;
        let clean_override = self.policy.apply(state.clean_override);
        Ok(export_view(
            raw_script,
            clean_override.as_deref(),
            state.current_view,
            target,
        ))
    }

    // =========================================================================
    // SYNC
    // =========================================================================

    /// Merges another copy of the session, e.g. from a second tab.
    pub fn merge(&mut self, other: &mut Self) -> ScriptResult<()> {
        self.cached_state = None;
        self.doc.merge(&mut other.doc)?;
        Ok(())
    }

    // =========================================================================
    // INTERNAL HELPERS
    // =========================================================================

    /// Rejects documents where a state key holds an object.
    fn check_scalar(&self, key: &str) -> ScriptResult<()> {
        match self.doc.get(ROOT, key)? {
            Some((Value::Object(_), _)) => Err(ScriptError::schema_violation(format!(
                "'{}' is not a scalar",
                key
            ))),
            _ => Ok(()),
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}

/// The session's slot is the clean-text override.
impl TextStore for SessionManager {
    fn get(&self) -> ScriptResult<Option<String>> {
        self.clean_override()
    }

    fn set(&mut self, value: &str) -> ScriptResult<()> {
        self.set_clean_override(value)
    }

    fn clear(&mut self) -> ScriptResult<()> {
        self.clear_clean_override().map(|_| ())
    }
}

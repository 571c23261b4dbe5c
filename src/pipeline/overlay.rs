//! Edit overlay: a user-authored clean script that wins over the derived one.

use serde::{Deserialize, Serialize};

use crate::error::ScriptResult;
use crate::store::TextStore;

/// What an empty override means.
///
/// The browser form historically could not tell "cleared the text box" from
/// "never edited". The choice is explicit here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyOverridePolicy {
    /// An empty override is the same as no override.
    #[default]
    TreatAsUnset,
    /// An empty override is a deliberately empty script.
    Keep,
}

impl EmptyOverridePolicy {
    /// Applies the policy to a stored value.
    pub fn apply(self, stored: Option<String>) -> Option<String> {
        match (self, stored) {
            (Self::TreatAsUnset, Some(text)) if text.is_empty() => None,
            (_, stored) => stored,
        }
    }
}

/// Picks the clean text to display: a present override wins.
pub fn resolve_clean_text<'a>(derived: &'a str, override_text: Option<&'a str>) -> &'a str {
    override_text.unwrap_or(derived)
}

/// Clean-text override backed by a durable store.
pub struct EditOverlay<S: TextStore> {
    store: S,
    policy: EmptyOverridePolicy,
}

impl<S: TextStore> EditOverlay<S> {
    /// Creates an overlay over `store` with the default empty policy.
    pub fn new(store: S) -> Self {
        Self {
            store,
            policy: EmptyOverridePolicy::default(),
        }
    }

    /// Builder: Set the empty override policy.
    pub fn with_policy(mut self, policy: EmptyOverridePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Returns the active override after the empty policy is applied.
    pub fn current_override(&self) -> ScriptResult<Option<String>> {
        Ok(self.policy.apply(self.store.get()?))
    }

    /// Persists a user edit.
    pub fn set_override(&mut self, text: &str) -> ScriptResult<()> {
        self.store.set(text)
    }

    /// Drops the user edit; resolution goes back to the derived text.
    pub fn clear_override(&mut self) -> ScriptResult<()> {
        self.store.clear()
    }

    /// Resolves the clean text against the stored override.
    ///
    /// A store failure falls back to the derived text.
    pub fn resolve(&self, derived: &str) -> String {
        match self.current_override() {
            Ok(override_text) => resolve_clean_text(derived, override_text.as_deref()).to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read clean override, using derived text");
                derived.to_string()
            }
        }
    }

    /// Gets the backing store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the overlay and returns the store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScriptError;
    use crate::store::MemoryStore;

    struct BrokenStore;

    impl TextStore for BrokenStore {
        fn get(&self) -> ScriptResult<Option<String>> {
            Err(ScriptError::serialization("corrupt"))
        }

        fn set(&mut self, _value: &str) -> ScriptResult<()> {
            Err(ScriptError::serialization("corrupt"))
        }

        fn clear(&mut self) -> ScriptResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_resolve_clean_text() {
        assert_eq!(resolve_clean_text("derived", None), "derived");
        assert_eq!(resolve_clean_text("derived", Some("mine")), "mine");
    }

    #[test]
    fn test_override_wins_until_cleared() {
        let mut overlay = EditOverlay::new(MemoryStore::new());
        assert_eq!(overlay.resolve("fresh"), "fresh");

        overlay.set_override("my edit").unwrap();
        assert_eq!(overlay.resolve("fresh"), "my edit");
        assert_eq!(overlay.resolve("another generation"), "my edit");

        overlay.clear_override().unwrap();
        assert_eq!(overlay.resolve("fresh"), "fresh");
    }

    #[test]
    fn test_empty_override_policy() {
        let mut unset = EditOverlay::new(MemoryStore::new());
        unset.set_override("").unwrap();
        assert_eq!(unset.current_override().unwrap(), None);
        assert_eq!(unset.resolve("derived"), "derived");

        let mut keep = EditOverlay::new(MemoryStore::new()).with_policy(EmptyOverridePolicy::Keep);
        keep.set_override("").unwrap();
        assert_eq!(keep.current_override().unwrap().as_deref(), Some(""));
        assert_eq!(keep.resolve("derived"), "");
    }

    #[test]
    fn test_store_failure_falls_back_to_derived() {
        let overlay = EditOverlay::new(BrokenStore);
        assert_eq!(overlay.resolve("derived"), "derived");
    }

    #[test]
    fn test_borrowed_store_keeps_edit() {
        let mut store = MemoryStore::new();
        {
            let mut overlay = EditOverlay::new(&mut store);
            overlay.set_override("kept").unwrap();
        }
        assert_eq!(store.get().unwrap().as_deref(), Some("kept"));
    }
}

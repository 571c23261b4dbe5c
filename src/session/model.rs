//! Durable display state.

use automerge::{ScalarValue, Value};
use autosurgeon::reconcile::{MapReconciler, NoKey};
use autosurgeon::{Hydrate, HydrateError, ReadDoc, Reconcile, Reconciler};
use serde::{Deserialize, Serialize};

use crate::pipeline::View;

pub(crate) const VIEW_KEY: &str = "current_view";
pub(crate) const OVERRIDE_KEY: &str = "clean_override";

/// What the user is looking at, and their edit of the clean script.
///
/// Reconcile and Hydrate are written by hand so the document stays sparse:
/// an absent override is a missing key, never a stored null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayState {
    pub current_view: View,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub clean_override: Option<String>,
}

impl DisplayState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: Set view.
    pub fn with_view(mut self, view: View) -> Self {
        self.current_view = view;
        self
    }

    /// Builder: Set clean override.
    pub fn with_clean_override(mut self, text: impl Into<String>) -> Self {
        self.clean_override = Some(text.into());
        self
    }

    /// Override as a slice, for [`crate::pipeline::render_view`].
    pub fn override_str(&self) -> Option<&str> {
        self.clean_override.as_deref()
    }
}

impl Reconcile for DisplayState {
    type Key<'a> = NoKey;

    fn reconcile<R: Reconciler>(&self, mut reconciler: R) -> Result<(), R::Error> {
        let mut m = reconciler.map()?;
        m.put(VIEW_KEY, self.current_view.as_str().to_string())?;
        match &self.clean_override {
            Some(text) => m.put(OVERRIDE_KEY, text)?,
            None => {
                let _ = m.delete(OVERRIDE_KEY);
            }
        }
        Ok(())
    }
}

impl Hydrate for DisplayState {
    fn hydrate_map<D: ReadDoc>(doc: &D, obj: &automerge::ObjId) -> Result<Self, HydrateError> {
        let current_view = match read_string(doc, obj, VIEW_KEY)? {
            Some(name) => name.parse().unwrap_or_else(|_| {
                tracing::warn!(view = %name, "unknown view in session, using default");
                View::default()
            }),
            None => View::default(),
        };

        Ok(DisplayState {
            current_view,
            clean_override: read_string(doc, obj, OVERRIDE_KEY)?,
        })
    }
}

/// Reads a string scalar; missing keys and other types are `None`.
pub(crate) fn read_string<D: ReadDoc>(
    doc: &D,
    obj: &automerge::ObjId,
    key: &str,
) -> Result<Option<String>, automerge::AutomergeError> {
    match doc.get(obj, key)? {
        Some((Value::Scalar(s), _)) => match s.as_ref() {
            ScalarValue::Str(st) => Ok(Some(st.to_string())),
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use automerge::AutoCommit;
    use autosurgeon::{hydrate, reconcile};

    #[test]
    fn test_round_trip_through_document() {
        let mut doc = AutoCommit::new();
        let state = DisplayState::new()
            .with_view(View::Performer)
            .with_clean_override("My own words.");
        reconcile(&mut doc, &state).unwrap();

        let loaded: DisplayState = hydrate(&doc).unwrap();
        assert_eq!(loaded, state);
    }

    #[test]
    fn test_cleared_override_leaves_no_key() {
        let mut doc = AutoCommit::new();
        reconcile(&mut doc, &DisplayState::new().with_clean_override("x")).unwrap();
        reconcile(&mut doc, &DisplayState::new()).unwrap();

        assert!(doc.get(&automerge::ROOT, OVERRIDE_KEY).unwrap().is_none());
        let loaded: DisplayState = hydrate(&doc).unwrap();
        assert_eq!(loaded.clean_override, None);
    }

    #[test]
    fn test_empty_document_hydrates_to_default() {
        let doc = AutoCommit::new();
        let loaded: DisplayState = hydrate(&doc).unwrap();
        assert_eq!(loaded, DisplayState::default());
    }
}

//! Plain-text export of the active view.

use serde::{Deserialize, Serialize};

use super::{render_view, View};
use super::normalize::extract_script;

/// Default stem for exported file names.
pub const DEFAULT_EXPORT_TARGET: &str = "vibe-script";

/// A downloadable plain-text file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportArtifact {
    pub file_name: String,
    pub contents: String,
}

impl ExportArtifact {
    /// MIME type of every artifact.
    pub const MIME_TYPE: &'static str = "text/plain";

    /// Creates an artifact named `{target}-{view}.txt`.
    pub fn new(target: &str, view: View, contents: impl Into<String>) -> Self {
        let target = target.trim();
        let target = if target.is_empty() {
            DEFAULT_EXPORT_TARGET
        } else {
            target
        };
        Self {
            file_name: format!("{}-{}.txt", target, view.as_str()),
            contents: contents.into(),
        }
    }
}

/// Exports what the active view shows.
///
/// Clean and performer views export the teleprompter layout of the resolved
/// clean text; the detailed view exports the annotated script untouched.
pub fn export_view(
    raw_script: &str,
    clean_override: Option<&str>,
    view: View,
    target: &str,
) -> ExportArtifact {
    let contents = match view {
        View::Detailed => extract_script(raw_script).into_owned(),
        View::Clean | View::Performer => render_view(raw_script, clean_override, view).plain_text(),
    };
    ExportArtifact::new(target, view, contents)
}

//! Script rendering pipeline.
//!
//! One raw reply feeds three views:
//! - `clean`: [`normalize`], optionally replaced by the user's override, then
//!   [`to_performance_layout`]
//! - `performer`: same text as `clean`, shown at teleprompter size
//! - `detailed`: [`render_annotated`] over the extracted script

pub mod annotate;
pub mod export;
pub mod normalize;
pub mod overlay;
pub mod performance;

#[cfg(feature = "wasm")]
pub mod wasm;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use annotate::{join_segments, prepare_annotated, render_annotated, Segment};
pub use export::{export_view, ExportArtifact, DEFAULT_EXPORT_TARGET};
pub use normalize::{extract_script, normalize, PAUSE_TOKEN};
pub use overlay::{resolve_clean_text, EditOverlay, EmptyOverridePolicy};
pub use performance::to_performance_layout;

/// The active script view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Clean,
    Detailed,
    Performer,
}

impl View {
    /// All views, in display order.
    pub const ALL: [View; 3] = [View::Clean, View::Detailed, View::Performer];

    /// Lowercase name used in storage and file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            View::Clean => "clean",
            View::Detailed => "detailed",
            View::Performer => "performer",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clean" => Ok(View::Clean),
            "detailed" => Ok(View::Detailed),
            "performer" | "teleprompter" => Ok(View::Performer),
            other => Err(format!("unknown view: {}", other)),
        }
    }
}

/// What a view displays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum RenderedView {
    Text(String),
    Segments(Vec<Segment>),
}

impl RenderedView {
    /// The view as plain text, annotations included verbatim.
    pub fn plain_text(&self) -> String {
        match self {
            RenderedView::Text(text) => text.clone(),
            RenderedView::Segments(segments) => join_segments(segments),
        }
    }

    /// True when there is nothing to show yet.
    pub fn is_empty(&self) -> bool {
        match self {
            RenderedView::Text(text) => text.is_empty(),
            RenderedView::Segments(segments) => segments.is_empty(),
        }
    }
}

/// Renders one view of a raw script.
pub fn render_view(raw_script: &str, clean_override: Option<&str>, view: View) -> RenderedView {
    match view {
        View::Clean | View::Performer => {
            let derived = normalize(raw_script);
            let clean = resolve_clean_text(&derived, clean_override);
            RenderedView::Text(to_performance_layout(clean))
        }
        View::Detailed => RenderedView::Segments(render_annotated(&extract_script(raw_script))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAW: &str = r#"{"script":"[HOOK] Stop scrolling. pause: 2s This changes **everything**! [CAMERA: zoom]"}"#;

    #[test]
    fn test_view_parse_and_display() {
        for view in View::ALL {
            assert_eq!(view.as_str().parse::<View>().unwrap(), view);
        }
        assert_eq!("Teleprompter".parse::<View>().unwrap(), View::Performer);
        assert!("fancy".parse::<View>().is_err());
    }

    #[test]
    fn test_clean_and_performer_match() {
        let clean = render_view(RAW, None, View::Clean);
        let performer = render_view(RAW, None, View::Performer);
        assert_eq!(clean, performer);
        assert_eq!(
            clean.plain_text(),
            "Stop scrolling.\n\n(PAUSE)\n\nThis changes everything!"
        );
    }

    #[test]
    fn test_override_applies_to_clean_not_detailed() {
        let clean = render_view(RAW, Some("Mine. Only mine."), View::Clean);
        assert_eq!(clean.plain_text(), "Mine.\n\nOnly mine.");

        let detailed = render_view(RAW, Some("Mine. Only mine."), View::Detailed);
        match detailed {
            RenderedView::Segments(segments) => {
                assert_eq!(segments[0], Segment::annotation("[HOOK]"));
                assert!(segments.iter().any(|s| s.text == "[CAMERA: zoom]"));
            }
            other => panic!("expected segments, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_script_renders_empty() {
        assert!(render_view("", None, View::Clean).is_empty());
        assert!(render_view("", None, View::Detailed).is_empty());
    }
}

//! Annotated ("detailed") view: prose and bracketed technical cues as
//! separate display segments.

use serde::{Deserialize, Serialize};

use super::normalize::{collapse_whitespace, unescape, BRACKET_RE};

/// A run of display text.
///
/// Every cue kind (`[HOOK]`, `[EMPH]`, `[pause: 2s]`, `[CAMERA: ...]`,
/// `[BGM: ...]`) is flagged the same way and rendered with one style.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub text: String,
    pub is_annotation: bool,
}

impl Segment {
    /// Creates a prose segment.
    pub fn prose(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_annotation: false,
        }
    }

    /// Creates an annotation segment.
    pub fn annotation(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            is_annotation: true,
        }
    }
}

/// Unescapes and collapses whitespace without touching brackets.
///
/// This is the text that [`render_annotated`] segments reconstruct.
pub fn prepare_annotated(original: &str) -> String {
    collapse_whitespace(&unescape(original)).trim().to_string()
}

/// Splits the script into prose and annotation segments, in order.
///
/// Concatenating the `text` of every segment gives back
/// [`prepare_annotated`]`(original)` exactly. Empty runs are not emitted.
pub fn render_annotated(original: &str) -> Vec<Segment> {
    let cleaned = prepare_annotated(original);
    let mut segments = Vec::new();
    let mut cursor = 0;

    for span in BRACKET_RE.find_iter(&cleaned) {
        if span.start() > cursor {
            segments.push(Segment::prose(&cleaned[cursor..span.start()]));
        }
        segments.push(Segment::annotation(span.as_str()));
        cursor = span.end();
    }
    if cursor < cleaned.len() {
        segments.push(Segment::prose(&cleaned[cursor..]));
    }

    segments
}

/// Joins segments back into one string.
pub fn join_segments(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.text.as_str()).collect()
}

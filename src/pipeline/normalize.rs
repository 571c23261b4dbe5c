//! Response normalizer: turns a raw generation reply into clean script text.
//!
//! The passes are order dependent. Whitespace is collapsed both before and
//! after the JSON wrapper is stripped because stripping leaves irregular
//! spacing behind, and the pause token is laid out last so that no later
//! collapse can flatten its blank lines.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Token that replaces `pause: Ns` markers in the clean script.
pub const PAUSE_TOKEN: &str = "(PAUSE)";

/// Rendered form of the pause token: a paragraph of its own.
const PAUSE_BLOCK: &str = "\n\n(PAUSE)\n\n";

pub(crate) static BRACKET_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\[.*?\]").expect("valid regex"));

static EMPHASIS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\*\*(.*?)\*\*").expect("valid regex"));

// A run of backslashes counts as a single escape so that double-encoded
// strings unescape in one pass.
static ESCAPED_NEWLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\\+n").expect("valid regex"));

static ESCAPED_QUOTE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\\+""#).expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

static NEWLINE_INDENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s+").expect("valid regex"));

static JSON_PREFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^(?:\s*\{[^{}]*?"script"\s*:\s*)+"#).expect("valid regex")
});

static JSON_SUFFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:\s*\})+\s*$").expect("valid regex"));

// Matches both the spoken marker and an already rendered token, so that a
// second pass lays the token out exactly like the first one did.
static PAUSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\s*(?:pause:\s*\d+(?:\.\d+)?\s*s(?:ec(?:ond)?s?)?\b|\(pause\))\s*")
        .expect("valid regex")
});

static HORIZONTAL_WS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\S\n]+").expect("valid regex"));

/// Picks the working text out of a raw reply.
///
/// A JSON object with a string `script` field yields that field. Anything
/// else (invalid JSON, another shape, a non-string `script`) yields the raw
/// input unchanged. Parse failure is an expected branch, not an error.
pub fn extract_script(raw: &str) -> Cow<'_, str> {
    match serde_json::from_str::<Value>(raw) {
        Ok(Value::Object(map)) => match map.get("script") {
            Some(Value::String(script)) => Cow::Owned(script.clone()),
            _ => {
                tracing::debug!("reply is JSON without a script string, using raw text");
                Cow::Borrowed(raw)
            }
        },
        _ => Cow::Borrowed(raw),
    }
}

/// Converts escaped `\n` and `\"` sequences into real newlines and quotes.
pub(crate) fn unescape(text: &str) -> String {
    let text = ESCAPED_NEWLINE_RE.replace_all(text, "\n");
    ESCAPED_QUOTE_RE.replace_all(&text, "\"").into_owned()
}

/// Collapses every whitespace run (newlines included) to a single space.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    WHITESPACE_RE.replace_all(text, " ").into_owned()
}

/// Normalizes a raw reply into the clean script.
///
/// Passes, in order:
/// 1. drop `[...]` annotations
/// 2. unwrap `**emphasis**`
/// 3. unescape `\n` and `\"`
/// 4. collapse whitespace
/// 5. drop indentation after newlines
/// 6. strip a leading `{ ... "script":` fragment and trailing `}`
/// 7. collapse whitespace again
/// 8. replace `pause: Ns` markers with [`PAUSE_TOKEN`] on its own paragraph
/// 9. collapse horizontal whitespace and trim
///
/// `normalize(&normalize(t)) == normalize(t)` holds for every input.
pub fn normalize(raw: &str) -> String {
    let working = extract_script(raw);

    let text = BRACKET_RE.replace_all(&working, "");
    let text = EMPHASIS_RE.replace_all(&text, "$1");
    let text = unescape(&text);
    let text = collapse_whitespace(&text);
    let text = NEWLINE_INDENT_RE.replace_all(&text, "\n");
    let text = JSON_PREFIX_RE.replace(&text, "");
    let text = JSON_SUFFIX_RE.replace(&text, "");
    let text = collapse_whitespace(&text);
    let text = PAUSE_RE.replace_all(&text, PAUSE_BLOCK);
    let text = HORIZONTAL_WS_RE.replace_all(&text, " ");

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_reply_uses_script_field() {
        let raw = r#"{"script":"Hello [HOOK] world.","shotList":["a"],"bgmSuggestions":[],"ctaVariants":[],"summary":"s","estimatedTime":30}"#;
        assert_eq!(normalize(raw), "Hello world.");
    }

    #[test]
    fn test_json_without_script_falls_back_to_raw() {
        let raw = r#"{"summary":"only a summary"}"#;
        assert_eq!(extract_script(raw), raw);
    }

    #[test]
    fn test_non_string_script_falls_back_to_raw() {
        let raw = r#"{"script":42}"#;
        assert_eq!(extract_script(raw), raw);
    }

    #[test]
    fn test_plain_sentence_is_returned_trimmed() {
        assert_eq!(normalize("  just a plain sentence.  "), "just a plain sentence.");
    }

    #[test]
    fn test_annotations_and_emphasis_removed() {
        let raw = "[HOOK] This is **huge** news [CAMERA: zoom in] for you.";
        assert_eq!(normalize(raw), "This is huge news for you.");
    }

    #[test]
    fn test_annotations_spanning_lines_removed() {
        assert_eq!(normalize("Start [BGM:\nlofi beat] end"), "Start end");
    }

    #[test]
    fn test_escape_sequences_unescaped() {
        let raw = r#"Line one\nLine \"two\"\\nthree"#;
        assert_eq!(normalize(raw), r#"Line one Line "two" three"#);
    }

    #[test]
    fn test_pause_marker_becomes_paragraph() {
        let clean = normalize("Wait for it pause: 3s here it comes.");
        assert_eq!(clean, "Wait for it\n\n(PAUSE)\n\nhere it comes.");
        assert!(!clean.contains("pause: 3s"));
    }

    #[test]
    fn test_pause_marker_case_insensitive_any_duration() {
        let clean = normalize("A PAUSE: 12 seconds B Pause:1.5s C");
        assert_eq!(clean, "A\n\n(PAUSE)\n\nB\n\n(PAUSE)\n\nC");
    }

    #[test]
    fn test_pause_followed_by_other_word_is_prose() {
        assert_eq!(normalize("Hold the pause: 3 steps back"), "Hold the pause: 3 steps back");
        assert_eq!(normalize("A pause: 2 secrets later"), "A pause: 2 secrets later");
        assert_eq!(normalize("Then pause: 2 sec."), "Then\n\n(PAUSE)\n\n.");
    }

    #[test]
    fn test_bracketed_pause_is_an_annotation() {
        assert_eq!(normalize("Wait [pause: 2s] now"), "Wait now");
    }

    #[test]
    fn test_truncated_json_wrapper_stripped() {
        let raw = r#"{ "title": "x", "script": Hello there }"#;
        assert_eq!(normalize(raw), "Hello there");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   \n\t "), "");
    }

    #[test]
    fn test_idempotent_on_tricky_inputs() {
        let inputs = [
            "",
            "plain",
            "Hello [HOOK] world. pause: 3s Next **bold** line.",
            r#"{"script":"Intro\\n[EMPH]big[/EMPH] pause: 2s done"}"#,
            r#"{"script":"{\"script\": \"nested\"}"}"#,
            "a pause: 1s pause: 2s b",
            "pause: 2s leading and trailing pause: 4s",
            r#"back\\\"slash and \\\\n runs"#,
            "***a*** and ** ** **",
            "**multi\nline** emphasis",
            "[open only and ] close only ]",
            "{ \"a\": 1, \"script\": text } }",
            "x } pause: 1s",
            "(pause) already rendered",
            "\u{a0}non-breaking\u{a0}space",
        ];
        for input in inputs {
            let once = normalize(input);
            let twice = normalize(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }
}

//! Teleprompter layout: one sentence per paragraph.

use std::sync::LazyLock;

use regex::Regex;

static BLANK_LINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n").expect("valid regex"));

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([.!?])\s+").expect("valid regex"));

static EXCESS_NEWLINES_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("valid regex"));

/// Reflows clean text so every sentence sits in its own paragraph.
///
/// Idempotent: applying it to its own output changes nothing.
pub fn to_performance_layout(clean: &str) -> String {
    let text = BLANK_LINES_RE.replace_all(clean, "\n\n");
    let text = SENTENCE_END_RE.replace_all(&text, "${1}\n\n");
    let text = EXCESS_NEWLINES_RE.replace_all(&text, "\n\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentence_per_paragraph() {
        assert_eq!(
            to_performance_layout("Hook them. Then deliver! Ready? Go"),
            "Hook them.\n\nThen deliver!\n\nReady?\n\nGo"
        );
    }

    #[test]
    fn test_blank_line_runs_collapse() {
        assert_eq!(to_performance_layout("a\n \n\n\t\nb"), "a\n\nb");
    }

    #[test]
    fn test_pause_paragraph_kept() {
        let clean = "Wait for it\n\n(PAUSE)\n\nhere it comes.";
        assert_eq!(to_performance_layout(clean), clean);
    }

    #[test]
    fn test_trailing_terminator_trimmed() {
        assert_eq!(to_performance_layout("  Done. "), "Done.");
    }

    #[test]
    fn test_empty() {
        assert_eq!(to_performance_layout(""), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "One. Two! Three? Four",
            "a.\n \nb",
            "a!\n\n\n b",
            "x\n . y",
            "a\n  ! \n  b",
            "line one\nline two. line three",
            "Trailing space after question?   ",
        ];
        for input in inputs {
            let once = to_performance_layout(input);
            assert_eq!(once, to_performance_layout(&once), "not idempotent for {:?}", input);
        }
    }
}

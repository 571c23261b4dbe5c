//! Parse boundary for gateway replies.
//!
//! A reply is classified once, here, as structured JSON or free text. Later
//! stages only ever look at the resulting [`GenerationResult`].

use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};

use super::model::{GenerationRequest, GenerationResult};

static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)^\s*```[A-Za-z0-9_-]*[ \t]*\r?\n?(.*?)\s*```\s*$").expect("valid regex")
});

/// A classified gateway reply.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationPayload {
    /// A JSON object with a string `script` field.
    Structured(GenerationResult),
    /// Anything else, kept verbatim.
    Freeform(String),
}

impl GenerationPayload {
    /// Classifies the assistant message content. Never fails.
    pub fn parse(content: &str) -> Self {
        let body = strip_code_fence(content);
        match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(map)) => match map.get("script") {
                Some(Value::String(script)) => {
                    GenerationPayload::Structured(structured_result(script, &map))
                }
                _ => {
                    tracing::debug!("reply is JSON without a script string, treating as free text");
                    GenerationPayload::Freeform(content.trim().to_string())
                }
            },
            Ok(_) | Err(_) => {
                tracing::debug!("reply is not a JSON object, treating as free text");
                GenerationPayload::Freeform(content.trim().to_string())
            }
        }
    }

    /// True for the structured branch.
    pub fn is_structured(&self) -> bool {
        matches!(self, GenerationPayload::Structured(_))
    }

    /// Completes the payload into a result for `request`.
    ///
    /// Free text becomes the script and every auxiliary field gets the stock
    /// suggestions. A structured reply without a usable runtime gets the
    /// length-derived estimate.
    pub fn into_result(self, request: &GenerationRequest) -> GenerationResult {
        match self {
            GenerationPayload::Structured(mut result) => {
                if result.estimated_time == 0 {
                    result.estimated_time = request.length.estimated_seconds();
                }
                result
            }
            GenerationPayload::Freeform(text) => {
                GenerationResult::new(text).with_defaults_for(request)
            }
        }
    }
}

/// Assembles a result from raw assistant content.
pub fn assemble_result(request: &GenerationRequest, content: &str) -> GenerationResult {
    GenerationPayload::parse(content).into_result(request)
}

/// Returns the inside of a fenced code block, or the input untouched.
fn strip_code_fence(content: &str) -> &str {
    CODE_FENCE_RE
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(content)
}

fn structured_result(script: &str, map: &Map<String, Value>) -> GenerationResult {
    GenerationResult::new(script)
        .with_shot_list(string_list(map.get("shotList")))
        .with_bgm_suggestions(string_list(map.get("bgmSuggestions")))
        .with_cta_variants(string_list(map.get("ctaVariants")))
        .with_summary(
            map.get("summary")
                .and_then(Value::as_str)
                .unwrap_or_default(),
        )
        .with_estimated_time(seconds(map.get("estimatedTime")))
}

/// Lenient list read: strings are kept, numbers are printed, the rest is dropped.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) if !s.trim().is_empty() => vec![s.clone()],
        _ => Vec::new(),
    }
}

/// Lenient runtime read: integers, floats and numeric strings are accepted.
fn seconds(value: Option<&Value>) -> u32 {
    let raw = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().trim_end_matches('s').trim().parse::<f64>().ok(),
        _ => None,
    };
    match raw {
        Some(v) if v.is_finite() && v > 0.0 => v.round().min(u32::MAX as f64) as u32,
        _ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::model::{Language, ScriptLength, DEFAULT_SUMMARY};
    use crate::pipeline::normalize;

    #[test]
    fn test_structured_reply() {
        let content = r#"{"script":"Hello [HOOK] world.","shotList":["a"],"bgmSuggestions":[],"ctaVariants":[],"summary":"s","estimatedTime":30}"#;
        let payload = GenerationPayload::parse(content);
        assert!(payload.is_structured());

        let result = payload.into_result(&GenerationRequest::new("x"));
        assert_eq!(result.shot_list, vec!["a".to_string()]);
        assert!(result.bgm_suggestions.is_empty());
        assert_eq!(result.summary, "s");
        assert_eq!(result.estimated_time, 30);

        let clean = normalize(&result.script);
        assert_eq!(clean, "Hello world.");
    }

    #[test]
    fn test_plain_text_gets_defaults() {
        let request = GenerationRequest::new("x").with_length(ScriptLength::Short);
        let result = assemble_result(&request, "just a plain sentence.");

        assert_eq!(result.script, "just a plain sentence.");
        assert_eq!(normalize(&result.script), "just a plain sentence.");
        assert!(!result.shot_list.is_empty());
        assert!(!result.bgm_suggestions.is_empty());
        assert!(!result.cta_variants.is_empty());
        assert_eq!(result.summary, DEFAULT_SUMMARY);
        assert_eq!(result.estimated_time, 30);
    }

    #[test]
    fn test_fenced_json_is_structured() {
        let content = "```json\n{\"script\": \"Hi there.\", \"estimatedTime\": 40}\n```";
        let result = assemble_result(&GenerationRequest::new("x"), content);
        assert_eq!(result.script, "Hi there.");
        assert_eq!(result.estimated_time, 40);
    }

    #[test]
    fn test_json_without_script_is_freeform() {
        let content = r#"{"summary":"no script here"}"#;
        assert_eq!(
            GenerationPayload::parse(content),
            GenerationPayload::Freeform(content.to_string())
        );
    }

    #[test]
    fn test_missing_runtime_uses_length_estimate() {
        let request = GenerationRequest::new("x").with_length(ScriptLength::Long);
        let result = assemble_result(&request, r#"{"script":"s"}"#);
        assert_eq!(result.estimated_time, 75);
        assert!(result.shot_list.is_empty());
    }

    #[test]
    fn test_lenient_fields() {
        let content = r#"{"script":"s","shotList":["a",3,null,""],"ctaVariants":"Follow!","estimatedTime":"42s"}"#;
        let result = assemble_result(&GenerationRequest::new("x"), content);
        assert_eq!(result.shot_list, vec!["a".to_string(), "3".to_string()]);
        assert_eq!(result.cta_variants, vec!["Follow!".to_string()]);
        assert_eq!(result.estimated_time, 42);
    }

    #[test]
    fn test_freeform_cta_follow_language() {
        let request = GenerationRequest::new("x").with_language(Language::Thanglish);
        let result = assemble_result(&request, "not json");
        assert!(result.cta_variants[0].contains("your experience"));
    }
}

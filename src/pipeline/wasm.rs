//! WASM bindings for the rendering pipeline and generation helpers.
//!
//! The browser performs the gateway call itself; these functions cover
//! everything before and after it.

use serde::Serialize;
use serde_wasm_bindgen::{from_value, Serializer};
use wasm_bindgen::prelude::*;

use super::{
    export_view as export_view_inner, normalize as normalize_inner, render_annotated as render_annotated_inner,
    render_view as render_view_inner, to_performance_layout as to_performance_layout_inner,
    EmptyOverridePolicy, View,
};
use crate::error::ScriptError;
use crate::generation::vocabulary::{AUDIENCES, FORMATS, LANGUAGES, LENGTHS, NICHES, TONES};
use crate::generation::{assemble_result as assemble_result_inner, build_prompt as build_prompt_inner, GenerationRequest};

/// Serialize a value to JsValue with maps as plain JS objects (not Map).
pub(crate) fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, serde_wasm_bindgen::Error> {
    value.serialize(&Serializer::new().serialize_maps_as_objects(true))
}

// =============================================================================
// ERROR CONVERSION
// =============================================================================

impl From<ScriptError> for JsValue {
    fn from(err: ScriptError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

/// Helper macro for Result conversion
macro_rules! js_result {
    ($expr:expr) => {
        $expr.map_err(|e: $crate::error::ScriptError| wasm_bindgen::JsValue::from(e))
    };
}

pub(crate) use js_result;

pub(crate) fn parse_view(view: &str) -> Result<View, JsValue> {
    view.parse::<View>().map_err(|e| JsValue::from_str(&e))
}

// =============================================================================
// TEXT PIPELINE
// =============================================================================

/// Strips annotations and formatting from a raw reply.
///
/// # Example (JavaScript)
/// ```js
/// const clean = normalize(result.script);
/// ```
#[wasm_bindgen]
pub fn normalize(raw: &str) -> String {
    normalize_inner(raw)
}

/// One sentence per paragraph, for the teleprompter.
#[wasm_bindgen(js_name = toPerformanceLayout)]
pub fn to_performance_layout(text: &str) -> String {
    to_performance_layout_inner(text)
}

/// Splits a script into `{ text, is_annotation }` segments.
#[wasm_bindgen(js_name = renderAnnotated)]
pub fn render_annotated(original: &str) -> Result<JsValue, JsValue> {
    Ok(to_js_value(&render_annotated_inner(original))?)
}

/// Renders a view. Returns `{ kind: "text" | "segments", value }`.
///
/// # Example (JavaScript)
/// ```js
/// const view = renderView(result.script, localStorage.getItem('clean'), 'performer');
/// if (view.kind === 'text') teleprompter.textContent = view.value;
/// ```
#[wasm_bindgen(js_name = renderView)]
pub fn render_view(raw: &str, clean_override: Option<String>, view: &str) -> Result<JsValue, JsValue> {
    let view = parse_view(view)?;
    let clean_override = EmptyOverridePolicy::default().apply(clean_override);
    Ok(to_js_value(&render_view_inner(raw, clean_override.as_deref(), view))?)
}

/// Builds the download for a view. Returns `{ file_name, contents }`.
#[wasm_bindgen(js_name = exportView)]
pub fn export_view(
    raw: &str,
    clean_override: Option<String>,
    view: &str,
    target: Option<String>,
) -> Result<JsValue, JsValue> {
    let view = parse_view(view)?;
    let clean_override = EmptyOverridePolicy::default().apply(clean_override);
    let artifact = export_view_inner(
        raw,
        clean_override.as_deref(),
        view,
        target.as_deref().unwrap_or_default(),
    );
    Ok(to_js_value(&artifact)?)
}

// =============================================================================
// GENERATION HELPERS
// =============================================================================

/// Builds the user message for a request object (camelCase fields).
#[wasm_bindgen(js_name = buildPrompt)]
pub fn build_prompt(request: JsValue) -> Result<String, JsValue> {
    let request: GenerationRequest = from_value(request)?;
    Ok(build_prompt_inner(&request))
}

/// Turns the assistant message content into a complete result.
///
/// # Example (JavaScript)
/// ```js
/// const content = data.choices?.[0]?.message?.content;
/// const result = assembleResult(form, content);
/// ```
#[wasm_bindgen(js_name = assembleResult)]
pub fn assemble_result(request: JsValue, content: &str) -> Result<JsValue, JsValue> {
    if content.trim().is_empty() {
        return Err(ScriptError::EmptyCompletion.into());
    }
    let request: GenerationRequest = from_value(request)?;
    Ok(to_js_value(&assemble_result_inner(&request, content))?)
}

#[derive(Serialize)]
struct Vocabularies {
    niches: &'static [&'static str],
    tones: &'static [&'static str],
    audiences: &'static [&'static str],
    formats: &'static [&'static str],
    languages: &'static [&'static str],
    lengths: &'static [&'static str],
}

/// The option lists for the generation form.
#[wasm_bindgen]
pub fn vocabularies() -> Result<JsValue, JsValue> {
    let vocab = Vocabularies {
        niches: NICHES,
        tones: TONES,
        audiences: AUDIENCES,
        formats: FORMATS,
        languages: LANGUAGES,
        lengths: LENGTHS,
    };
    Ok(to_js_value(&vocab)?)
}

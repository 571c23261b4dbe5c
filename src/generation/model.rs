//! Data models for a generation call.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// LANGUAGE
// =============================================================================

/// Script language. Unknown names are kept as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    Tamil,
    #[default]
    English,
    Thanglish,
    Other(String),
}

impl Language {
    /// Name as sent to the model.
    pub fn as_str(&self) -> &str {
        match self {
            Language::Tamil => "Tamil",
            Language::English => "English",
            Language::Thanglish => "Thanglish",
            Language::Other(name) => name,
        }
    }
}

impl From<&str> for Language {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tamil" => Language::Tamil,
            "english" => Language::English,
            "thanglish" => Language::Thanglish,
            _ => Language::Other(value.trim().to_string()),
        }
    }
}

impl From<String> for Language {
    fn from(value: String) -> Self {
        Language::from(value.as_str())
    }
}

impl From<Language> for String {
    fn from(value: Language) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// LENGTH
// =============================================================================

/// Target runtime bucket. Unknown names fall back to `Medium`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ScriptLength {
    Short,
    #[default]
    Medium,
    Long,
}

impl ScriptLength {
    /// Lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            ScriptLength::Short => "short",
            ScriptLength::Medium => "medium",
            ScriptLength::Long => "long",
        }
    }

    /// Duration range quoted in the prompt.
    pub fn duration_range(&self) -> &'static str {
        match self {
            ScriptLength::Short => "20-40 seconds",
            ScriptLength::Medium => "40-60 seconds",
            ScriptLength::Long => "60-90 seconds",
        }
    }

    /// Runtime estimate in seconds when the reply carries none.
    pub fn estimated_seconds(&self) -> u32 {
        match self {
            ScriptLength::Short => 30,
            ScriptLength::Medium => 45,
            ScriptLength::Long => 75,
        }
    }
}

impl From<&str> for ScriptLength {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" => ScriptLength::Short,
            "long" => ScriptLength::Long,
            _ => ScriptLength::Medium,
        }
    }
}

impl From<String> for ScriptLength {
    fn from(value: String) -> Self {
        ScriptLength::from(value.as_str())
    }
}

impl From<ScriptLength> for String {
    fn from(value: ScriptLength) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ScriptLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// GENERATION REQUEST
// =============================================================================

/// Form state for one generation call. Built fresh per call.
///
/// Audience is a set: order does not matter and duplicates collapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationRequest {
    #[serde(alias = "scriptInput")]
    pub raw_input: String,
    pub niche: String,
    pub audience: BTreeSet<String>,
    pub tone: String,
    pub language: Language,
    pub length: ScriptLength,
    pub format: String,
}

impl GenerationRequest {
    /// Creates a request for `raw_input` with the form's initial values.
    pub fn new(raw_input: impl Into<String>) -> Self {
        Self {
            raw_input: raw_input.into(),
            niche: String::new(),
            audience: BTreeSet::new(),
            tone: String::new(),
            language: Language::English,
            length: ScriptLength::Medium,
            format: "Instagram Reel".to_string(),
        }
    }

    /// Builder: Set niche.
    pub fn with_niche(mut self, niche: impl Into<String>) -> Self {
        self.niche = niche.into();
        self
    }

    /// Builder: Add audience entries. Blank entries are ignored.
    pub fn with_audience<I, S>(mut self, audience: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for entry in audience {
            self.add_audience(entry);
        }
        self
    }

    /// Builder: Set tone.
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// Builder: Set language.
    pub fn with_language(mut self, language: impl Into<Language>) -> Self {
        self.language = language.into();
        self
    }

    /// Builder: Set length.
    pub fn with_length(mut self, length: impl Into<ScriptLength>) -> Self {
        self.length = length.into();
        self
    }

    /// Builder: Set format.
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// Adds one audience entry; returns false if it was blank or present.
    pub fn add_audience(&mut self, entry: impl Into<String>) -> bool {
        let entry = entry.into();
        let entry = entry.trim();
        if entry.is_empty() {
            return false;
        }
        self.audience.insert(entry.to_string())
    }

    /// Toggles an audience entry the way the form's chips do.
    pub fn toggle_audience(&mut self, entry: &str) {
        if !self.audience.remove(entry.trim()) {
            self.add_audience(entry);
        }
    }
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self::new("")
    }
}

// =============================================================================
// GENERATION RESULT
// =============================================================================

/// Summary used when the reply carries none of its own.
pub const DEFAULT_SUMMARY: &str = "AI-generated script based on your input";

/// Everything one successful call produced. Replaced wholesale by the next.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerationResult {
    /// Script text, annotations and escapes included.
    pub script: String,
    pub shot_list: Vec<String>,
    pub bgm_suggestions: Vec<String>,
    pub cta_variants: Vec<String>,
    pub summary: String,
    /// Estimated runtime in seconds.
    pub estimated_time: u32,
}

impl GenerationResult {
    /// Creates a result holding only a script.
    pub fn new(script: impl Into<String>) -> Self {
        Self {
            script: script.into(),
            ..Self::default()
        }
    }

    /// Builder: Set shot list.
    pub fn with_shot_list(mut self, shots: Vec<String>) -> Self {
        self.shot_list = shots;
        self
    }

    /// Builder: Set BGM suggestions.
    pub fn with_bgm_suggestions(mut self, bgm: Vec<String>) -> Self {
        self.bgm_suggestions = bgm;
        self
    }

    /// Builder: Set CTA variants.
    pub fn with_cta_variants(mut self, ctas: Vec<String>) -> Self {
        self.cta_variants = ctas;
        self
    }

    /// Builder: Set summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    /// Builder: Set estimated runtime.
    pub fn with_estimated_time(mut self, seconds: u32) -> Self {
        self.estimated_time = seconds;
        self
    }

    /// Fills every auxiliary field with the stock suggestions for `request`.
    pub fn with_defaults_for(self, request: &GenerationRequest) -> Self {
        self.with_shot_list(default_shot_list())
            .with_bgm_suggestions(default_bgm_suggestions())
            .with_cta_variants(default_cta_variants(&request.language))
            .with_summary(DEFAULT_SUMMARY)
            .with_estimated_time(request.length.estimated_seconds())
    }
}

// =============================================================================
// DEFAULT SUGGESTIONS
// =============================================================================

/// Stock shot list.
pub fn default_shot_list() -> Vec<String> {
    to_owned_list(&[
        "Opening: Close-up with engaging expression",
        "Problem setup: Medium shot with gestures",
        "Solution demonstration: Screen recording or demo",
        "B-roll footage for visual interest",
        "Action shots showing results",
        "CTA: Direct to camera close-up",
    ])
}

/// Stock background music ideas.
pub fn default_bgm_suggestions() -> Vec<String> {
    to_owned_list(&[
        "Upbeat motivational track (no copyright)",
        "Trending beat with good energy",
        "Soft background music for storytelling",
        "High-energy track for action sequences",
    ])
}

/// Stock call-to-action lines in the script's language.
pub fn default_cta_variants(language: &Language) -> Vec<String> {
    match language {
        Language::Tamil => to_owned_list(&[
            "Comment pannunga - unga experience share pannunga!",
            "Save pannunga future reference kaga!",
            "Share pannunga friends kaga - help aagum!",
            "Follow pannunga more tips kaga!",
        ]),
        Language::Thanglish => to_owned_list(&[
            "Comment pannunga - your experience share pannunga!",
            "Save pannunga future reference kaga!",
            "Share pannunga friends kaga - help aagum!",
            "Follow pannunga more tips kaga!",
        ]),
        Language::English | Language::Other(_) => to_owned_list(&[
            "Comment below with your experience!",
            "Save this for future reference!",
            "Share with friends who need this!",
            "Follow for more tips and tricks!",
        ]),
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("Why hostel food hits different")
            .with_niche("College Life")
            .with_audience(["Gen Z", "Students", "Gen Z", "  "])
            .with_tone("Comedic")
            .with_language("thanglish")
            .with_length("short")
            .with_format("YouTube Shorts");

        assert_eq!(request.niche, "College Life");
        assert_eq!(request.audience.len(), 2);
        assert_eq!(request.language, Language::Thanglish);
        assert_eq!(request.length, ScriptLength::Short);
        assert_eq!(request.format, "YouTube Shorts");
    }

    #[test]
    fn test_audience_is_order_insensitive() {
        let a = GenerationRequest::new("x").with_audience(["Gen Z", "Millennials"]);
        let b = GenerationRequest::new("x").with_audience(["Millennials", "Gen Z"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_toggle_audience() {
        let mut request = GenerationRequest::new("x");
        request.toggle_audience("Gen Z");
        assert!(request.audience.contains("Gen Z"));
        request.toggle_audience("Gen Z");
        assert!(request.audience.is_empty());
    }

    #[test]
    fn test_language_accepts_free_strings() {
        assert_eq!(Language::from("Tamil"), Language::Tamil);
        assert_eq!(Language::from("Hindi"), Language::Other("Hindi".to_string()));
        assert_eq!(Language::from("Hindi").as_str(), "Hindi");
    }

    #[test]
    fn test_length_buckets() {
        assert_eq!(ScriptLength::from("short").estimated_seconds(), 30);
        assert_eq!(ScriptLength::from("medium").estimated_seconds(), 45);
        assert_eq!(ScriptLength::from("long").estimated_seconds(), 75);
        assert_eq!(ScriptLength::from("epic"), ScriptLength::Medium);
        assert_eq!(ScriptLength::Long.duration_range(), "60-90 seconds");
    }

    #[test]
    fn test_request_serde_camel_case() {
        let json = r#"{"scriptInput":"idea","audience":["b","a","a"],"language":"Tamil","length":"long","format":"TikTok"}"#;
        let request: GenerationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.raw_input, "idea");
        assert_eq!(request.audience.len(), 2);
        assert_eq!(request.language, Language::Tamil);
        assert_eq!(request.length, ScriptLength::Long);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["rawInput"], "idea");
        assert_eq!(value["length"], "long");
    }

    #[test]
    fn test_defaults_follow_language_and_length() {
        let request = GenerationRequest::new("x")
            .with_language(Language::Tamil)
            .with_length(ScriptLength::Long);
        let result = GenerationResult::new("script").with_defaults_for(&request);

        assert_eq!(result.shot_list.len(), 6);
        assert_eq!(result.bgm_suggestions.len(), 4);
        assert!(result.cta_variants[0].contains("unga"));
        assert_eq!(result.summary, DEFAULT_SUMMARY);
        assert_eq!(result.estimated_time, 75);
    }

    #[test]
    fn test_result_json_field_names() {
        let result = GenerationResult::new("s").with_estimated_time(30);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["estimatedTime"], 30);
        assert!(value["shotList"].is_array());
    }
}

//! Prompt construction for the generation gateway.

use super::model::GenerationRequest;

/// System message sent with every generation call.
pub const SYSTEM_PROMPT: &str = "You are an expert script writer specializing in creating engaging social media content scripts. You always respond with valid JSON containing the script and related metadata.";

/// Builds the user message: the form state as one instruction plus the JSON
/// shape and annotation conventions the reply should follow.
pub fn build_prompt(request: &GenerationRequest) -> String {
    let audience = if request.audience.is_empty() {
        "general audience".to_string()
    } else {
        request
            .audience
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        r#"Create a {tone} social media script for {format} in {language} language.

Target audience: {audience}
Niche: {niche}
Length: {range}
Topic/Input: {input}

Please respond with a JSON object containing:
{{
  "script": "The complete script with timing cues, pauses, and emphasis markers",
  "shotList": ["List of 5-6 shot suggestions for filming"],
  "bgmSuggestions": ["4 different background music suggestions"],
  "ctaVariants": ["4 different call-to-action variations"],
  "summary": "Brief description of the script content and approach",
  "estimatedTime": {seconds}
}}

For the script, use these formatting conventions:
- [HOOK] for opening hook
- [EMPH]text[/EMPH] for emphasis
- [pause: Xs] for timing pauses
- [BGM: description] for music cues
- [CAMERA: direction] for camera instructions

Make it engaging, authentic, and optimized for {format} format."#,
        tone = request.tone.to_lowercase(),
        format = request.format,
        language = request.language,
        audience = audience,
        niche = request.niche,
        range = request.length.duration_range(),
        input = request.raw_input,
        seconds = request.length.estimated_seconds(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::model::{Language, ScriptLength};

    #[test]
    fn test_prompt_carries_form_state() {
        let request = GenerationRequest::new("Monday motivation for interns")
            .with_niche("Career & Business")
            .with_audience(["Young Professionals", "College Students"])
            .with_tone("Motivational")
            .with_language(Language::Tamil)
            .with_length(ScriptLength::Long)
            .with_format("Instagram Reel");

        let prompt = build_prompt(&request);
        assert!(prompt.starts_with(
            "Create a motivational social media script for Instagram Reel in Tamil language."
        ));
        assert!(prompt.contains("Target audience: College Students, Young Professionals"));
        assert!(prompt.contains("Niche: Career & Business"));
        assert!(prompt.contains("Length: 60-90 seconds"));
        assert!(prompt.contains("Topic/Input: Monday motivation for interns"));
        assert!(prompt.contains("\"estimatedTime\": 75"));
        assert!(prompt.contains("[pause: Xs] for timing pauses"));
    }

    #[test]
    fn test_empty_audience_is_general() {
        let prompt = build_prompt(&GenerationRequest::new("x"));
        assert!(prompt.contains("Target audience: general audience"));
    }
}

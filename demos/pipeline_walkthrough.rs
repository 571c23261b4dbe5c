//! Walks one script through generation, the three views, a user edit and
//! export, using a canned gateway reply instead of the network.
//!
//! Run with: cargo run --example pipeline_walkthrough

use vibescript::{
    CompletionRequest, CompletionTransport, GenerationRequest, Language, MemoryStore,
    ScriptGenerator, ScriptLength, ScriptResult, SessionManager, View,
};

/// Replies the way a well-behaved model does.
struct CannedGateway;

impl CompletionTransport for CannedGateway {
    async fn complete(&self, _api_key: &str, request: &CompletionRequest) -> ScriptResult<String> {
        println!("--> {} ({} prompt chars)", request.model, request.prompt.len());
        Ok(serde_json::json!({
            "script": "[HOOK] Hostel food hits different at 2am. pause: 1s \
                       [CAMERA: slow zoom on the maggi] Nobody **plans** it! \
                       It just happens. [BGM: lo-fi beat] Tag your midnight buddy.",
            "shotList": ["Dark corridor", "Kettle close-up", "Friends laughing"],
            "bgmSuggestions": ["Lo-fi night beat"],
            "ctaVariants": ["Tag your midnight buddy!"],
            "summary": "A nostalgic late-night hostel moment",
            "estimatedTime": 32
        })
        .to_string())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ScriptResult<()> {
    let request = GenerationRequest::new("Why hostel food hits different at night")
        .with_niche("College Life")
        .with_audience(["College Students", "Gen Z"])
        .with_tone("Heartfelt")
        .with_language(Language::English)
        .with_length(ScriptLength::Short);

    let credentials = MemoryStore::new().with_value("sk-or-v1-demo");
    let generator = ScriptGenerator::new(CannedGateway);
    let result = generator.generate(&credentials, &request).await?;
    println!("summary: {} (~{}s)", result.summary, result.estimated_time);

    let mut session = SessionManager::new();
    for view in View::ALL {
        session.set_view(view)?;
        println!("\n== {} ==\n{}", view, session.render(&result.script)?.plain_text());
    }

    session.set_view(View::Performer)?;
    session.set_clean_override("Hostel food at 2am. Nothing else comes close.")?;
    println!("\n== performer (edited) ==\n{}", session.render(&result.script)?.plain_text());

    let bytes = session.save();
    let mut restored = SessionManager::from_bytes(&bytes)?;
    let artifact = restored.export(&result.script, "hostel-night")?;
    println!("\n{} ({} bytes)", artifact.file_name, artifact.contents.len());

    Ok(())
}

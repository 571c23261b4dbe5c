//! End to end: a gateway reply through generation, rendering, edits and export.

use std::cell::Cell;

use assert_matches::assert_matches;
use vibescript::{
    normalize, render_view, CompletionRequest, CompletionTransport, EditOverlay, FileStore,
    GenerationRequest, RenderedView, ScriptError, ScriptGenerator, ScriptLength, ScriptResult,
    SessionManager, TextStore, View,
};

struct FixedReply {
    content: &'static str,
    calls: Cell<usize>,
}

impl FixedReply {
    fn new(content: &'static str) -> Self {
        Self {
            content,
            calls: Cell::new(0),
        }
    }
}

impl CompletionTransport for FixedReply {
    async fn complete(&self, _api_key: &str, _request: &CompletionRequest) -> ScriptResult<String> {
        self.calls.set(self.calls.get() + 1);
        Ok(self.content.to_string())
    }
}

const STRUCTURED: &str = r#"{"script":"[HOOK] Stop scrolling. pause: 2s This changes **everything**! [CAMERA: zoom in] Ready? Let's go.","shotList":["Close-up"],"bgmSuggestions":["Upbeat"],"ctaVariants":["Follow!"],"summary":"Hook-first reel","estimatedTime":35}"#;

#[tokio::test]
async fn test_generate_then_render_all_views() {
    let dir = tempfile::tempdir().unwrap();
    let mut credentials = FileStore::new(dir.path().join("api_key"));
    credentials.set("sk-or-v1-0123456789abcdef").unwrap();

    let generator = ScriptGenerator::new(FixedReply::new(STRUCTURED));
    let request = GenerationRequest::new("A reel about focus").with_length(ScriptLength::Short);
    let result = generator.generate(&credentials, &request).await.unwrap();
    assert_eq!(result.estimated_time, 35);

    let clean = render_view(&result.script, None, View::Clean);
    assert_eq!(
        clean,
        RenderedView::Text(
            "Stop scrolling.\n\n(PAUSE)\n\nThis changes everything!\n\nReady?\n\nLet's go."
                .to_string()
        )
    );
    assert_eq!(render_view(&result.script, None, View::Performer), clean);

    let detailed = render_view(&result.script, None, View::Detailed);
    let RenderedView::Segments(segments) = detailed else {
        panic!("detailed view should be segments");
    };
    let annotations: Vec<_> = segments
        .iter()
        .filter(|s| s.is_annotation)
        .map(|s| s.text.as_str())
        .collect();
    assert_eq!(annotations, vec!["[HOOK]", "[CAMERA: zoom in]"]);
}

#[tokio::test]
async fn test_missing_key_file_blocks_dispatch() {
    let dir = tempfile::tempdir().unwrap();
    let credentials = FileStore::new(dir.path().join("api_key"));

    let generator = ScriptGenerator::new(FixedReply::new(STRUCTURED));
    let result = generator
        .generate(&credentials, &GenerationRequest::new("A reel about focus"))
        .await;

    assert_matches!(result, Err(ScriptError::MissingCredential));
    assert_eq!(generator.transport().calls.get(), 0);
}

#[tokio::test]
async fn test_plain_reply_gets_stock_suggestions() {
    let credentials = vibescript::MemoryStore::new().with_value("sk-or-v1-key");
    let generator = ScriptGenerator::new(FixedReply::new("Just say it plainly. Then stop."));
    let result = generator
        .generate(&credentials, &GenerationRequest::new("x"))
        .await
        .unwrap();

    assert_eq!(normalize(&result.script), "Just say it plainly. Then stop.");
    assert!(!result.shot_list.is_empty());
    assert!(!result.cta_variants.is_empty());
}

#[test]
fn test_edit_survives_reload_and_feeds_export() {
    let raw = STRUCTURED;
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.automerge");

    {
        let mut session = SessionManager::new();
        session.set_view(View::Performer).unwrap();
        session.set_clean_override("My version. Shorter.").unwrap();
        std::fs::write(&path, session.save()).unwrap();
    }

    let bytes = std::fs::read(&path).unwrap();
    let mut session = SessionManager::from_bytes(&bytes).unwrap();
    let artifact = session.export(raw, "").unwrap();
    assert_eq!(artifact.file_name, "vibe-script-performer.txt");
    assert_eq!(artifact.contents, "My version.\n\nShorter.");

    session.clear_clean_override().unwrap();
    let artifact = session.export(raw, "").unwrap();
    assert!(artifact.contents.starts_with("Stop scrolling.\n\n(PAUSE)"));
}

#[test]
fn test_file_backed_overlay() {
    let dir = tempfile::tempdir().unwrap();
    let mut overlay = EditOverlay::new(FileStore::new(dir.path().join("clean.txt")));

    let derived = normalize(STRUCTURED);
    assert_eq!(overlay.resolve(&derived), derived);

    overlay.set_override("Edited.").unwrap();
    let reopened = EditOverlay::new(FileStore::new(dir.path().join("clean.txt")));
    assert_eq!(reopened.resolve(&derived), "Edited.");

    overlay.clear_override().unwrap();
    assert_eq!(reopened.resolve(&derived), derived);
}

//! Vibescript CLI
//!
//! Generates short-form video scripts through OpenRouter and renders them as
//! clean, detailed or performer views.
//!
//! Usage:
//!   vibescript key set sk-or-v1-...
//!   vibescript generate --idea "Why hostel food hits different" --tone Comedic --language Thanglish
//!   vibescript view performer
//!   vibescript render --export

mod output;

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vibescript::generation::vocabulary::{self, is_known};
use vibescript::{
    mask_secret, FileStore, GatewayConfig, GenerationRequest, GenerationResult, Language,
    OpenRouterClient, ScriptGenerator, ScriptLength, SessionManager, TextStore, View,
};

const API_KEY_FILE: &str = "api_key";
const SESSION_FILE: &str = "session.automerge";
const LAST_RESULT_FILE: &str = "last-result.json";

#[derive(Parser)]
#[command(
    name = "vibescript",
    about = "Generate and render short-form video scripts",
    version
)]
struct Cli {
    /// Data directory for the API key, session and last result
    #[arg(long, env = "VIBESCRIPT_HOME", default_value = ".vibescript", global = true)]
    home: PathBuf,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Manage the OpenRouter API key
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },
    /// Generate a script from an idea
    Generate(GenerateArgs),
    /// Render the active view of a script
    Render(RenderArgs),
    /// Manage your edit of the clean script
    Edit {
        #[command(subcommand)]
        action: EditAction,
    },
    /// Show or switch the active view
    View {
        /// clean, detailed or performer
        view: Option<View>,
    },
    /// List the form options
    Options,
}

#[derive(Subcommand)]
enum KeyAction {
    /// Validate and store a key
    Set {
        /// API key (or set OPENROUTER_API_KEY env var)
        #[arg(env = "OPENROUTER_API_KEY", hide_env_values = true)]
        key: String,

        /// Store without checking it against the gateway
        #[arg(long)]
        no_validate: bool,

        #[command(flatten)]
        gateway: GatewayArgs,
    },
    /// Show the stored key, masked
    Show,
    /// Remove the stored key
    Clear,
}

#[derive(Subcommand)]
enum EditAction {
    /// Replace the clean script with your own text
    Set {
        /// Text of the edit; read from --file or stdin when omitted
        text: Option<String>,

        #[arg(short = 'f', long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Print the stored edit
    Show,
    /// Drop the edit and go back to the generated text
    Clear,
}

#[derive(Args)]
struct GatewayArgs {
    /// Gateway API root
    #[arg(long, env = "OPENROUTER_BASE_URL")]
    base_url: Option<String>,

    /// Model identifier
    #[arg(long, env = "VIBESCRIPT_MODEL")]
    model: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,
}

impl GatewayArgs {
    fn config(&self) -> GatewayConfig {
        let mut config = GatewayConfig::new();
        if let Some(ref base_url) = self.base_url {
            config = config.with_base_url(base_url);
        }
        if let Some(ref model) = self.model {
            config = config.with_model(model);
        }
        if let Some(timeout) = self.timeout {
            config = config.with_timeout_secs(timeout);
        }
        config
    }
}

#[derive(Args)]
struct GenerateArgs {
    /// Script idea or topic
    #[arg(short = 'i', long)]
    idea: String,

    #[arg(long, default_value = "")]
    niche: String,

    /// Target audience (repeatable)
    #[arg(short = 'a', long)]
    audience: Vec<String>,

    #[arg(long, default_value = "")]
    tone: String,

    #[arg(short = 'l', long, default_value = "English")]
    language: String,

    /// short, medium or long
    #[arg(long, default_value = "medium")]
    length: String,

    #[arg(long, default_value = "Instagram Reel")]
    format: String,

    /// Where to write the result JSON (defaults to the data directory)
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    #[command(flatten)]
    gateway: GatewayArgs,
}

#[derive(Args)]
struct RenderArgs {
    /// Result JSON or raw script; defaults to the last generated result
    #[arg(short = 'i', long)]
    input: Option<PathBuf>,

    /// Render this view instead of the active one
    #[arg(long)]
    view: Option<View>,

    /// Also write the view to `{target}-{view}.txt`
    #[arg(long)]
    export: bool,

    /// File name stem for --export
    #[arg(long, default_value = vibescript::pipeline::DEFAULT_EXPORT_TARGET)]
    target: String,

    /// Directory for --export
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "vibescript=debug"
    } else {
        "vibescript=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    match cli.command {
        Command::Key { action } => run_key(&cli.home, action).await,
        Command::Generate(args) => run_generate(&cli.home, args).await,
        Command::Render(args) => run_render(&cli.home, args),
        Command::Edit { action } => run_edit(&cli.home, action),
        Command::View { view } => run_view(&cli.home, view),
        Command::Options => {
            run_options();
            Ok(())
        }
    }
}

// =============================================================================
// COMMANDS
// =============================================================================

async fn run_key(home: &Path, action: KeyAction) -> Result<()> {
    let mut store = FileStore::new(home.join(API_KEY_FILE));
    match action {
        KeyAction::Set {
            key,
            no_validate,
            gateway,
        } => {
            let key = key.trim();
            if key.is_empty() {
                anyhow::bail!("API key is empty");
            }
            if !no_validate {
                let client = OpenRouterClient::new(gateway.config())?;
                let pb = output::spinner("Checking key...")?;
                let info = client.validate_key(key).await;
                pb.finish_and_clear();
                let info = info.context("Key was not accepted by the gateway")?;
                if let Some(label) = info.label {
                    tracing::info!(%label, "key accepted");
                }
            }
            store.set(key).context("Failed to store API key")?;
            output::success(&format!("Stored API key {}", mask_secret(key)));
        }
        KeyAction::Show => match store.get()? {
            Some(key) if !key.trim().is_empty() => println!("{}", mask_secret(key.trim())),
            _ => println!("No API key stored"),
        },
        KeyAction::Clear => {
            store.clear()?;
            output::success("API key removed");
        }
    }
    Ok(())
}

async fn run_generate(home: &Path, args: GenerateArgs) -> Result<()> {
    warn_unknown("niche", vocabulary::NICHES, &args.niche);
    warn_unknown("tone", vocabulary::TONES, &args.tone);
    warn_unknown("format", vocabulary::FORMATS, &args.format);
    warn_unknown("language", vocabulary::LANGUAGES, &args.language);
    warn_unknown("length", vocabulary::LENGTHS, &args.length);
    for entry in &args.audience {
        warn_unknown("audience", vocabulary::AUDIENCES, entry);
    }

    let request = GenerationRequest::new(args.idea)
        .with_niche(args.niche)
        .with_audience(args.audience)
        .with_tone(args.tone)
        .with_language(Language::from(args.language.as_str()))
        .with_length(ScriptLength::from(args.length.as_str()))
        .with_format(args.format);

    let credentials = FileStore::new(home.join(API_KEY_FILE));
    let config = args.gateway.config();
    let generator = ScriptGenerator::new(OpenRouterClient::new(config.clone())?).with_config(config);

    let pb = output::spinner("Generating script...")?;
    let result = generator.generate(&credentials, &request).await;
    pb.finish_and_clear();
    let result = result?;

    let output_path = args.output.unwrap_or_else(|| home.join(LAST_RESULT_FILE));
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&output_path, serde_json::to_string_pretty(&result)?)
        .context("Failed to write result")?;

    let mut session = load_session(home)?;
    if session.clean_override()?.is_some() {
        output::warn("Your edit of the clean script is still active; `vibescript edit clear` to see the new one");
    }
    let view = session.current_view()?;
    output::heading(&format!("Script ({})", view));
    output::print_view(&session.render(&result.script)?);
    output::print_result_details(&result);
    println!();
    output::success(&format!("Result saved to {}", output_path.display()));
    Ok(())
}

fn run_render(home: &Path, args: RenderArgs) -> Result<()> {
    let raw = read_script(home, args.input.as_deref())?;
    let mut session = load_session(home)?;
    if let Some(view) = args.view {
        session.set_view(view)?;
    }

    let view = session.current_view()?;
    output::heading(&format!("Script ({})", view));
    output::print_view(&session.render(&raw)?);

    if args.export {
        let artifact = session.export(&raw, &args.target)?;
        fs::create_dir_all(&args.out_dir)?;
        let path = args.out_dir.join(&artifact.file_name);
        fs::write(&path, &artifact.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        output::success(&format!("Exported {}", path.display()));
    }
    Ok(())
}

fn run_edit(home: &Path, action: EditAction) -> Result<()> {
    let mut session = load_session(home)?;
    match action {
        EditAction::Set { text, file } => {
            let text = match (text, file) {
                (Some(text), _) => text,
                (None, Some(path)) => {
                    let contents = fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    strip_final_newline(&contents).to_string()
                }
                (None, None) => {
                    let mut buf = String::new();
                    io::stdin().read_to_string(&mut buf)?;
                    strip_final_newline(&buf).to_string()
                }
            };
            session.set_clean_override(&text)?;
            save_session(home, &mut session)?;
            output::success("Edit stored");
        }
        EditAction::Show => match session.clean_override()? {
            Some(text) => println!("{}", text),
            None => println!("No edit stored"),
        },
        EditAction::Clear => {
            if session.clear_clean_override()? {
                save_session(home, &mut session)?;
                output::success("Edit removed");
            } else {
                println!("No edit stored");
            }
        }
    }
    Ok(())
}

fn run_view(home: &Path, view: Option<View>) -> Result<()> {
    let mut session = load_session(home)?;
    match view {
        Some(view) => {
            session.set_view(view)?;
            save_session(home, &mut session)?;
            output::success(&format!("Active view: {}", view));
        }
        None => println!("{}", session.current_view()?),
    }
    Ok(())
}

fn run_options() {
    let groups: [(&str, &[&str]); 6] = [
        ("Niches", vocabulary::NICHES),
        ("Tones", vocabulary::TONES),
        ("Audiences", vocabulary::AUDIENCES),
        ("Formats", vocabulary::FORMATS),
        ("Languages", vocabulary::LANGUAGES),
        ("Lengths", vocabulary::LENGTHS),
    ];
    for (title, entries) in groups {
        output::heading(title);
        for entry in entries {
            println!("  {}", entry);
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn warn_unknown(field: &str, vocab: &[&str], value: &str) {
    if !value.trim().is_empty() && !is_known(vocab, value) {
        output::warn(&format!("'{}' is not a listed {}; sending as is", value, field));
    }
}

/// Drops the one line terminator a file or piped stdin ends with.
fn strip_final_newline(text: &str) -> &str {
    text.strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .unwrap_or(text)
}

fn load_session(home: &Path) -> Result<SessionManager> {
    let path = home.join(SESSION_FILE);
    if !path.exists() {
        return Ok(SessionManager::new());
    }
    let bytes = fs::read(&path).context("Failed to read session")?;
    SessionManager::from_bytes(&bytes).context("Failed to load session")
}

fn save_session(home: &Path, session: &mut SessionManager) -> Result<()> {
    fs::create_dir_all(home)?;
    fs::write(home.join(SESSION_FILE), session.save()).context("Failed to write session")
}

/// Reads a result file; the script field is picked out during rendering.
fn read_script(home: &Path, input: Option<&Path>) -> Result<String> {
    let path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| home.join(LAST_RESULT_FILE));
    if !path.exists() {
        anyhow::bail!(
            "No script at {}. Run `vibescript generate` first or pass --input.",
            path.display()
        );
    }
    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    // Saved results carry the script as a field; keep the raw text otherwise
    match serde_json::from_str::<GenerationResult>(&contents) {
        Ok(result) if !result.script.is_empty() => Ok(result.script),
        _ => Ok(contents),
    }
}

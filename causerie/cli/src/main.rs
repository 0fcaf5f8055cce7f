//! Causerie CLI
//!
//! `causerie generate` converts every dialog description in the content
//! directory into one audio file; `causerie voices` prints the backend's
//! voice catalog filtered by language.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use causerie_lib::{
    BackendKind, EdgeBackend, GenerateConfig, GttsBackend, Pipeline, PolicyKind, RunSummary,
    SpeechBackend, VoiceCatalog, VoicePolicy,
};

/// Generate speech audio for dialog lessons
#[derive(Debug, Parser)]
#[command(name = "causerie")]
#[command(about = "Generate speech audio for dialog lessons", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert every dialog description in the content directory to audio.
    ///
    /// Dialogs whose output file already exists are skipped, so re-running
    /// only fills in what is missing.
    Generate {
        /// Directory holding dialog descriptions and the output tree.
        #[arg(long, default_value = "content", value_name = "DIR")]
        content_dir: PathBuf,

        /// Speech backend to drive (edge or gtts).
        #[arg(long, default_value = "edge", value_parser = parse_backend)]
        backend: BackendKind,

        /// Voice-selection policy (tagged or alternating).
        #[arg(long, default_value = "tagged", value_parser = parse_policy)]
        policy: PolicyKind,

        /// Voice catalog JSON file (tag to voice-identifier map).
        #[arg(long, value_name = "FILE")]
        voices: Option<PathBuf>,

        /// Silence inserted between sentences, in milliseconds.
        #[arg(long, default_value_t = 500)]
        silence_ms: u64,

        /// Fade-in and fade-out applied to each clip, in milliseconds.
        #[arg(long, default_value_t = 50)]
        fade_ms: u64,

        /// Timeout for a single synthesis call, in seconds.
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },

    /// Print the backend's voice catalog filtered by language.
    Voices {
        /// Language code prefix to filter on (e.g. fr, fr-FR, en).
        #[arg(long, default_value = "fr")]
        language: String,

        /// Speech backend to query (edge or gtts).
        #[arg(long, default_value = "edge", value_parser = parse_backend)]
        backend: BackendKind,
    },
}

fn parse_backend(name: &str) -> Result<BackendKind, String> {
    name.parse()
}

fn parse_policy(name: &str) -> Result<PolicyKind, String> {
    name.parse()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Generate {
            content_dir,
            backend,
            policy,
            voices,
            silence_ms,
            fade_ms,
            timeout_secs,
        } => {
            let catalog = match voices {
                Some(path) => VoiceCatalog::from_file(&path)?,
                None => VoiceCatalog::load_default()?,
            };
            let policy = match policy {
                PolicyKind::Tagged => VoicePolicy::Tagged(catalog),
                PolicyKind::Alternating => VoicePolicy::alternating_from(&catalog),
                _ => VoicePolicy::Tagged(catalog),
            };
            let config = GenerateConfig::new(content_dir)
                .with_policy(policy)
                .with_silence(Duration::from_millis(silence_ms))
                .with_fade(Duration::from_millis(fade_ms))
                .with_synthesis_timeout(Duration::from_secs(timeout_secs));

            let summary = match backend {
                BackendKind::Gtts => generate(GttsBackend::new(), config).await?,
                _ => generate(EdgeBackend::new(), config).await?,
            };

            println!("{summary}");
            if !summary.is_clean() {
                std::process::exit(1);
            }
        }

        Command::Voices { language, backend } => match backend {
            BackendKind::Gtts => print_voices(GttsBackend::new(), &language).await?,
            _ => print_voices(EdgeBackend::new(), &language).await?,
        },
    }

    Ok(())
}

async fn generate<B: SpeechBackend>(
    backend: B,
    config: GenerateConfig,
) -> Result<RunSummary, Box<dyn std::error::Error>> {
    let summary = Pipeline::new(backend, config).run().await?;
    if summary.failed > 0 {
        warn!(failed = summary.failed, "some dialogs failed");
    }
    Ok(summary)
}

async fn print_voices<B: SpeechBackend>(
    backend: B,
    language: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let voices = backend.list_voices().await?;

    let mut shown = 0usize;
    for voice in voices.iter().filter(|v| v.matches_language(language)) {
        println!("Name: {}", voice.name);
        println!("ShortName: {}", voice.identifier);
        println!("Gender: {}", voice.gender);
        println!("---");
        shown += 1;
    }

    if shown == 0 {
        println!("No voices matched language '{language}'.");
    }

    Ok(())
}

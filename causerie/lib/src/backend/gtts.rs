//! Google Translate speech via the `gtts-cli` tool.
//!
//! The alternate backend. Google TTS has no per-voice selection; the voice
//! identifier is a bare language code (`fr`, `en`, ...), so every sentence
//! of a dialog comes out in the same voice regardless of its tag.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::backend::SpeechBackend;
use crate::errors::SynthesisError;
use crate::types::{ClipFormat, VoiceInfo};

/// gTTS backend.
///
/// ## Installation
///
/// ```bash
/// pip install gTTS
/// ```
#[derive(Debug)]
pub struct GttsBackend {
    /// Cached connectivity status (set to false after a connectivity failure).
    connectivity_ok: AtomicBool,
}

impl Default for GttsBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for GttsBackend {
    fn clone(&self) -> Self {
        Self {
            connectivity_ok: AtomicBool::new(self.connectivity_ok.load(Ordering::Relaxed)),
        }
    }
}

impl GttsBackend {
    /// Binary name for detection and error messages.
    const BINARY: &'static str = "gtts-cli";

    /// Host probed for connectivity.
    const PROBE_HOST: &'static str = "translate.google.com:443";

    /// Create a new gTTS backend.
    pub fn new() -> Self {
        Self {
            connectivity_ok: AtomicBool::new(true),
        }
    }

    fn binary_path() -> PathBuf {
        which::which(Self::BINARY).unwrap_or_else(|_| PathBuf::from(Self::BINARY))
    }

    fn binary_exists() -> bool {
        which::which(Self::BINARY).is_ok()
    }

    async fn check_connectivity() -> bool {
        use tokio::net::TcpStream;
        use tokio::time::{timeout, Duration};

        let connect_future = TcpStream::connect(Self::PROBE_HOST);
        timeout(Duration::from_secs(2), connect_future)
            .await
            .map(|result| result.is_ok())
            .unwrap_or(false)
    }

    /// Parse a single line of `gtts-cli --all` output.
    ///
    /// The format is:
    ///
    /// ```text
    ///  fr: French
    ///  fr-ca: French (Canada)
    /// ```
    fn parse_voice_line(line: &str) -> Option<VoiceInfo> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        let (code, name) = line.split_once(':')?;
        let code = code.trim();
        let name = name.trim();
        if code.is_empty() || name.is_empty() {
            return None;
        }

        // gTTS does not distinguish gender; the language code doubles as
        // both identifier and locale.
        Some(
            VoiceInfo::new(name)
                .with_identifier(code)
                .with_locale(code),
        )
    }
}

impl SpeechBackend for GttsBackend {
    async fn synthesize(&self, text: &str, voice: &str, dest: &Path) -> Result<(), SynthesisError> {
        if !self.connectivity_ok.load(Ordering::Relaxed) {
            return Err(SynthesisError::Offline {
                binary: Self::BINARY.into(),
            });
        }

        debug!(
            backend = Self::BINARY,
            lang = voice,
            dest = %dest.display(),
            "synthesizing sentence"
        );

        let output = tokio::process::Command::new(Self::binary_path())
            .arg("--output")
            .arg(dest)
            .arg("--lang")
            .arg(voice)
            .arg(text)
            .output()
            .await
            .map_err(|e| SynthesisError::ProcessSpawnFailed {
                binary: Self::BINARY.into(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            if stderr.contains("Connection") || stderr.contains("Network") || stderr.contains("Timeout")
            {
                self.connectivity_ok.store(false, Ordering::Relaxed);
            }

            return Err(SynthesisError::ProcessFailed {
                binary: Self::BINARY.into(),
                text: text.to_string(),
                stderr: stderr.to_string(),
            });
        }

        Ok(())
    }

    /// List gTTS languages; each language is one catalog entry.
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SynthesisError> {
        let output = tokio::process::Command::new(Self::binary_path())
            .arg("--all")
            .output()
            .await
            .map_err(|e| SynthesisError::ProcessSpawnFailed {
                binary: Self::BINARY.into(),
                source: e,
            })?;

        if !output.status.success() {
            return Err(SynthesisError::VoiceEnumerationFailed {
                binary: Self::BINARY.into(),
                message: String::from_utf8_lossy(&output.stderr).to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let voices: Vec<VoiceInfo> = stdout.lines().filter_map(Self::parse_voice_line).collect();

        debug!(
            backend = Self::BINARY,
            voice_count = voices.len(),
            "enumerated gTTS languages"
        );

        Ok(voices)
    }

    async fn is_ready(&self) -> bool {
        if !Self::binary_exists() {
            return false;
        }

        let is_connected = Self::check_connectivity().await;
        self.connectivity_ok.store(is_connected, Ordering::Relaxed);
        is_connected
    }

    fn info(&self) -> &str {
        "gtts-cli - Google Translate speech, one voice per language (requires internet)"
    }

    fn clip_format(&self) -> ClipFormat {
        ClipFormat::Mp3
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Microsoft Edge neural voices via the `edge-tts` CLI.
//!
//! Drives the `edge-tts` command for synthesis (`--write-media`) and voice
//! enumeration (`--list-voices`). Requires network connectivity; voices are
//! addressed by short name, e.g. `fr-FR-DeniseNeural`.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::backend::SpeechBackend;
use crate::errors::SynthesisError;
use crate::types::{ClipFormat, VoiceInfo};

/// Edge neural TTS backend.
///
/// ## Installation
///
/// ```bash
/// pip install edge-tts
/// ```
///
/// ## Voice Selection
///
/// The `--voice` flag takes a short name such as `fr-FR-HenriNeural`.
/// `list_voices` enumerates the full catalog.
#[derive(Debug)]
pub struct EdgeBackend {
    /// Cached connectivity status (set to false after a connectivity failure).
    /// This provides a fast path to skip the backend when offline.
    connectivity_ok: AtomicBool,
}

impl Default for EdgeBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EdgeBackend {
    fn clone(&self) -> Self {
        Self {
            connectivity_ok: AtomicBool::new(self.connectivity_ok.load(Ordering::Relaxed)),
        }
    }
}

impl EdgeBackend {
    /// Binary name for detection and error messages.
    const BINARY: &'static str = "edge-tts";

    /// Host probed for connectivity (the Edge speech endpoint).
    const PROBE_HOST: &'static str = "speech.platform.bing.com:443";

    /// Create a new Edge backend.
    pub fn new() -> Self {
        Self {
            connectivity_ok: AtomicBool::new(true),
        }
    }

    /// Get the binary path for edge-tts.
    fn binary_path() -> PathBuf {
        which::which(Self::BINARY).unwrap_or_else(|_| PathBuf::from(Self::BINARY))
    }

    /// Check if the edge-tts binary exists.
    fn binary_exists() -> bool {
        which::which(Self::BINARY).is_ok()
    }

    /// Check network connectivity with a short TCP connect to the speech
    /// endpoint, without pulling in an HTTP client.
    async fn check_connectivity() -> bool {
        use tokio::net::TcpStream;
        use tokio::time::{timeout, Duration};

        let connect_future = TcpStream::connect(Self::PROBE_HOST);
        timeout(Duration::from_secs(2), connect_future)
            .await
            .map(|result| result.is_ok())
            .unwrap_or(false)
    }

    /// Parse one row of `edge-tts --list-voices` output.
    ///
    /// The output is a table:
    ///
    /// ```text
    /// Name                Gender    ContentCategories      VoicePersonalities
    /// ------------------  --------  ---------------------  ------------------
    /// fr-FR-DeniseNeural  Female    General                Friendly, Positive
    /// ```
    ///
    /// Returns `None` for the header, the separator, and unparsable lines.
    fn parse_voice_line(line: &str) -> Option<VoiceInfo> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('-') {
            return None;
        }

        let mut parts = line.split_whitespace();
        let name = parts.next()?;
        let gender = parts.next()?;

        if name == "Name" {
            return None; // header row
        }

        // Short names are locale-qualified: the locale is everything before
        // the final segment ("fr-FR-DeniseNeural" -> "fr-FR").
        let locale = name.rfind('-').map(|idx| &name[..idx])?;

        Some(
            VoiceInfo::new(name)
                .with_gender(gender)
                .with_locale(locale),
        )
    }
}

impl SpeechBackend for EdgeBackend {
    async fn synthesize(&self, text: &str, voice: &str, dest: &Path) -> Result<(), SynthesisError> {
        // Check cached connectivity status for fast fail
        if !self.connectivity_ok.load(Ordering::Relaxed) {
            return Err(SynthesisError::Offline {
                binary: Self::BINARY.into(),
            });
        }

        debug!(
            backend = Self::BINARY,
            voice = voice,
            dest = %dest.display(),
            "synthesizing sentence"
        );

        let output = tokio::process::Command::new(Self::binary_path())
            .arg("--voice")
            .arg(voice)
            .arg("--text")
            .arg(text)
            .arg("--write-media")
            .arg(dest)
            .output()
            .await
            .map_err(|e| SynthesisError::ProcessSpawnFailed {
                binary: Self::BINARY.into(),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);

            // Check for connectivity-related errors
            if stderr.contains("Connection")
                || stderr.contains("Network")
                || stderr.contains("getaddrinfo")
                || stderr.contains("Timeout")
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

    /// List the full Edge voice catalog.
    async fn list_voices(&self) -> Result<Vec<VoiceInfo>, SynthesisError> {
        let output = tokio::process::Command::new(Self::binary_path())
            .arg("--list-voices")
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
            "enumerated Edge voices"
        );

        Ok(voices)
    }

    /// Ready when the binary exists AND the speech endpoint is reachable.
    async fn is_ready(&self) -> bool {
        if !Self::binary_exists() {
            return false;
        }

        let is_connected = Self::check_connectivity().await;
        self.connectivity_ok.store(is_connected, Ordering::Relaxed);
        is_connected
    }

    fn info(&self) -> &str {
        "edge-tts - Microsoft Edge neural voices via CLI (requires internet)"
    }

    fn clip_format(&self) -> ClipFormat {
        ClipFormat::Mp3
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_backend_default() {
        let backend = EdgeBackend::default();
        assert!(backend.connectivity_ok.load(Ordering::Relaxed));
    }

    #[test]
    fn test_edge_backend_clone_keeps_connectivity() {
        let backend = EdgeBackend::new();
        backend.connectivity_ok.store(false, Ordering::Relaxed);

        let cloned = backend.clone();
        assert!(!cloned.connectivity_ok.load(Ordering::Relaxed));
    }

    #[test]
    fn test_info_and_format() {
        let backend = EdgeBackend::new();
        assert!(backend.info().contains("edge-tts"));
        assert_eq!(backend.clip_format(), ClipFormat::Mp3);
    }

    // ========================================================================
    // Voice line parsing tests
    // ========================================================================

    #[test]
    fn test_parse_voice_line_row() {
        let voice = EdgeBackend::parse_voice_line(
            "fr-FR-DeniseNeural                 Female    General                Friendly, Positive",
        )
        .unwrap();

        assert_eq!(voice.name, "fr-FR-DeniseNeural");
        assert_eq!(voice.identifier, "fr-FR-DeniseNeural");
        assert_eq!(voice.gender, "Female");
        assert_eq!(voice.locale, "fr-FR");
    }

    #[test]
    fn test_parse_voice_line_three_segment_locale() {
        let voice =
            EdgeBackend::parse_voice_line("zh-CN-liaoning-XiaobeiNeural  Female  Dialect  Humorous")
                .unwrap();
        assert_eq!(voice.locale, "zh-CN-liaoning");
    }

    #[test]
    fn test_parse_voice_line_skips_header_and_separator() {
        assert!(EdgeBackend::parse_voice_line(
            "Name                Gender    ContentCategories      VoicePersonalities"
        )
        .is_none());
        assert!(EdgeBackend::parse_voice_line(
            "------------------  --------  ---------------------  ------------------"
        )
        .is_none());
        assert!(EdgeBackend::parse_voice_line("").is_none());
        assert!(EdgeBackend::parse_voice_line("   ").is_none());
    }

    #[test]
    fn test_parse_voice_line_rejects_unqualified_name() {
        assert!(EdgeBackend::parse_voice_line("loneword Female").is_none());
        assert!(EdgeBackend::parse_voice_line("onlyname").is_none());
    }

    // ========================================================================
    // Voice parsing from sample output
    // ========================================================================

    const LIST_VOICES_SAMPLE: &str = "\
Name                               Gender    ContentCategories      VoicePersonalities
---------------------------------  --------  ---------------------  --------------------------------------
de-DE-KatjaNeural                  Female    General                Friendly, Positive
en-GB-RyanNeural                   Male      General                Friendly, Positive
en-US-AriaNeural                   Female    News, Novel            Positive, Confident
en-US-GuyNeural                    Male      News, Novel            Passion
fr-CA-AntoineNeural                Male      General                Friendly, Positive
fr-FR-DeniseNeural                 Female    General                Friendly, Positive
fr-FR-EloiseNeural                 Female    General                Friendly, Positive
fr-FR-HenriNeural                  Male      General                Friendly, Positive
fr-FR-RemyMultilingualNeural       Male      General                Friendly, Positive
fr-FR-VivienneMultilingualNeural   Female    General                Friendly, Positive
zh-CN-liaoning-XiaobeiNeural       Female    Dialect                Humorous
";

    #[test]
    fn test_parse_sample_catalog() {
        let voices: Vec<VoiceInfo> = LIST_VOICES_SAMPLE
            .lines()
            .filter_map(EdgeBackend::parse_voice_line)
            .collect();

        assert_eq!(voices.len(), 11);
        assert!(voices.iter().all(|v| !v.locale.is_empty()));
    }

    #[test]
    fn test_sample_catalog_french_filter() {
        let voices: Vec<VoiceInfo> = LIST_VOICES_SAMPLE
            .lines()
            .filter_map(EdgeBackend::parse_voice_line)
            .collect();

        let french: Vec<&VoiceInfo> = voices
            .iter()
            .filter(|v| v.matches_language("fr"))
            .collect();

        assert_eq!(french.len(), 6, "fr-FR and fr-CA voices expected");
        assert!(french.iter().any(|v| v.name == "fr-FR-HenriNeural"));
        assert!(french.iter().any(|v| v.name == "fr-CA-AntoineNeural"));
    }

    // ========================================================================
    // Integration tests (require edge-tts and internet)
    // ========================================================================

    #[tokio::test]
    async fn test_is_ready_does_not_panic() {
        // The result depends on whether edge-tts is installed and the
        // network is reachable; only the call itself is exercised here.
        let _is_ready = EdgeBackend::new().is_ready().await;
    }

    #[tokio::test]
    #[ignore] // Only run manually when edge-tts is installed
    async fn test_list_voices_integration() {
        let backend = EdgeBackend::new();
        let voices = backend.list_voices().await.unwrap();

        assert!(!voices.is_empty(), "Expected at least one voice");
        assert!(
            voices.iter().any(|v| v.matches_language("fr")),
            "Expected at least one French voice"
        );
    }

    #[tokio::test]
    #[ignore] // Requires internet and edge-tts - run manually
    async fn test_synthesize_integration() {
        let backend = EdgeBackend::new();
        if !backend.is_ready().await {
            eprintln!("Skipping test: edge-tts not ready");
            return;
        }

        let dir = tempfile::tempdir().expect("tempdir");
        let dest = dir.path().join("clip_000.mp3");
        backend
            .synthesize("Bonjour tout le monde.", "fr-FR-DeniseNeural", &dest)
            .await
            .expect("synthesis");
        assert!(dest.exists());
    }
}

//! Core types shared across the generation pipeline.
//!
//! This module defines:
//! - Voice-catalog entry metadata returned by backends
//! - The clip container format a backend emits
//! - Per-dialog outcome reporting and the aggregate run summary

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::DialogFailure;

// ============================================================================
// Clip Format
// ============================================================================

/// Container format of the transient clips a backend writes.
///
/// Compressed formats are decoded through ffmpeg before stitching;
/// WAV clips are read directly.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ClipFormat {
    /// MP3 format (what the network backends deliver).
    #[default]
    Mp3,
    /// WAV format (uncompressed, readable without transcoding).
    Wav,
}

impl ClipFormat {
    /// Returns the file extension for this clip format.
    pub fn extension(&self) -> &'static str {
        match self {
            ClipFormat::Mp3 => "mp3",
            ClipFormat::Wav => "wav",
        }
    }
}

// ============================================================================
// Voice Info
// ============================================================================

/// One entry of a backend's voice catalog.
///
/// ## Examples
///
/// ```
/// use causerie_lib::types::VoiceInfo;
///
/// let voice = VoiceInfo::new("fr-FR-DeniseNeural")
///     .with_gender("Female")
///     .with_locale("fr-FR");
///
/// assert!(voice.matches_language("fr"));
/// assert!(!voice.matches_language("en"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceInfo {
    /// Display name of the voice.
    pub name: String,
    /// Identifier the backend accepts for synthesis.
    pub identifier: String,
    /// Gender label as reported by the backend.
    pub gender: String,
    /// Locale tag (e.g. "fr-FR"). Empty when the backend does not report one.
    pub locale: String,
}

impl VoiceInfo {
    /// Create a new entry whose identifier defaults to the name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            identifier: name.clone(),
            name,
            gender: "Any".into(),
            locale: String::new(),
        }
    }

    /// Set the synthesis identifier.
    #[must_use]
    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = identifier.into();
        self
    }

    /// Set the gender label.
    #[must_use]
    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = gender.into();
        self
    }

    /// Set the locale tag.
    #[must_use]
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    /// True when this voice's locale begins with the given language code.
    pub fn matches_language(&self, code: &str) -> bool {
        self.locale.starts_with(code)
    }
}

// ============================================================================
// Dialog Outcome
// ============================================================================

/// What happened to a single dialog during a batch run.
#[non_exhaustive]
#[derive(Debug)]
pub enum DialogOutcome {
    /// An output file was written.
    Generated {
        /// The resolved output path.
        output: PathBuf,
        /// Duration of the assembled audio.
        duration: Duration,
        /// Number of sentences synthesized.
        sentences: usize,
    },
    /// The output file already existed; nothing was regenerated.
    SkippedExisting {
        /// The pre-existing output path.
        output: PathBuf,
    },
    /// The dialog declared no output path.
    SkippedNoAudioPath,
    /// The dialog declared no sentences.
    SkippedNoSentences,
    /// Every sentence was empty, so there was nothing to write.
    SkippedNothingSynthesized,
    /// Synthesis or clip processing failed; no output was written.
    Failed {
        /// The failure that aborted this dialog.
        error: DialogFailure,
    },
}

// ============================================================================
// Run Summary
// ============================================================================

/// Aggregate counts for one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Dialogs that produced a new output file.
    pub generated: usize,
    /// Dialogs skipped (existing output, missing fields, nothing to speak).
    pub skipped: usize,
    /// Dialogs that ended in a synthesis or clip-processing failure.
    pub failed: usize,
}

impl RunSummary {
    /// Record one dialog's outcome.
    pub fn record(&mut self, outcome: &DialogOutcome) {
        match outcome {
            DialogOutcome::Generated { .. } => self.generated += 1,
            DialogOutcome::Failed { .. } => self.failed += 1,
            _ => self.skipped += 1,
        }
    }

    /// True when no dialog failed.
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} generated, {} skipped, {} failed",
            self.generated, self.skipped, self.failed
        )
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clip_format_extension() {
        assert_eq!(ClipFormat::Mp3.extension(), "mp3");
        assert_eq!(ClipFormat::Wav.extension(), "wav");
    }

    #[test]
    fn test_voice_info_new_defaults() {
        let voice = VoiceInfo::new("fr-FR-HenriNeural");
        assert_eq!(voice.name, "fr-FR-HenriNeural");
        assert_eq!(voice.identifier, "fr-FR-HenriNeural");
        assert_eq!(voice.gender, "Any");
        assert!(voice.locale.is_empty());
    }

    #[test]
    fn test_voice_info_builder() {
        let voice = VoiceInfo::new("French")
            .with_identifier("fr")
            .with_gender("Female")
            .with_locale("fr");

        assert_eq!(voice.name, "French");
        assert_eq!(voice.identifier, "fr");
        assert_eq!(voice.gender, "Female");
        assert_eq!(voice.locale, "fr");
    }

    #[test]
    fn test_voice_info_matches_language() {
        let voice = VoiceInfo::new("fr-CA-AntoineNeural").with_locale("fr-CA");
        assert!(voice.matches_language("fr"));
        assert!(voice.matches_language("fr-CA"));
        assert!(!voice.matches_language("fr-FR"));
        assert!(!voice.matches_language("en"));
    }

    #[test]
    fn test_voice_info_serialization() {
        let voice = VoiceInfo::new("fr-FR-DeniseNeural")
            .with_gender("Female")
            .with_locale("fr-FR");

        let json = serde_json::to_string(&voice).unwrap();
        let deserialized: VoiceInfo = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, voice);
    }

    #[test]
    fn test_run_summary_record() {
        let mut summary = RunSummary::default();
        summary.record(&DialogOutcome::Generated {
            output: "out.mp3".into(),
            duration: Duration::from_secs(3),
            sentences: 2,
        });
        summary.record(&DialogOutcome::SkippedExisting {
            output: "out.mp3".into(),
        });
        summary.record(&DialogOutcome::SkippedNoAudioPath);
        summary.record(&DialogOutcome::SkippedNoSentences);

        assert_eq!(summary.generated, 1);
        assert_eq!(summary.skipped, 3);
        assert_eq!(summary.failed, 0);
        assert!(summary.is_clean());
    }

    #[test]
    fn test_run_summary_failed_is_not_clean() {
        let mut summary = RunSummary::default();
        summary.record(&DialogOutcome::Failed {
            error: crate::errors::SynthesisError::Offline {
                binary: "edge-tts".into(),
            }
            .into(),
        });

        assert_eq!(summary.failed, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn test_run_summary_display() {
        let summary = RunSummary {
            generated: 2,
            skipped: 1,
            failed: 0,
        };
        assert_eq!(summary.to_string(), "2 generated, 1 skipped, 0 failed");
    }
}

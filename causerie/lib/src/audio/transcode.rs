//! ffmpeg-backed transcoding between compressed clips and PCM.
//!
//! The network backends deliver MP3; stitching happens on PCM samples, and
//! the assembled result usually has to land in a compressed container
//! again. Both directions go through an `ffmpeg` subprocess, detected on
//! PATH like every other external binary.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use tracing::debug;

use crate::audio::{wav, AudioClip};
use crate::errors::AudioError;

/// Handle to the ffmpeg binary.
#[derive(Debug, Clone)]
pub struct Ffmpeg {
    binary: PathBuf,
}

impl Ffmpeg {
    /// Detect ffmpeg on PATH.
    pub fn detect() -> Result<Self, AudioError> {
        which::which("ffmpeg")
            .map(|binary| Self { binary })
            .map_err(|_| AudioError::FfmpegMissing)
    }

    /// Use a specific ffmpeg binary.
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Decode any container ffmpeg understands into a mono clip at the
    /// given sample rate.
    pub async fn decode(&self, src: &Path, sample_rate: u32) -> Result<AudioClip, AudioError> {
        let staging = staging_wav()?;

        debug!(src = %src.display(), sample_rate, "decoding clip to PCM");
        self.run(|cmd| {
            cmd.arg("-i")
                .arg(src)
                .arg("-ac")
                .arg("1")
                .arg("-ar")
                .arg(sample_rate.to_string())
                .arg("-f")
                .arg("wav")
                .arg(staging.path());
        })
        .await?;

        wav::read_wav(staging.path())
    }

    /// Encode a clip into `dest` using an explicit container format.
    ///
    /// The format must be passed explicitly because the destination may be
    /// a staging path whose extension says nothing about the container.
    pub async fn encode(&self, clip: &AudioClip, format: &str, dest: &Path) -> Result<(), AudioError> {
        let staging = staging_wav()?;
        wav::write_wav(staging.path(), clip)?;

        debug!(dest = %dest.display(), format, "encoding assembled audio");
        self.run(|cmd| {
            cmd.arg("-i")
                .arg(staging.path())
                .arg("-f")
                .arg(format)
                .arg(dest);
        })
        .await
    }

    async fn run(
        &self,
        configure: impl FnOnce(&mut tokio::process::Command),
    ) -> Result<(), AudioError> {
        let mut cmd = tokio::process::Command::new(&self.binary);
        cmd.arg("-hide_banner")
            .arg("-loglevel")
            .arg("error")
            .arg("-y")
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        configure(&mut cmd);

        let output = cmd
            .output()
            .await
            .map_err(|e| AudioError::FfmpegSpawnFailed { source: e })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(AudioError::FfmpegFailed {
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            })
        }
    }
}

/// Container format name for an output path, by extension.
///
/// ffmpeg cannot infer the container for staging paths, so the pipeline
/// derives it from the final destination and passes it explicitly.
pub fn container_format(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("wav") => "wav",
        Some("ogg") => "ogg",
        Some("flac") => "flac",
        // The dialog files conventionally declare .mp3 outputs.
        _ => "mp3",
    }
}

fn staging_wav() -> Result<tempfile::NamedTempFile, AudioError> {
    tempfile::Builder::new()
        .suffix(".wav")
        .tempfile()
        .map_err(|e| AudioError::Io {
            path: std::env::temp_dir(),
            source: e,
        })
}

// ============================================================================
// Tests
// ============================================================================

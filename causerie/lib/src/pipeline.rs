//! The batch generation pipeline.
//!
//! Processes dialogs strictly one at a time, sentences strictly in order.
//! Each dialog either completes fully, is skipped, or fails on its own;
//! only dialog parse errors and filesystem problems abort the whole run.
//!
//! Transient per-sentence clips live in a per-dialog temporary directory
//! that is removed on every exit path, and the assembled output is written
//! to a `.part` sibling and renamed into place so a crash never leaves a
//! half-written file behind.

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tracing::{debug, error, info, warn};

use crate::audio::transcode::container_format;
use crate::audio::{wav, AudioClip, Ffmpeg};
use crate::backend::SpeechBackend;
use crate::config::GenerateConfig;
use crate::dialog::{self, DialogSource};
use crate::errors::{AudioError, DialogFailure, PipelineError, SynthesisError};
use crate::types::{ClipFormat, DialogOutcome, RunSummary};

/// The batch generation pipeline.
pub struct Pipeline<B> {
    backend: B,
    config: GenerateConfig,
    ffmpeg: Option<Ffmpeg>,
}

impl<B: SpeechBackend> Pipeline<B> {
    /// Create a pipeline over a backend and configuration.
    ///
    /// ffmpeg is looked up on PATH once here; it is only required when the
    /// backend emits compressed clips or the outputs are compressed.
    pub fn new(backend: B, config: GenerateConfig) -> Self {
        Self {
            backend,
            config,
            ffmpeg: Ffmpeg::detect().ok(),
        }
    }

    /// Process every dialog in the content directory.
    ///
    /// Returns the aggregate summary. Dialog-scoped failures are recorded
    /// in the summary; only fatal errors surface as `Err`.
    pub async fn run(&self) -> Result<RunSummary, PipelineError> {
        let sources = dialog::load_dialogs(&self.config.content_dir)?;
        info!(
            count = sources.len(),
            content_dir = %self.config.content_dir.display(),
            "loaded dialog descriptions"
        );

        if !sources.is_empty() && !self.backend.is_ready().await {
            warn!(
                backend = self.backend.info(),
                "backend reports not ready; synthesis will likely fail"
            );
        }

        let mut summary = RunSummary::default();
        for source in &sources {
            let file = source.path.file_name().unwrap_or_default().to_string_lossy();
            let outcome = self.process_dialog(source).await?;
            match &outcome {
                DialogOutcome::Generated {
                    output,
                    duration,
                    sentences,
                } => info!(
                    dialog = %file,
                    output = %output.display(),
                    seconds = duration.as_secs_f64(),
                    sentences,
                    "generated audio"
                ),
                DialogOutcome::SkippedExisting { output } => info!(
                    dialog = %file,
                    output = %output.display(),
                    "output already exists, skipping"
                ),
                DialogOutcome::SkippedNoAudioPath => {
                    warn!(dialog = %file, "no audio output path declared, skipping")
                }
                DialogOutcome::SkippedNoSentences => {
                    warn!(dialog = %file, "no sentences, skipping")
                }
                DialogOutcome::SkippedNothingSynthesized => {
                    warn!(dialog = %file, "no sentence had text to speak, nothing written")
                }
                DialogOutcome::Failed { error } => {
                    error!(dialog = %file, error = %error, "dialog failed")
                }
            }
            summary.record(&outcome);
        }

        Ok(summary)
    }

    /// Process a single dialog from skip checks through persistence.
    async fn process_dialog(&self, source: &DialogSource) -> Result<DialogOutcome, PipelineError> {
        let Some(declared) = source.dialog.audio.as_deref() else {
            return Ok(DialogOutcome::SkippedNoAudioPath);
        };
        if source.dialog.sentences.is_empty() {
            return Ok(DialogOutcome::SkippedNoSentences);
        }

        let output = dialog::resolve_output_path(&self.config.content_dir, declared);

        // The idempotence check happens once, before any work begins.
        if output.exists() {
            return Ok(DialogOutcome::SkippedExisting { output });
        }

        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent).map_err(|e| PipelineError::CreateDir {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        match self.assemble(source).await {
            Ok(None) => Ok(DialogOutcome::SkippedNothingSynthesized),
            Ok(Some(clip)) => {
                let duration = clip.duration();
                let sentences = source.dialog.spoken_sentences().count();
                self.persist(&clip, &output).await?;
                Ok(DialogOutcome::Generated {
                    output,
                    duration,
                    sentences,
                })
            }
            Err(failure) => Ok(DialogOutcome::Failed { error: failure }),
        }
    }

    /// Synthesize and stitch one dialog's sentences.
    ///
    /// Returns `None` when no sentence qualified. All transient clips live
    /// in `workdir`, which is deleted when this function returns, on every
    /// path.
    async fn assemble(&self, source: &DialogSource) -> Result<Option<AudioClip>, DialogFailure> {
        let workdir = TempDir::new().map_err(|e| {
            DialogFailure::Audio(AudioError::Io {
                path: std::env::temp_dir(),
                source: e,
            })
        })?;

        let rate = self.config.sample_rate;
        let clip_format = self.backend.clip_format();
        let gap = AudioClip::silent(self.config.silence, rate);

        let mut assembled = AudioClip::empty(rate);
        let mut synthesized = 0usize;
        for (index, (text, sentence)) in source.dialog.spoken_sentences().enumerate() {
            let voice = self.config.policy.resolve(index, sentence);
            let clip_path = workdir
                .path()
                .join(format!("clip_{index:03}.{}", clip_format.extension()));

            debug!(index, voice = %voice, "synthesizing sentence");
            self.synthesize_with_timeout(text, voice, &clip_path).await?;

            let clip = self.load_clip(&clip_path, clip_format).await?;
            // The clip is in memory now; the workdir drop covers error paths.
            let _ = std::fs::remove_file(&clip_path);
            let clip = clip.fade_in(self.config.fade).fade_out(self.config.fade);

            // One gap before every sentence after the first.
            if synthesized > 0 {
                assembled.push(&gap);
            }
            assembled.push(&clip);
            synthesized += 1;
        }

        if synthesized == 0 {
            return Ok(None);
        }

        // Trailing silence after the last sentence.
        assembled.push(&gap);
        Ok(Some(assembled))
    }

    async fn synthesize_with_timeout(
        &self,
        text: &str,
        voice: &str,
        dest: &Path,
    ) -> Result<(), SynthesisError> {
        let timeout = self.config.synthesis_timeout;
        tokio::time::timeout(timeout, self.backend.synthesize(text, voice, dest))
            .await
            .map_err(|_| SynthesisError::Timeout {
                text: text.to_string(),
                seconds: timeout.as_secs(),
            })?
    }

    /// Read a transient clip into memory, decoding through ffmpeg when the
    /// backend emits a compressed container.
    async fn load_clip(&self, path: &Path, format: ClipFormat) -> Result<AudioClip, AudioError> {
        match format {
            ClipFormat::Wav => {
                let clip = wav::read_wav(path)?;
                if clip.sample_rate() != self.config.sample_rate {
                    return Err(AudioError::SampleRate {
                        path: path.to_path_buf(),
                        expected: self.config.sample_rate,
                        actual: clip.sample_rate(),
                    });
                }
                Ok(clip)
            }
            _ => {
                self.ffmpeg()?
                    .decode(path, self.config.sample_rate)
                    .await
            }
        }
    }

    /// Encode the assembled clip and move it into place atomically.
    async fn persist(&self, clip: &AudioClip, output: &Path) -> Result<(), PipelineError> {
        let part = part_path(output);
        let result = if container_format(output) == "wav" {
            wav::write_wav(&part, clip)
        } else {
            match self.ffmpeg() {
                Ok(ffmpeg) => ffmpeg.encode(clip, container_format(output), &part).await,
                Err(e) => Err(e),
            }
        };
        if let Err(source) = result {
            let _ = std::fs::remove_file(&part);
            return Err(PipelineError::Persist {
                path: output.to_path_buf(),
                source,
            });
        }

        std::fs::rename(&part, output).map_err(|e| PipelineError::Persist {
            path: output.to_path_buf(),
            source: AudioError::Io {
                path: part.clone(),
                source: e,
            },
        })
    }

    fn ffmpeg(&self) -> Result<&Ffmpeg, AudioError> {
        self.ffmpeg.as_ref().ok_or(AudioError::FfmpegMissing)
    }
}

/// Staging sibling for an output file (`lesson.mp3` -> `.lesson.mp3.part`).
fn part_path(output: &Path) -> PathBuf {
    let name = output.file_name().unwrap_or_default().to_string_lossy();
    output.with_file_name(format!(".{name}.part"))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_path_is_hidden_sibling() {
        let part = part_path(Path::new("/data/content/lessons/01.mp3"));
        assert_eq!(part, Path::new("/data/content/lessons/.01.mp3.part"));
    }

    #[test]
    fn test_part_path_flat_file() {
        let part = part_path(Path::new("intro.wav"));
        assert_eq!(part, Path::new(".intro.wav.part"));
    }
}

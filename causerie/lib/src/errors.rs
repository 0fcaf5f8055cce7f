//! Error types for dialog loading, synthesis, and audio processing.
//!
//! The taxonomy follows the batch tool's recovery rules: dialog parse and
//! filesystem errors abort the whole run, synthesis and clip-processing
//! errors abort only the dialog they occurred in.

use std::path::PathBuf;

/// Errors raised while loading dialog description files.
///
/// Both variants are fatal for the batch run.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum DialogError {
    /// A dialog file or the content directory could not be read.
    #[error("failed to read {path}")]
    Read {
        /// The file or directory that failed.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A dialog file is not valid JSON.
    #[error("{path} is not a valid dialog description")]
    Parse {
        /// The offending file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors raised by a speech backend.
///
/// Synthesis variants carry the offending text so the failure can be traced
/// back to the sentence that caused it.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    /// The backend binary is not installed or not on PATH.
    #[error("{binary} is not installed or not on PATH")]
    MissingBinary {
        /// The binary that was looked for.
        binary: String,
    },

    /// The backend process could not be spawned.
    #[error("failed to spawn {binary}")]
    ProcessSpawnFailed {
        /// The binary that failed to start.
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The backend process exited with a failure status.
    #[error("{binary} failed while synthesizing {text:?}: {stderr}")]
    ProcessFailed {
        /// The binary that failed.
        binary: String,
        /// The sentence text being synthesized.
        text: String,
        /// Captured standard error output.
        stderr: String,
    },

    /// The synthesis call exceeded the configured timeout.
    #[error("synthesis of {text:?} timed out after {seconds}s")]
    Timeout {
        /// The sentence text being synthesized.
        text: String,
        /// The timeout that elapsed.
        seconds: u64,
    },

    /// Network connectivity is unavailable (cached from an earlier probe).
    #[error("network connectivity unavailable for {binary}")]
    Offline {
        /// The backend binary that needs the network.
        binary: String,
    },

    /// The voice catalog could not be enumerated.
    #[error("voice enumeration via {binary} failed: {message}")]
    VoiceEnumerationFailed {
        /// The binary that was queried.
        binary: String,
        /// Description of the failure.
        message: String,
    },
}

/// Errors raised while decoding, encoding, or writing audio.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// WAV read or write failed.
    #[error("WAV error for {path}")]
    Wav {
        /// The WAV file involved.
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    /// ffmpeg is not installed or not on PATH.
    #[error("ffmpeg is not installed or not on PATH")]
    FfmpegMissing,

    /// ffmpeg could not be spawned.
    #[error("failed to spawn ffmpeg")]
    FfmpegSpawnFailed {
        #[source]
        source: std::io::Error,
    },

    /// ffmpeg exited with a failure status.
    #[error("ffmpeg failed: {stderr}")]
    FfmpegFailed {
        /// Captured standard error output.
        stderr: String,
    },

    /// A decoded clip does not match the pipeline sample rate.
    #[error("{path} has sample rate {actual}, expected {expected}")]
    SampleRate {
        /// The clip file involved.
        path: PathBuf,
        /// The pipeline sample rate.
        expected: u32,
        /// The rate found in the file.
        actual: u32,
    },

    /// Plain IO failure around a temporary or output file.
    #[error("audio io error at {path}")]
    Io {
        /// The file involved.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors raised while loading a voice catalog file.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read voice catalog {path}")]
    Read {
        /// The catalog file.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The catalog file is not valid JSON.
    #[error("{path} is not a valid voice catalog")]
    Parse {
        /// The catalog file.
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A failure that aborted a single dialog while the run continued.
#[derive(Debug, thiserror::Error)]
pub enum DialogFailure {
    /// The backend failed on one of the dialog's sentences.
    #[error(transparent)]
    Synthesis(#[from] SynthesisError),

    /// A transient clip could not be decoded or processed.
    #[error(transparent)]
    Audio(#[from] AudioError),
}

/// Fatal errors that abort the whole batch run.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Dialog enumeration or parsing failed.
    #[error(transparent)]
    Dialog(#[from] DialogError),

    /// An output directory could not be created.
    #[error("failed to create output directory {path}")]
    CreateDir {
        /// The directory that could not be created.
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The assembled audio could not be encoded or moved into place.
    #[error("failed to persist {path}")]
    Persist {
        /// The output path being written.
        path: PathBuf,
        #[source]
        source: AudioError,
    },
}

//! Causerie
//!
//! Batch conversion of structured dialog files into concatenated speech
//! audio, driven by an external text-to-speech backend.
//!
//! ## Features
//!
//! - **Dialog loading**: JSON dialog descriptions parsed from a content
//!   directory, one output audio file per dialog
//! - **Per-sentence voice selection**: tag-based lookup with a default
//!   fallback, or an alternating even/odd strategy
//! - **Multiple backends**: Microsoft Edge neural voices (`edge-tts`) and
//!   Google Translate speech (`gtts-cli`)
//! - **Audio stitching**: linear fades, fixed silence gaps, single-pass
//!   encode of the assembled clip
//! - **Idempotent batches**: dialogs whose output file already exists are
//!   skipped, so re-running only fills in what is missing
//!
//! ## Quick Start
//!
//! ```ignore
//! use causerie_lib::{EdgeBackend, GenerateConfig, Pipeline};
//!
//! let config = GenerateConfig::new("content");
//! let summary = Pipeline::new(EdgeBackend::new(), config).run().await?;
//! println!("{summary}");
//! ```
//!
//! ## Module Structure
//!
//! - [`dialog`] - Dialog descriptions and the content-directory loader
//! - [`voices`] - Voice catalog and the per-sentence selection policies
//! - [`backend`] - The `SpeechBackend` trait and its implementations
//! - [`audio`] - Clip model, WAV IO, and ffmpeg transcoding
//! - [`pipeline`] - The batch generation pipeline
//! - [`errors`] - Error types for every stage

pub mod audio;
pub mod backend;
pub mod config;
pub mod dialog;
pub mod errors;
pub mod pipeline;
pub mod types;
pub mod voices;

// Re-export main types at crate root for convenience
pub use audio::AudioClip;
pub use backend::{BackendKind, EdgeBackend, GttsBackend, SpeechBackend};
pub use config::{GenerateConfig, PolicyKind};
pub use dialog::{Dialog, DialogSource, Sentence};
pub use errors::{
    AudioError, CatalogError, DialogError, DialogFailure, PipelineError, SynthesisError,
};
pub use pipeline::Pipeline;
pub use types::{ClipFormat, DialogOutcome, RunSummary, VoiceInfo};
pub use voices::{VoiceCatalog, VoiceId, VoicePolicy};

//! The speech backend boundary.
//!
//! A backend turns one sentence of text into one transient audio clip and
//! can enumerate its voice catalog. Both operations suspend on an external
//! round trip (the backends here drive network-backed CLI tools).

pub mod edge;
pub mod gtts;

pub use edge::EdgeBackend;
pub use gtts::GttsBackend;

use std::path::Path;

use crate::errors::SynthesisError;
use crate::types::{ClipFormat, VoiceInfo};

/// Executor trait for speech backends.
///
/// ## Native Async Traits
///
/// Uses native Rust async functions in traits (AFIT); no `async-trait`
/// crate is needed. Implementations must be `Send + Sync`.
///
/// ## Examples
///
/// ```ignore
/// use causerie_lib::{SpeechBackend, EdgeBackend};
///
/// let backend = EdgeBackend::new();
/// backend.synthesize("Bonjour", "fr-FR-DeniseNeural", &dest).await?;
/// ```
pub trait SpeechBackend: Send + Sync {
    /// Synthesize `text` with the given voice identifier into `dest`.
    ///
    /// Writes a transient clip file at `dest`; the caller owns its cleanup.
    fn synthesize(
        &self,
        text: &str,
        voice: &str,
        dest: &Path,
    ) -> impl std::future::Future<Output = Result<(), SynthesisError>> + Send;

    /// Enumerate the backend's full voice catalog.
    fn list_voices(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<VoiceInfo>, SynthesisError>> + Send;

    /// Whether the backend can be used right now (binary present, network
    /// reachable where required).
    fn is_ready(&self) -> impl std::future::Future<Output = bool> + Send;

    /// Human-readable backend description.
    fn info(&self) -> &str;

    /// Container format of the clips this backend writes.
    fn clip_format(&self) -> ClipFormat;
}

/// Which backend implementation to drive.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendKind {
    /// Microsoft Edge neural voices via the `edge-tts` CLI.
    #[default]
    Edge,
    /// Google Translate speech via the `gtts-cli` tool.
    Gtts,
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "edge" | "edge-tts" | "edge_tts" => Ok(BackendKind::Edge),
            "gtts" | "gtts-cli" | "google" => Ok(BackendKind::Gtts),
            other => Err(format!(
                "unknown backend '{other}' (expected 'edge' or 'gtts')"
            )),
        }
    }
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Edge => write!(f, "edge"),
            BackendKind::Gtts => write!(f, "gtts"),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

//! Generation configuration.
//!
//! All of the knobs the original scripts kept as module-level globals,
//! gathered into one explicit value passed to the pipeline entry point.

use std::path::PathBuf;
use std::time::Duration;

use crate::voices::VoicePolicy;

/// Default gap inserted between sentences.
pub const DEFAULT_SILENCE: Duration = Duration::from_millis(500);
/// Default fade applied to both ends of each clip.
pub const DEFAULT_FADE: Duration = Duration::from_millis(50);
/// Default pipeline sample rate (what the Edge voices deliver).
pub const DEFAULT_SAMPLE_RATE: u32 = 24_000;
/// Default timeout for a single synthesis call.
pub const DEFAULT_SYNTHESIS_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for one batch generation run.
///
/// ## Examples
///
/// ```
/// use std::time::Duration;
/// use causerie_lib::GenerateConfig;
///
/// let config = GenerateConfig::new("content")
///     .with_silence(Duration::from_millis(500))
///     .with_fade(Duration::from_millis(50));
/// ```
#[derive(Debug, Clone)]
pub struct GenerateConfig {
    /// Directory holding dialog description files and the output tree.
    pub content_dir: PathBuf,
    /// The per-sentence voice decision.
    pub policy: VoicePolicy,
    /// Gap inserted before every sentence after the first.
    pub silence: Duration,
    /// Fade-in and fade-out applied to every clip.
    pub fade: Duration,
    /// Sample rate all clips are decoded to.
    pub sample_rate: u32,
    /// Timeout for a single synthesis call.
    pub synthesis_timeout: Duration,
}

impl GenerateConfig {
    /// Create a configuration for the given content directory, with every
    /// other option at its default.
    pub fn new(content_dir: impl Into<PathBuf>) -> Self {
        Self {
            content_dir: content_dir.into(),
            policy: VoicePolicy::default(),
            silence: DEFAULT_SILENCE,
            fade: DEFAULT_FADE,
            sample_rate: DEFAULT_SAMPLE_RATE,
            synthesis_timeout: DEFAULT_SYNTHESIS_TIMEOUT,
        }
    }

    /// Set the voice-selection policy.
    #[must_use]
    pub fn with_policy(mut self, policy: VoicePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the inter-sentence silence gap.
    #[must_use]
    pub fn with_silence(mut self, silence: Duration) -> Self {
        self.silence = silence;
        self
    }

    /// Set the clip fade duration.
    #[must_use]
    pub fn with_fade(mut self, fade: Duration) -> Self {
        self.fade = fade;
        self
    }

    /// Set the pipeline sample rate.
    #[must_use]
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the per-call synthesis timeout.
    #[must_use]
    pub fn with_synthesis_timeout(mut self, timeout: Duration) -> Self {
        self.synthesis_timeout = timeout;
        self
    }
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self::new("content")
    }
}

/// Named voice-selection strategy, for configuration surfaces.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PolicyKind {
    /// Tag lookup with default fallback.
    #[default]
    Tagged,
    /// Even/odd alternation by sentence index.
    Alternating,
}

impl std::str::FromStr for PolicyKind {
    type Err = String;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "tagged" | "tag" => Ok(PolicyKind::Tagged),
            "alternating" | "alternate" | "parity" => Ok(PolicyKind::Alternating),
            other => Err(format!(
                "unknown voice policy '{other}' (expected 'tagged' or 'alternating')"
            )),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = GenerateConfig::default();
        assert_eq!(config.content_dir, PathBuf::from("content"));
        assert_eq!(config.silence, Duration::from_millis(500));
        assert_eq!(config.fade, Duration::from_millis(50));
        assert_eq!(config.sample_rate, 24_000);
        assert_eq!(config.synthesis_timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_config_builder() {
        let config = GenerateConfig::new("/tmp/lessons")
            .with_silence(Duration::from_millis(250))
            .with_fade(Duration::from_millis(20))
            .with_sample_rate(44_100)
            .with_synthesis_timeout(Duration::from_secs(5));

        assert_eq!(config.content_dir, PathBuf::from("/tmp/lessons"));
        assert_eq!(config.silence, Duration::from_millis(250));
        assert_eq!(config.fade, Duration::from_millis(20));
        assert_eq!(config.sample_rate, 44_100);
        assert_eq!(config.synthesis_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_policy_kind_parse() {
        assert_eq!("tagged".parse::<PolicyKind>().unwrap(), PolicyKind::Tagged);
        assert_eq!(
            "Alternating".parse::<PolicyKind>().unwrap(),
            PolicyKind::Alternating
        );
        assert_eq!(
            "parity".parse::<PolicyKind>().unwrap(),
            PolicyKind::Alternating
        );
        assert!("random".parse::<PolicyKind>().is_err());
    }
}

//! Voice catalog and per-sentence voice selection.
//!
//! A [`VoiceCatalog`] maps symbolic voice tags to backend voice identifiers
//! with a default fallback. A [`VoicePolicy`] turns (sentence index,
//! sentence) into a voice identifier and is a pure, stateless decision with
//! no memory of prior sentences.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dialog::Sentence;
use crate::errors::CatalogError;

/// A backend voice identifier (e.g. an Edge short name).
pub type VoiceId = String;

/// Default voice for the "male" tag.
pub const DEFAULT_MALE_VOICE: &str = "fr-FR-HenriNeural";
/// Default voice for the "female" tag, also the fallback voice.
pub const DEFAULT_FEMALE_VOICE: &str = "fr-FR-DeniseNeural";
/// Default voice for the "child" tag.
pub const DEFAULT_CHILD_VOICE: &str = "fr-FR-EloiseNeural";

/// File name of the user voice catalog, looked up in the home directory.
const CATALOG_FILE_NAME: &str = ".causerie-voices.json";

// ============================================================================
// Voice Catalog
// ============================================================================

/// Mapping from voice tag to backend voice identifier.
///
/// Unknown or absent tags resolve to the default identifier.
///
/// ## Examples
///
/// ```
/// use causerie_lib::voices::VoiceCatalog;
///
/// let catalog = VoiceCatalog::new("fr-FR-DeniseNeural")
///     .with_voice("male", "fr-FR-HenriNeural");
///
/// assert_eq!(catalog.resolve(Some("male")), "fr-FR-HenriNeural");
/// assert_eq!(catalog.resolve(Some("robot")), "fr-FR-DeniseNeural");
/// assert_eq!(catalog.resolve(None), "fr-FR-DeniseNeural");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCatalog {
    /// Tag to voice-identifier mapping.
    #[serde(default)]
    map: HashMap<String, VoiceId>,
    /// Fallback identifier for absent or unrecognized tags.
    default: VoiceId,
}

impl VoiceCatalog {
    /// Create a catalog with only a default voice.
    pub fn new(default: impl Into<VoiceId>) -> Self {
        Self {
            map: HashMap::new(),
            default: default.into(),
        }
    }

    /// Map a tag to a voice identifier.
    #[must_use]
    pub fn with_voice(mut self, tag: impl Into<String>, voice: impl Into<VoiceId>) -> Self {
        self.map.insert(tag.into(), voice.into());
        self
    }

    /// Resolve a tag to a voice identifier, falling back to the default.
    pub fn resolve(&self, tag: Option<&str>) -> &VoiceId {
        tag.and_then(|tag| self.map.get(tag)).unwrap_or(&self.default)
    }

    /// Look a tag up without the default fallback.
    pub fn get(&self, tag: &str) -> Option<&VoiceId> {
        self.map.get(tag)
    }

    /// The fallback voice identifier.
    pub fn default_voice(&self) -> &VoiceId {
        &self.default
    }

    /// Load a catalog from a JSON file.
    ///
    /// The file shape mirrors the serde representation:
    ///
    /// ```json
    /// { "map": { "male": "fr-FR-HenriNeural" }, "default": "fr-FR-DeniseNeural" }
    /// ```
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|e| CatalogError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&contents).map_err(|e| CatalogError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Path of the per-user catalog file (`~/.causerie-voices.json`).
    ///
    /// Returns `None` if the home directory cannot be determined.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(CATALOG_FILE_NAME))
    }

    /// Load the per-user catalog if one exists, else the built-in defaults.
    pub fn load_default() -> Result<Self, CatalogError> {
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }
}

impl Default for VoiceCatalog {
    /// The French voice set the tool ships with.
    fn default() -> Self {
        Self::new(DEFAULT_FEMALE_VOICE)
            .with_voice("male", DEFAULT_MALE_VOICE)
            .with_voice("female", DEFAULT_FEMALE_VOICE)
            .with_voice("child", DEFAULT_CHILD_VOICE)
    }
}

// ============================================================================
// Voice Policy
// ============================================================================

/// The per-sentence voice decision.
///
/// Both strategies are pure functions of the sentence index and the
/// sentence itself; neither remembers prior sentences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoicePolicy {
    /// Look the sentence's `voice_type` tag up in the catalog, falling back
    /// to the catalog's default identifier.
    Tagged(VoiceCatalog),
    /// Alternate two voices by sentence-index parity.
    Alternating {
        /// Voice for even sentence indices (0, 2, 4, ...).
        even: VoiceId,
        /// Voice for odd sentence indices (1, 3, 5, ...).
        odd: VoiceId,
    },
}

impl VoicePolicy {
    /// Build an alternating policy from a catalog.
    ///
    /// The "male" and "female" tags supply the two voices; missing tags
    /// fall back to the catalog default.
    pub fn alternating_from(catalog: &VoiceCatalog) -> Self {
        let even = catalog.resolve(Some("male")).clone();
        let odd = catalog.resolve(Some("female")).clone();
        Self::Alternating { even, odd }
    }

    /// Resolve the voice for one sentence.
    pub fn resolve(&self, index: usize, sentence: &Sentence) -> &VoiceId {
        match self {
            VoicePolicy::Tagged(catalog) => catalog.resolve(sentence.voice_type.as_deref()),
            VoicePolicy::Alternating { even, odd } => {
                if index % 2 == 0 {
                    even
                } else {
                    odd
                }
            }
        }
    }
}

impl Default for VoicePolicy {
    fn default() -> Self {
        Self::Tagged(VoiceCatalog::default())
    }
}

// ============================================================================
// Tests
// ============================================================================

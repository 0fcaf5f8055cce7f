//! Dialog descriptions and the content-directory loader.
//!
//! One JSON file per dialog, discovered non-recursively in the content
//! directory:
//!
//! ```json
//! { "audio": "content/lessons/01.mp3",
//!   "sentences": [ { "french": "Bonjour", "voice_type": "female" } ] }
//! ```
//!
//! The declared `audio` path conventionally carries a `content/` prefix;
//! the loader strips it and resolves the remainder under the content
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::DialogError;

/// File extension of dialog description files.
pub const DIALOG_EXTENSION: &str = "json";

/// Prefix conventionally carried by declared output paths.
pub const OUTPUT_PATH_PREFIX: &str = "content/";

/// One line of dialog text with an optional voice tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    /// The text to synthesize. Sentences without it are skipped entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub french: Option<String>,
    /// Symbolic voice tag ("male", "female", "child", ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_type: Option<String>,
}

impl Sentence {
    /// The sentence's speakable text, if any.
    ///
    /// Returns `None` when the `french` field is absent or blank, which
    /// excludes the sentence from synthesis and from duration counting.
    pub fn text(&self) -> Option<&str> {
        self.french
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

/// One lesson unit: an ordered sentence list and a target audio file.
///
/// Immutable after parse. Other fields present in dialog files (titles,
/// translations) are ignored here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialog {
    /// Declared output path, conventionally prefixed with `content/`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    /// The dialog's sentences, in playback order.
    #[serde(default)]
    pub sentences: Vec<Sentence>,
}

impl Dialog {
    /// Sentences that will actually be spoken, paired with their text.
    pub fn spoken_sentences(&self) -> impl Iterator<Item = (&str, &Sentence)> {
        self.sentences
            .iter()
            .filter_map(|sentence| sentence.text().map(|text| (text, sentence)))
    }
}

/// A parsed dialog together with the file it came from.
#[derive(Debug, Clone)]
pub struct DialogSource {
    /// The dialog description file.
    pub path: PathBuf,
    /// The parsed dialog.
    pub dialog: Dialog,
}

/// Load every dialog description from the content directory.
///
/// Only `*.json` files directly inside `content_dir` are considered, sorted
/// by file name for a deterministic processing order. A file that is not
/// valid JSON is a fatal error carrying the offending path.
pub fn load_dialogs(content_dir: &Path) -> Result<Vec<DialogSource>, DialogError> {
    let entries = std::fs::read_dir(content_dir).map_err(|e| DialogError::Read {
        path: content_dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| DialogError::Read {
            path: content_dir.to_path_buf(),
            source: e,
        })?;
        let path = entry.path();
        let is_dialog = path.is_file()
            && path
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case(DIALOG_EXTENSION));
        if is_dialog {
            files.push(path);
        }
    }
    files.sort();

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let contents = std::fs::read_to_string(&path).map_err(|e| DialogError::Read {
            path: path.clone(),
            source: e,
        })?;
        let dialog: Dialog = serde_json::from_str(&contents).map_err(|e| DialogError::Parse {
            path: path.clone(),
            source: e,
        })?;
        debug!(
            file = %path.display(),
            sentences = dialog.sentences.len(),
            "parsed dialog description"
        );
        sources.push(DialogSource { path, dialog });
    }

    Ok(sources)
}

/// Resolve a declared output path under the content directory.
///
/// Strips the literal `content/` prefix when present and joins the
/// remainder onto `content_dir`.
pub fn resolve_output_path(content_dir: &Path, declared: &str) -> PathBuf {
    let relative = declared.strip_prefix(OUTPUT_PATH_PREFIX).unwrap_or(declared);
    content_dir.join(relative)
}

// ============================================================================
// Tests
// ============================================================================

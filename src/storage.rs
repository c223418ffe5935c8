//! Artifact persistence: filename generation and writes to the output directory.

use std::path::PathBuf;

use crate::error::GenError;

/// Kind of generated artifact, used as the filename prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// A still image.
    Image,
    /// An animated video container.
    Video,
}

impl ArtifactKind {
    /// Filename prefix for this kind.
    #[must_use]
    pub fn prefix(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }
}

/// Writes encoded artifacts under a predictable output directory and returns
/// their paths as storage locators.
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    root: PathBuf,
}

impl ArtifactStore {
    /// Create a store rooted at the given directory. The directory is
    /// created lazily on first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Persist artifact bytes and return the written path.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory cannot be created or the
    /// file cannot be written.
    pub fn save(
        &self,
        kind: ArtifactKind,
        prompt: &str,
        extension: &str,
        data: &[u8],
    ) -> Result<PathBuf, GenError> {
        std::fs::create_dir_all(&self.root)?;
        let path = self.root.join(artifact_filename(kind, prompt, extension));
        std::fs::write(&path, data)?;
        Ok(path)
    }
}

/// Generate an artifact filename from its kind, prompt, and extension.
///
/// Combines the kind prefix, a kebab-case slug of the first 40 prompt
/// characters, a unix timestamp, and an 8-character random token. The token
/// keeps names unique when multiple artifacts land in the same second.
#[must_use]
pub fn artifact_filename(kind: ArtifactKind, prompt: &str, extension: &str) -> String {
    let slug = sanitize_for_filename(prompt, 40);
    let timestamp = chrono::Utc::now().timestamp();
    let token = uuid::Uuid::new_v4().simple().to_string();
    format!("{}-{slug}-{timestamp}-{}.{extension}", kind.prefix(), &token[..8])
}

/// Sanitize a string for use in a filename.
///
/// Converts to lowercase, replaces non-alphanumeric chars with hyphens,
/// collapses consecutive hyphens, and trims to max length.
#[must_use]
pub fn sanitize_for_filename(input: &str, max_len: usize) -> String {
    let mut result = String::with_capacity(max_len);
    let mut last_was_hyphen = true; // Prevents leading hyphen

    for ch in input.chars().take(max_len * 2) {
        if result.len() >= max_len {
            break;
        }
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            result.push('-');
            last_was_hyphen = true;
        }
    }

    // Trim trailing hyphen
    while result.ends_with('-') {
        result.pop();
    }

    if result.is_empty() {
        "untitled".to_string()
    } else {
        result
    }
}

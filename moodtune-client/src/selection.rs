//! File selection and staging
//!
//! A candidate is accepted only when its declared content type is `image/*`.
//! Accepted files are encoded into a `data:` URL off the async executor
//! before they count as staged.

use crate::error::SelectionError;
use base64::{engine::general_purpose, Engine as _};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// A file offered by the user (picker or drag-and-drop), not yet validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    /// Declared MIME type, e.g. `image/png`
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Build a candidate from a file on disk
    ///
    /// The content type is sniffed from magic bytes, falling back to the
    /// file extension, then `application/octet-stream`.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());
        let content_type = detect_content_type(&bytes, path);
        Ok(Self {
            name,
            content_type,
            bytes,
        })
    }

    pub fn is_image(&self) -> bool {
        self.content_type
            .trim()
            .to_ascii_lowercase()
            .starts_with("image/")
    }
}

fn detect_content_type(bytes: &[u8], path: &Path) -> String {
    if let Some(kind) = infer::get(bytes) {
        return kind.mime_type().to_string();
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
    .to_string()
}

/// A validated image ready for submission, with its preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    name: String,
    content_type: String,
    bytes: Arc<[u8]>,
    preview: Arc<str>,
}

impl StagedFile {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Renderable `data:<type>;base64,...` URL
    pub fn preview(&self) -> &str {
        &self.preview
    }
}

/// Reject anything whose declared content type is not an image
pub fn validate(candidate: CandidateFile) -> Result<CandidateFile, SelectionError> {
    if candidate.is_image() {
        Ok(candidate)
    } else {
        debug!(
            name = %candidate.name,
            content_type = %candidate.content_type,
            "Rejected non-image selection"
        );
        Err(SelectionError::InvalidFileType {
            content_type: candidate.content_type,
        })
    }
}

/// Encode a validated candidate into a staged file
///
/// Runs the base64 encoding on the blocking pool so large images do not
/// stall other work on the event loop.
pub async fn stage(candidate: CandidateFile) -> Result<StagedFile, SelectionError> {
    let CandidateFile {
        name,
        content_type,
        bytes,
    } = candidate;

    let mime = content_type.trim().to_string();
    let (bytes, preview) = tokio::task::spawn_blocking(move || {
        let encoded = general_purpose::STANDARD.encode(&bytes);
        let preview = format!("data:{};base64,{}", mime, encoded);
        (bytes, preview)
    })
    .await
    .map_err(|e| SelectionError::PreviewFailed(e.to_string()))?;

    debug!(name = %name, size = bytes.len(), "Staged image");

    Ok(StagedFile {
        name,
        content_type: content_type.trim().to_string(),
        bytes: Arc::from(bytes),
        preview: Arc::from(preview),
    })
}

/// Validate then stage
pub async fn select(candidate: CandidateFile) -> Result<StagedFile, SelectionError> {
    stage(validate(candidate)?).await
}

//! Host capabilities for reading picked files and writing the clipboard.

use crate::error::{BlobError, BlobResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// A file the user picked, as handed over by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Reads the file the user picked.
pub trait FileSource {
    fn read_file(&self) -> BlobResult<PickedFile>;
}

impl FileSource for PickedFile {
    fn read_file(&self) -> BlobResult<PickedFile> {
        Ok(self.clone())
    }
}

/// Writes text to the system clipboard.
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> BlobResult<()>;
}

/// A file on disk, typed by its extension.
#[derive(Debug, Clone)]
pub struct PathFileSource {
    path: PathBuf,
}

impl PathFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl FileSource for PathFileSource {
    fn read_file(&self) -> BlobResult<PickedFile> {
        let bytes = std::fs::read(&self.path)?;
        let name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or(BlobError::NoFile)?;
        debug!(file = %name, size = bytes.len(), "read picked file");
        Ok(PickedFile {
            mime_type: mime_type_for(&self.path).to_string(),
            name,
            bytes,
        })
    }
}

/// MIME type guessed from a file extension.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "txt" => "text/plain",
        _ => crate::data_url::DEFAULT_MIME_TYPE,
    }
}

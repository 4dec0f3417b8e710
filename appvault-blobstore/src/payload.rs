//! Conversions between picked files and the data URLs kept in records.

use crate::data_url::{decode_data_url, encode_data_url};
use crate::error::{BlobError, BlobResult};
use crate::size::format_file_size;
use crate::source::FileSource;
use appvault_types::UploadedFile;
use serde::Serialize;
use tracing::{info, warn};

pub const PDF_MIME_TYPE: &str = "application/pdf";

/// A stored file turned back into bytes for saving to disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DownloadedFile {
    pub file_name: String,
    pub mime_type: String,
    #[serde(skip)]
    pub bytes: Vec<u8>,
}

/// Reads the picked file and converts it for a new PDF record.
///
/// Anything not typed `application/pdf` is rejected.
pub fn prepare_pdf_upload(source: &dyn FileSource) -> BlobResult<UploadedFile> {
    let file = source.read_file()?;
    if file.mime_type != PDF_MIME_TYPE {
        warn!(file = %file.name, mime = %file.mime_type, "rejected non-PDF upload");
        return Err(BlobError::UnsupportedType {
            expected: PDF_MIME_TYPE,
            actual: file.mime_type,
        });
    }
    let size = format_file_size(file.bytes.len() as u64);
    info!(file = %file.name, size = %size, "PDF prepared for upload");
    Ok(UploadedFile {
        data_url: encode_data_url(&file.mime_type, &file.bytes),
        name: file.name,
        size,
    })
}

/// Reads the picked image and returns it as a profile avatar data URL.
pub fn prepare_avatar(source: &dyn FileSource) -> BlobResult<String> {
    let file = source.read_file()?;
    if !file.mime_type.starts_with("image/") {
        return Err(BlobError::UnsupportedType {
            expected: "image/*",
            actual: file.mime_type,
        });
    }
    Ok(encode_data_url(&file.mime_type, &file.bytes))
}

/// Rebuilds the named file from its stored data URL.
pub fn download(file_name: &str, data_url: &str) -> BlobResult<DownloadedFile> {
    let decoded = decode_data_url(data_url)?;
    Ok(DownloadedFile {
        file_name: file_name.to_string(),
        mime_type: decoded.mime_type,
        bytes: decoded.bytes,
    })
}

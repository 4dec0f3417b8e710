//! `data:<mime>;base64,<payload>` text encoding of file contents.

use crate::error::{BlobError, BlobResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;

/// MIME type used when a data URL names none.
pub const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// Encodes `bytes` as a base64 data URL of type `mime_type`.
pub fn encode_data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        DEFAULT_MIME_TYPE
    } else {
        mime_type
    };
    format!("data:{mime_type};base64,{}", STANDARD.encode(bytes))
}

/// A decoded data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

/// Splits a base64 data URL into its MIME type and payload bytes.
///
/// Parameters between the type and `;base64` (e.g. `;name=x.pdf`) are
/// ignored. Non-base64 data URLs are rejected.
pub fn decode_data_url(url: &str) -> BlobResult<DataUrl> {
    let rest = url.trim().strip_prefix("data:").ok_or(BlobError::InvalidDataUrl)?;
    let (header, payload) = rest.split_once(',').ok_or(BlobError::InvalidDataUrl)?;
    let mut params = header.split(';');
    let mime_type = match params.next() {
        Some(m) if !m.is_empty() => m.to_string(),
        _ => DEFAULT_MIME_TYPE.to_string(),
    };
    if !params.any(|p| p.eq_ignore_ascii_case("base64")) {
        return Err(BlobError::InvalidDataUrl);
    }
    let bytes = STANDARD.decode(payload.trim())?;
    Ok(DataUrl { mime_type, bytes })
}

//! File payloads stored inline in records.
//!
//! Uploaded PDFs and avatar images are kept as `data:` URLs inside the
//! record that owns them; there is no separate blob storage. This crate
//! converts between the host's picked files and that text form, rebuilds
//! files for download, and formats human-readable sizes.

mod data_url;
mod error;
mod payload;
mod size;
mod source;

pub use data_url::{decode_data_url, encode_data_url, DataUrl, DEFAULT_MIME_TYPE};
pub use error::{BlobError, BlobResult};
pub use payload::{download, prepare_avatar, prepare_pdf_upload, DownloadedFile, PDF_MIME_TYPE};
pub use size::format_file_size;
pub use source::{mime_type_for, ClipboardWriter, FileSource, PathFileSource, PickedFile};

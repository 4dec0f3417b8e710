//! Core record types for App Vault.
//!
//! Defines the persisted shape of every entity (links, PDFs, passwords,
//! tasks and the profile singleton), the typed request structs used to
//! create and update them, and the calendar/clock helpers shared by the
//! storage and activity crates.
//!
//! Persisted field names follow the camelCase JSON layout written by the
//! browser build of App Vault, so collections saved there load unchanged.

mod category;
mod error;
mod id;
mod models;
mod requests;
mod time;

pub use category::{LinkCategory, PasswordCategory, PdfCategory, TaskCategory};
pub use error::{ValidationError, ValidationResult};
pub use id::new_record_id;
pub use models::{
    Link, PasswordEntry, Pdf, Priority, Profile, Record, RecordKind, SocialLinks, Task,
};
pub use requests::{
    normalize_url, parse_tags, CreateLinkRequest, CreatePasswordRequest, CreatePdfRequest,
    CreateTaskRequest, UpdateLinkRequest, UpdatePasswordRequest, UpdatePdfRequest,
    UpdateProfileRequest, UpdateTaskRequest, UploadedFile,
};
pub use time::{calendar_day, Clock, FixedClock, SystemClock};

//! Typed create/update requests.
//!
//! Each request is validated before a repository touches storage. Applying
//! an update never changes a record's `id` or `created_at`.

use crate::category::{LinkCategory, PasswordCategory, PdfCategory, TaskCategory};
use crate::error::{ValidationError, ValidationResult};
use crate::models::{Link, PasswordEntry, Pdf, Priority, Profile, Task};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Splits a comma-separated tag string, trimming and dropping empties.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prefixes `https://` unless the url already starts with `http`.
pub fn normalize_url(url: &str) -> String {
    let url = url.trim();
    if url.starts_with("http") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

fn require(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        Err(ValidationError::EmptyField(field))
    } else {
        Ok(())
    }
}

fn require_email(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.is_empty() || value.contains('@') {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            field,
            value: value.to_string(),
        })
    }
}

// ============================================================================
// Links
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateLinkRequest {
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: LinkCategory,
}

impl CreateLinkRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require("title", &self.title)?;
        require("url", &self.url)
    }

    pub fn into_link(self, id: String, now: DateTime<Utc>) -> Link {
        Link {
            id,
            title: self.title.trim().to_string(),
            url: normalize_url(&self.url),
            description: self.description,
            tags: self.tags,
            category: self.category,
            created_at: Some(now),
        }
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateLinkRequest {
    pub title: Option<String>,
    pub url: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<LinkCategory>,
}

impl UpdateLinkRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        if let Some(url) = &self.url {
            require("url", url)?;
        }
        Ok(())
    }

    pub fn apply(self, link: &mut Link) {
        if let Some(title) = self.title {
            link.title = title.trim().to_string();
        }
        if let Some(url) = self.url {
            link.url = normalize_url(&url);
        }
        if let Some(description) = self.description {
            link.description = description;
        }
        if let Some(tags) = self.tags {
            link.tags = tags;
        }
        if let Some(category) = self.category {
            link.category = category;
        }
    }
}

// ============================================================================
// PDFs
// ============================================================================

/// A file picked for upload, already converted to a data URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedFile {
    pub name: String,
    /// Human-readable size, e.g. `"2.4 MB"`.
    pub size: String,
    pub data_url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePdfRequest {
    /// Falls back to the file name without `.pdf` when blank.
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub category: PdfCategory,
    pub file: Option<UploadedFile>,
}

impl CreatePdfRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        let file = self.file.as_ref().ok_or(ValidationError::MissingFile)?;
        if self.title.trim().is_empty() {
            require("title", &default_pdf_title(&file.name))?;
        }
        Ok(())
    }

    pub fn into_pdf(self, id: String, now: DateTime<Utc>) -> ValidationResult<Pdf> {
        let file = self.file.ok_or(ValidationError::MissingFile)?;
        let title = match self.title.trim() {
            "" => default_pdf_title(&file.name),
            title => title.to_string(),
        };
        Ok(Pdf {
            id,
            title,
            file_name: file.name,
            file_size: file.size,
            description: self.description,
            tags: self.tags,
            category: self.category,
            created_at: Some(now),
            file_data: file.data_url,
        })
    }
}

fn default_pdf_title(file_name: &str) -> String {
    file_name.replacen(".pdf", "", 1)
}

/// Metadata-only update; the stored file is never replaced.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePdfRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<PdfCategory>,
}

impl UpdatePdfRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        match &self.title {
            Some(title) => require("title", title),
            None => Ok(()),
        }
    }

    pub fn apply(self, pdf: &mut Pdf) {
        if let Some(title) = self.title {
            pdf.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            pdf.description = description;
        }
        if let Some(tags) = self.tags {
            pdf.tags = tags;
        }
        if let Some(category) = self.category {
            pdf.category = category;
        }
    }
}

// ============================================================================
// Passwords
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreatePasswordRequest {
    pub title: String,
    pub username: String,
    pub secret: String,
    pub website: String,
    pub notes: String,
    pub category: PasswordCategory,
}

impl CreatePasswordRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require("title", &self.title)?;
        require("password", &self.secret)
    }

    pub fn into_entry(self, id: String, now: DateTime<Utc>) -> PasswordEntry {
        PasswordEntry {
            id,
            title: self.title.trim().to_string(),
            username: self.username,
            secret: self.secret,
            website: self.website,
            notes: self.notes,
            category: self.category,
            created_at: Some(now),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdatePasswordRequest {
    pub title: Option<String>,
    pub username: Option<String>,
    pub secret: Option<String>,
    pub website: Option<String>,
    pub notes: Option<String>,
    pub category: Option<PasswordCategory>,
}

impl UpdatePasswordRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        if let Some(secret) = &self.secret {
            require("password", secret)?;
        }
        Ok(())
    }

    pub fn apply(self, entry: &mut PasswordEntry) {
        if let Some(title) = self.title {
            entry.title = title.trim().to_string();
        }
        if let Some(username) = self.username {
            entry.username = username;
        }
        if let Some(secret) = self.secret {
            entry.secret = secret;
        }
        if let Some(website) = self.website {
            entry.website = website;
        }
        if let Some(notes) = self.notes {
            entry.notes = notes;
        }
        if let Some(category) = self.category {
            entry.category = category;
        }
    }
}

// ============================================================================
// Tasks
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub category: TaskCategory,
}

impl CreateTaskRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require("title", &self.title)
    }

    /// New tasks always start pending.
    pub fn into_task(self, id: String, now: DateTime<Utc>) -> Task {
        Task {
            id,
            title: self.title.trim().to_string(),
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            category: self.category,
            completed_at: None,
            created_at: Some(now),
        }
    }
}

/// Edits task details. Completion is only changed by toggling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<NaiveDate>>,
    pub priority: Option<Priority>,
    pub category: Option<TaskCategory>,
}

impl UpdateTaskRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        match &self.title {
            Some(title) => require("title", title),
            None => Ok(()),
        }
    }

    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = title.trim().to_string();
        }
        if let Some(description) = self.description {
            task.description = description;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Replaces the whole profile.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    pub profile: Profile,
}

impl UpdateProfileRequest {
    pub fn validate(&self) -> ValidationResult<()> {
        require_email("email", &self.profile.email)?;
        require_email("socialLinks.email", &self.profile.social_links.email)
    }

    pub fn into_profile(self) -> Profile {
        self.profile
    }
}

//! Persisted entity records.

use crate::category::{LinkCategory, PasswordCategory, PdfCategory, TaskCategory};
use chrono::{DateTime, NaiveDate, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// The list-shaped entity types. The profile is a singleton and has no kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Link,
    Pdf,
    Password,
    Task,
}

/// A record stored in an entity collection.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const KIND: RecordKind;

    fn id(&self) -> &str;

    /// Creation instant. `None` only for records written without one.
    fn created_at(&self) -> Option<DateTime<Utc>>;
}

// ============================================================================
// Link
// ============================================================================

/// A saved bookmark.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Link {
    pub id: String,
    pub title: String,
    pub url: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: LinkCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for Link {
    const KIND: RecordKind = RecordKind::Link;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

// ============================================================================
// PDF
// ============================================================================

/// A PDF document stored inline as a data URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pdf {
    pub id: String,
    pub title: String,
    pub file_name: String,
    /// Human-readable size, e.g. `"1.5 MB"`.
    pub file_size: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub category: PdfCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// `data:application/pdf;base64,...`
    pub file_data: String,
}

impl Record for Pdf {
    const KIND: RecordKind = RecordKind::Pdf;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

// ============================================================================
// Password
// ============================================================================

/// A stored credential.
///
/// In memory `secret` is plaintext; the password repository obfuscates it
/// before the collection is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordEntry {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub username: String,
    #[serde(rename = "password")]
    pub secret: String,
    #[serde(default)]
    pub website: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub category: PasswordCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Record for PasswordEntry {
    const KIND: RecordKind = RecordKind::Password;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

// ============================================================================
// Task
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A to-do item.
///
/// Completion is a single optional instant, so a task can never be
/// completed without a completion time or carry one while pending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "TaskRecord", into = "TaskRecord")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub description: String,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
    pub category: TaskCategory,
    pub completed_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Task {
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }

    /// Marks the task done at `at`, or reopens it if it was done.
    pub fn toggle_completed(&mut self, at: DateTime<Utc>) {
        self.completed_at = match self.completed_at {
            Some(_) => None,
            None => Some(at),
        };
    }
}

impl Record for Task {
    const KIND: RecordKind = RecordKind::Task;

    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }
}

/// Wire shape of a task: separate `completed` flag and `completedAt`,
/// empty string for "no due date".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TaskRecord {
    id: String,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    due_date: String,
    #[serde(default)]
    priority: Priority,
    #[serde(default)]
    category: TaskCategory,
    #[serde(default)]
    completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
}

impl From<TaskRecord> for Task {
    fn from(raw: TaskRecord) -> Self {
        let completed_at = match (raw.completed, raw.completed_at) {
            (true, Some(at)) => Some(at),
            (true, None) => {
                if raw.created_at.is_none() {
                    tracing::warn!(task_id = %raw.id, "completed task has no timestamps, loading as pending");
                }
                raw.created_at
            }
            (false, _) => None,
        };
        let due_date = match raw.due_date.trim() {
            "" => None,
            text => parse_due_date(text, &raw.id),
        };
        Task {
            id: raw.id,
            title: raw.title,
            description: raw.description,
            due_date,
            priority: raw.priority,
            category: raw.category,
            completed_at,
            created_at: raw.created_at,
        }
    }
}

impl From<Task> for TaskRecord {
    fn from(task: Task) -> Self {
        TaskRecord {
            completed: task.completed_at.is_some(),
            completed_at: task.completed_at,
            due_date: task
                .due_date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            id: task.id,
            title: task.title,
            description: task.description,
            priority: task.priority,
            category: task.category,
            created_at: task.created_at,
        }
    }
}

/// Accepts `yyyy-mm-dd` and full RFC 3339 timestamps.
fn parse_due_date(text: &str, task_id: &str) -> Option<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(text) {
        return Some(instant.date_naive());
    }
    tracing::warn!(task_id, due_date = text, "unparseable due date dropped");
    None
}

// ============================================================================
// Profile
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub github: String,
    pub linkedin: String,
    pub twitter: String,
    pub instagram: String,
    pub website: String,
    pub email: String,
}

/// The singleton user profile.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub bio: String,
    /// Image as a data URL, empty when unset.
    pub avatar: String,
    pub social_links: SocialLinks,
}

impl Profile {
    /// Initials of the display name, `"U"` when there is no name.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .collect();
        if initials.is_empty() {
            "U".to_string()
        } else {
            initials
        }
    }
}

//! Case-insensitive text search with an optional category filter.

use appvault_types::{
    Link, LinkCategory, PasswordCategory, PasswordEntry, Pdf, PdfCategory, Task, TaskCategory,
};

/// A record that can be matched against a lowercase search needle.
pub trait Searchable {
    type Category: PartialEq + Copy;

    /// `needle` is already lowercased.
    fn matches_text(&self, needle: &str) -> bool;

    fn category(&self) -> Self::Category;
}

/// Search text plus category; `None` category means all categories.
#[derive(Debug, Clone)]
pub struct RecordQuery<C> {
    pub text: String,
    pub category: Option<C>,
}

impl<C> Default for RecordQuery<C> {
    fn default() -> Self {
        Self {
            text: String::new(),
            category: None,
        }
    }
}

impl<C> RecordQuery<C> {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: None,
        }
    }

    pub fn in_category(mut self, category: C) -> Self {
        self.category = Some(category);
        self
    }
}

/// Records matching both the text and the category of `query`.
pub fn filter_records<T>(records: Vec<T>, query: &RecordQuery<T::Category>) -> Vec<T>
where
    T: Searchable,
{
    let needle = query.text.to_lowercase();
    records
        .into_iter()
        .filter(|r| query.category.is_none_or(|c| r.category() == c))
        .filter(|r| r.matches_text(&needle))
        .collect()
}

fn contains(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn any_tag(tags: &[String], needle: &str) -> bool {
    tags.iter().any(|t| contains(t, needle))
}

impl Searchable for Link {
    type Category = LinkCategory;

    fn matches_text(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.description, needle)
            || any_tag(&self.tags, needle)
    }

    fn category(&self) -> LinkCategory {
        self.category
    }
}

impl Searchable for Pdf {
    type Category = PdfCategory;

    fn matches_text(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.description, needle)
            || any_tag(&self.tags, needle)
    }

    fn category(&self) -> PdfCategory {
        self.category
    }
}

impl Searchable for PasswordEntry {
    type Category = PasswordCategory;

    fn matches_text(&self, needle: &str) -> bool {
        contains(&self.title, needle)
            || contains(&self.username, needle)
            || contains(&self.website, needle)
    }

    fn category(&self) -> PasswordCategory {
        self.category
    }
}

impl Searchable for Task {
    type Category = TaskCategory;

    fn matches_text(&self, needle: &str) -> bool {
        contains(&self.title, needle) || contains(&self.description, needle)
    }

    fn category(&self) -> TaskCategory {
        self.category
    }
}

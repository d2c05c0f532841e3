//! Diary entry model.
//!
//! An entry is persisted as an [`EntryFields`] set keyed by its id. Backends attach the id and
//! their revision token when materialising an [`Entry`] for callers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The user-visible fields of an entry, without identity metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryFields {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    pub entry_date: DateTime<Utc>,
}

/// A stored entry as returned by the store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub rev: String,
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    pub entry_date: DateTime<Utc>,
}

impl Entry {
    pub fn from_parts(id: impl Into<String>, rev: impl Into<String>, fields: EntryFields) -> Self {
        Self {
            id: id.into(),
            rev: rev.into(),
            title: fields.title,
            content: fields.content,
            tags: fields.tags,
            entry_date: fields.entry_date,
        }
    }
}

/// Partial update for an entry.
///
/// `Some` overwrites the stored value, whatever it is (an empty string or an empty tag list
/// included). `None` leaves the stored value untouched.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub entry_date: Option<DateTime<Utc>>,
}

impl EntryPatch {
    /// Merges this patch over `fields` in place.
    pub fn apply(self, fields: &mut EntryFields) {
        if let Some(title) = self.title {
            fields.title = title;
        }
        if let Some(content) = self.content {
            fields.content = content;
        }
        if let Some(tags) = self.tags {
            fields.tags = tags;
        }
        if let Some(entry_date) = self.entry_date {
            fields.entry_date = entry_date;
        }
    }
}

/// Input for creating an entry through [`crate::EntryService`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEntry {
    pub title: String,
    pub content: String,
    pub tags: Vec<String>,
    /// Stamped with the current time when `None`.
    pub entry_date: Option<DateTime<Utc>>,
}

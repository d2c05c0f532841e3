//! JSON request and response bodies for the entry endpoints.

use chrono::{DateTime, Utc};
use daytracker_core::constants::DEFAULT_LIST_LIMIT;
use daytracker_core::{Entry, EntryPatch, NewEntry};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A diary entry as returned by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct EntryRes {
    /// Server-generated identifier.
    #[schema(example = "550e8400e29b41d4a716446655440000")]
    pub id: String,
    /// Opaque revision token, advanced on every update.
    #[schema(example = "1")]
    pub rev: String,
    #[schema(example = "My day")]
    pub title: String,
    #[schema(example = "Today I wrote code...")]
    pub content: String,
    pub tags: Vec<String>,
    pub entry_date: DateTime<Utc>,
}

impl From<Entry> for EntryRes {
    fn from(entry: Entry) -> Self {
        Self {
            id: entry.id,
            rev: entry.rev,
            title: entry.title,
            content: entry.content,
            tags: entry.tags,
            entry_date: entry.entry_date,
        }
    }
}

/// Body of `POST /entries`.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateEntryReq {
    #[schema(example = "My day")]
    pub title: String,
    #[schema(example = "Today I wrote code...")]
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Defaults to the time the server receives the request.
    #[serde(default)]
    pub entry_date: Option<DateTime<Utc>>,
}

impl From<CreateEntryReq> for NewEntry {
    fn from(req: CreateEntryReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
            tags: req.tags,
            entry_date: req.entry_date,
        }
    }
}

/// Body of `PUT /entries/{id}`.
///
/// Omitted and `null` fields are left unchanged.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateEntryReq {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub entry_date: Option<DateTime<Utc>>,
}

impl From<UpdateEntryReq> for EntryPatch {
    fn from(req: UpdateEntryReq) -> Self {
        Self {
            title: req.title,
            content: req.content,
            tags: req.tags,
            entry_date: req.entry_date,
        }
    }
}

/// Pagination for `GET /entries`.
#[derive(Clone, Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEntriesQuery {
    /// Maximum number of entries to return (default 100).
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Number of entries to skip (default 0).
    #[serde(default)]
    pub skip: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIST_LIMIT
}

/// Body of a successful `DELETE /entries/{id}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteEntryRes {
    pub deleted: bool,
}

/// Error body for 4xx/5xx responses.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    #[schema(example = "Entry not found")]
    pub detail: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// `couchdb` or `memory`.
    pub backend: String,
    /// False when entries are only held in memory.
    pub durable: bool,
}

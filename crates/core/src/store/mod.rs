//! Entry persistence.
//!
//! [`EntryStore`] presents one contract over two interchangeable backends:
//!
//! - [`CouchDbBackend`]: documents in a remote CouchDB database.
//! - [`MemoryBackend`]: a process-local map, used when CouchDB is unreachable at startup.
//!
//! The backend is chosen once, by [`EntryStore::connect`], and never changes for the lifetime of
//! the store. There is no later retry or promotion back to CouchDB, and a CouchDB failure after
//! startup is returned to the caller rather than falling back mid-request.

pub mod couchdb;
pub mod memory;

pub use couchdb::CouchDbBackend;
pub use memory::MemoryBackend;

use crate::config::CoreConfig;
use crate::entry::{Entry, EntryFields, EntryPatch};
use crate::EntryResult;
use serde::Serialize;
use std::fmt;

/// Which backend a store ended up with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    CouchDb,
    Memory,
}

impl BackendKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CouchDb => "couchdb",
            Self::Memory => "memory",
        }
    }

    /// Whether writes survive a process restart.
    pub fn is_durable(self) -> bool {
        matches!(self, Self::CouchDb)
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Backend-agnostic entry store.
#[derive(Debug)]
pub enum EntryStore {
    CouchDb(CouchDbBackend),
    Memory(MemoryBackend),
}

impl EntryStore {
    /// Connects to the configured CouchDB database, creating it if it does not exist.
    ///
    /// If the server cannot be reached, or answers with anything unexpected, the store falls
    /// back to an in-memory backend for its whole lifetime. The fallback is logged as a warning
    /// because entries written from then on are lost on restart.
    pub async fn connect(cfg: &CoreConfig) -> Self {
        let backend = match CouchDbBackend::new(cfg) {
            Ok(backend) => backend,
            Err(e) => {
                tracing::warn!(
                    "CouchDB client could not be configured ({}); using in-memory entry store, entries will not persist",
                    e
                );
                return Self::memory();
            }
        };

        match backend.ensure_database().await {
            Ok(()) => {
                tracing::info!(
                    "Using CouchDB entry store at {} (database '{}')",
                    backend.server_url(),
                    backend.db_name()
                );
                Self::CouchDb(backend)
            }
            Err(e) => {
                tracing::warn!(
                    "CouchDB at {} is unavailable ({}); using in-memory entry store, entries will not persist",
                    backend.server_url(),
                    e
                );
                Self::memory()
            }
        }
    }

    /// A store that only ever uses the in-memory backend.
    pub fn memory() -> Self {
        Self::Memory(MemoryBackend::new())
    }

    pub fn backend_kind(&self) -> BackendKind {
        match self {
            Self::CouchDb(_) => BackendKind::CouchDb,
            Self::Memory(_) => BackendKind::Memory,
        }
    }

    /// Persists `fields`, under `id` if given or a backend-generated id otherwise.
    pub async fn create(&self, fields: EntryFields, id: Option<String>) -> EntryResult<Entry> {
        match self {
            Self::CouchDb(db) => db.create(fields, id).await,
            Self::Memory(mem) => Ok(mem.create(fields, id)),
        }
    }

    /// Looks up an entry by exact id. `Ok(None)` means it does not exist.
    pub async fn get(&self, id: &str) -> EntryResult<Option<Entry>> {
        match self {
            Self::CouchDb(db) => db.get(id).await,
            Self::Memory(mem) => Ok(mem.get(id)),
        }
    }

    /// Merges `patch` over the stored entry and returns the merged result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntryError::NotFound`] if the entry does not exist.
    pub async fn update(&self, id: &str, patch: EntryPatch) -> EntryResult<Entry> {
        match self {
            Self::CouchDb(db) => db.update(id, patch).await,
            Self::Memory(mem) => mem.update(id, patch),
        }
    }

    /// Removes an entry. Returns whether it existed.
    pub async fn delete(&self, id: &str) -> EntryResult<bool> {
        match self {
            Self::CouchDb(db) => db.delete(id).await,
            Self::Memory(mem) => Ok(mem.delete(id)),
        }
    }

    /// Up to `limit` entries starting at position `offset` in the backend's natural order.
    pub async fn list(&self, offset: usize, limit: usize) -> EntryResult<Vec<Entry>> {
        match self {
            Self::CouchDb(db) => db.list(offset, limit).await,
            Self::Memory(mem) => Ok(mem.list(offset, limit)),
        }
    }
}

//! # DayTracker Core
//!
//! Core business logic for the DayTracker diary.
//!
//! This crate contains the entry model and its persistence:
//! - [`EntryStore`]: CouchDB-backed storage with a permanent in-memory fallback chosen at startup
//! - [`EntryService`]: id generation, timestamps and input validation on top of the store
//! - [`CoreConfig`]: configuration resolved once at process startup
//!
//! **No API concerns**: HTTP routing, request/response shapes and OpenAPI documentation belong
//! in `api-rest` and `api-shared`.

pub mod config;
pub mod constants;
pub mod entry;
pub mod error;
pub mod service;
pub mod store;
pub mod validation;

pub use config::CoreConfig;
pub use entry::{Entry, EntryFields, EntryPatch, NewEntry};
pub use error::{EntryError, EntryResult};
pub use service::EntryService;
pub use store::{BackendKind, EntryStore};

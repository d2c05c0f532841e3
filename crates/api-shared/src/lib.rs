//! # API Shared
//!
//! Shared definitions for the DayTracker API.
//!
//! Contains:
//! - Request/response types for the entry endpoints (`wire` module), with OpenAPI schemas
//! - Conversions between those types and the `daytracker-core` model
//! - `HealthService`, reporting liveness and which storage backend is in use

pub mod health;
pub mod wire;

pub use health::HealthService;
pub use wire::*;

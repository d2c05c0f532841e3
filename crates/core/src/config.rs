//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and then passed into the entry store.
//! Nothing in this crate reads environment variables while handling a request; the binaries
//! read the environment and hand the raw values to the parsers here.

use crate::constants::{DEFAULT_COUCHDB_DB, DEFAULT_COUCHDB_URL, DEFAULT_REQUEST_TIMEOUT_SECS};
use crate::{EntryError, EntryResult};
use std::time::Duration;

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    couchdb_url: String,
    couchdb_db: String,
    request_timeout: Duration,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidInput`] if the URL or database name is blank, or the
    /// timeout is zero.
    pub fn new(
        couchdb_url: String,
        couchdb_db: String,
        request_timeout: Duration,
    ) -> EntryResult<Self> {
        if couchdb_url.trim().is_empty() {
            return Err(EntryError::InvalidInput(
                "couchdb_url cannot be empty".into(),
            ));
        }
        if couchdb_db.trim().is_empty() {
            return Err(EntryError::InvalidInput(
                "couchdb_db cannot be empty".into(),
            ));
        }
        if request_timeout.is_zero() {
            return Err(EntryError::InvalidInput(
                "request timeout must be greater than zero".into(),
            ));
        }

        Ok(Self {
            couchdb_url: couchdb_url.trim().trim_end_matches('/').to_string(),
            couchdb_db: couchdb_db.trim().to_string(),
            request_timeout,
        })
    }

    /// Build a configuration from optional raw environment values.
    ///
    /// Missing or whitespace-only values fall back to the defaults in
    /// [`crate::constants`].
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::InvalidInput`] if the timeout is not a positive integer.
    pub fn from_env_values(
        couchdb_url: Option<String>,
        couchdb_db: Option<String>,
        timeout_secs: Option<String>,
    ) -> EntryResult<Self> {
        let couchdb_url = non_blank(couchdb_url).unwrap_or_else(|| DEFAULT_COUCHDB_URL.into());
        let couchdb_db = non_blank(couchdb_db).unwrap_or_else(|| DEFAULT_COUCHDB_DB.into());
        let timeout_secs = non_blank(timeout_secs)
            .map(|v| {
                v.parse::<u64>().map_err(|_| {
                    EntryError::InvalidInput(format!(
                        "COUCHDB_TIMEOUT_SECS must be a positive integer, got: '{}'",
                        v
                    ))
                })
            })
            .transpose()?
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Self::new(couchdb_url, couchdb_db, Duration::from_secs(timeout_secs))
    }

    pub fn couchdb_url(&self) -> &str {
        &self.couchdb_url
    }

    pub fn couchdb_db(&self) -> &str {
        &self.couchdb_db
    }

    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum EntryError {
    #[error("entry not found: {0}")]
    NotFound(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid CouchDB URL: {0}")]
    InvalidUrl(String),
    #[error("CouchDB request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("CouchDB returned {status}: {reason}")]
    CouchDbStatus { status: u16, reason: String },
}

pub type EntryResult<T> = std::result::Result<T, EntryError>;

//! Input validation utilities.
//!
//! Checks applied to caller-supplied entry fields before they reach the store.

use crate::{EntryError, EntryResult};

/// Validates that an entry title has visible content.
///
/// The title is stored exactly as given; only empty or whitespace-only titles are rejected.
///
/// # Errors
///
/// Returns [`EntryError::InvalidInput`] if the title is blank.
pub fn validate_title(title: &str) -> EntryResult<()> {
    if title.trim().is_empty() {
        return Err(EntryError::InvalidInput("title cannot be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_title_accepts_text() {
        assert!(validate_title("My day").is_ok());
        assert!(validate_title(" padded ").is_ok());
    }

    #[test]
    fn test_validate_title_rejects_empty() {
        let err = validate_title("").expect_err("should reject empty");
        assert!(matches!(err, EntryError::InvalidInput(msg) if msg.contains("cannot be empty")));
    }

    #[test]
    fn test_validate_title_rejects_whitespace_only() {
        let err = validate_title(" \t\n").expect_err("should reject whitespace");
        assert!(matches!(err, EntryError::InvalidInput(_)));
    }
}

//! Entry operations used by the API layer.
//!
//! [`EntryService`] owns the rules that sit above persistence: it generates ids, stamps
//! `entry_date` on creation and validates titles. Everything else is delegated to the shared
//! [`EntryStore`].

use crate::entry::{Entry, EntryFields, EntryPatch, NewEntry};
use crate::store::{BackendKind, EntryStore};
use crate::validation::validate_title;
use crate::EntryResult;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Generates a new entry id: a random v4 UUID as 32 lowercase hex characters.
pub fn generate_entry_id() -> String {
    Uuid::new_v4().simple().to_string()
}

#[derive(Clone, Debug)]
pub struct EntryService {
    store: Arc<EntryStore>,
}

impl EntryService {
    pub fn new(store: Arc<EntryStore>) -> Self {
        Self { store }
    }

    pub fn backend_kind(&self) -> BackendKind {
        self.store.backend_kind()
    }

    /// Creates an entry with a freshly generated id.
    ///
    /// `entry_date` defaults to the current UTC time when not supplied.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntryError::InvalidInput`] if the title is blank, or a backend error
    /// if the write fails.
    pub async fn create(&self, new_entry: NewEntry) -> EntryResult<Entry> {
        validate_title(&new_entry.title)?;

        let fields = EntryFields {
            title: new_entry.title,
            content: new_entry.content,
            tags: new_entry.tags,
            entry_date: new_entry.entry_date.unwrap_or_else(Utc::now),
        };
        let entry = self.store.create(fields, Some(generate_entry_id())).await?;
        tracing::debug!("created entry {} (rev {})", entry.id, entry.rev);
        Ok(entry)
    }

    pub async fn get(&self, id: &str) -> EntryResult<Option<Entry>> {
        self.store.get(id).await
    }

    pub async fn list(&self, skip: usize, limit: usize) -> EntryResult<Vec<Entry>> {
        self.store.list(skip, limit).await
    }

    /// Applies a partial update. Fields left as `None` keep their stored value.
    ///
    /// # Errors
    ///
    /// Returns [`crate::EntryError::InvalidInput`] if a blank title is supplied, and
    /// [`crate::EntryError::NotFound`] if the entry does not exist.
    pub async fn update(&self, id: &str, patch: EntryPatch) -> EntryResult<Entry> {
        if let Some(title) = &patch.title {
            validate_title(title)?;
        }
        let entry = self.store.update(id, patch).await?;
        tracing::debug!("updated entry {} (rev {})", entry.id, entry.rev);
        Ok(entry)
    }

    pub async fn delete(&self, id: &str) -> EntryResult<bool> {
        self.store.delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EntryError;
    use chrono::TimeZone;

    fn service() -> EntryService {
        EntryService::new(Arc::new(EntryStore::memory()))
    }

    fn new_entry(title: &str) -> NewEntry {
        NewEntry {
            title: title.into(),
            content: "Today...".into(),
            tags: vec![],
            entry_date: None,
        }
    }

    #[test]
    fn test_generate_entry_id_is_canonical_hex() {
        let id = generate_entry_id();
        assert_eq!(id.len(), 32);
        assert!(id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')));
        assert_ne!(id, generate_entry_id());
    }

    #[tokio::test]
    async fn test_create_generates_id_and_stamps_date() {
        let svc = service();
        let before = Utc::now();
        let entry = svc
            .create(new_entry("My day"))
            .await
            .expect("create should succeed");

        assert_eq!(entry.id.len(), 32);
        assert_eq!(entry.rev, "1");
        assert!(entry.entry_date >= before);
        assert!(entry.entry_date <= Utc::now());
    }

    #[tokio::test]
    async fn test_create_keeps_supplied_entry_date() {
        let svc = service();
        let date = Utc.with_ymd_and_hms(2023, 12, 31, 23, 59, 0).unwrap();
        let entry = svc
            .create(NewEntry {
                entry_date: Some(date),
                ..new_entry("New year's eve")
            })
            .await
            .expect("create should succeed");

        assert_eq!(entry.entry_date, date);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_title() {
        let svc = service();
        let err = svc
            .create(new_entry("   "))
            .await
            .expect_err("blank title should be rejected");

        assert!(matches!(err, EntryError::InvalidInput(_)));
        assert!(svc.list(0, 10).await.expect("list should succeed").is_empty());
    }

    #[tokio::test]
    async fn test_update_rejects_blank_title_without_writing() {
        let svc = service();
        let entry = svc
            .create(new_entry("Keep me"))
            .await
            .expect("create should succeed");

        let err = svc
            .update(
                &entry.id,
                EntryPatch {
                    title: Some(String::new()),
                    ..Default::default()
                },
            )
            .await
            .expect_err("blank title should be rejected");
        assert!(matches!(err, EntryError::InvalidInput(_)));

        let stored = svc
            .get(&entry.id)
            .await
            .expect("get should succeed")
            .expect("entry should exist");
        assert_eq!(stored.title, "Keep me");
        assert_eq!(stored.rev, "1");
    }

    #[tokio::test]
    async fn test_update_changes_revision() {
        let svc = service();
        let entry = svc
            .create(new_entry("My day"))
            .await
            .expect("create should succeed");

        let updated = svc
            .update(
                &entry.id,
                EntryPatch {
                    content: Some("Edited".into()),
                    ..Default::default()
                },
            )
            .await
            .expect("update should succeed");

        assert_ne!(updated.rev, entry.rev);
        assert_eq!(updated.title, "My day");
        assert_eq!(updated.content, "Edited");
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let svc = service();
        let (a, b) = tokio::join!(svc.create(new_entry("a")), svc.create(new_entry("b")));
        let a = a.expect("create a should succeed");
        let b = b.expect("create b should succeed");

        assert_ne!(a.id, b.id);
        assert!(svc.get(&a.id).await.expect("get should succeed").is_some());
        assert!(svc.get(&b.id).await.expect("get should succeed").is_some());
    }
}

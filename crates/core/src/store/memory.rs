//! In-memory entry backend.
//!
//! Used when CouchDB cannot be reached at startup. Nothing survives a restart. A single mutex
//! guards the documents together with their insertion order, so every operation is serialised
//! and the per-entry revision counters cannot be lost or corrupted by concurrent writers.

use crate::entry::{Entry, EntryFields, EntryPatch};
use crate::{EntryError, EntryResult};
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug)]
struct StoredDoc {
    rev: u64,
    fields: EntryFields,
}

impl StoredDoc {
    fn materialise(&self, id: &str) -> Entry {
        Entry::from_parts(id, self.rev.to_string(), self.fields.clone())
    }
}

#[derive(Debug, Default)]
struct MemoryState {
    docs: HashMap<String, StoredDoc>,
    /// Ids in insertion order; this is the natural ordering used by `list`.
    order: Vec<String>,
    /// Last revision of each deleted id, so a recreated entry continues from it.
    retired_revs: HashMap<String, u64>,
    next_id: u64,
}

impl MemoryState {
    fn generate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = self.next_id.to_string();
            if !self.docs.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

/// Map-backed store with simulated revision tokens (`"1"`, `"2"`, ...).
#[derive(Debug, Default)]
pub struct MemoryBackend {
    state: Mutex<MemoryState>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        // A panic while holding the lock cannot leave a half-applied write behind, so the
        // state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `fields` under `id`, or under a freshly generated id when `id` is `None`.
    ///
    /// A supplied id that already exists replaces the stored entry in place and advances its
    /// revision. A previously deleted id also continues from its last revision, so a token is
    /// never handed out twice for the same id.
    pub fn create(&self, fields: EntryFields, id: Option<String>) -> Entry {
        let mut state = self.lock();
        let id = match id {
            Some(id) => id,
            None => state.generate_id(),
        };

        let existing_rev = state.docs.get(&id).map(|existing| existing.rev);
        let last_rev = existing_rev.or_else(|| state.retired_revs.remove(&id));
        let rev = last_rev.map_or(1, |last| last + 1);
        let doc = StoredDoc { rev, fields };
        let entry = doc.materialise(&id);

        if state.docs.insert(id.clone(), doc).is_none() {
            state.order.push(id);
        }
        entry
    }

    pub fn get(&self, id: &str) -> Option<Entry> {
        self.lock().docs.get(id).map(|doc| doc.materialise(id))
    }

    /// Merges `patch` into the stored entry and advances its revision.
    ///
    /// # Errors
    ///
    /// Returns [`EntryError::NotFound`] if no entry has this id.
    pub fn update(&self, id: &str, patch: EntryPatch) -> EntryResult<Entry> {
        let mut state = self.lock();
        let doc = state
            .docs
            .get_mut(id)
            .ok_or_else(|| EntryError::NotFound(id.to_string()))?;

        patch.apply(&mut doc.fields);
        doc.rev += 1;
        Ok(doc.materialise(id))
    }

    pub fn delete(&self, id: &str) -> bool {
        let mut state = self.lock();
        let Some(doc) = state.docs.remove(id) else {
            return false;
        };
        state.retired_revs.insert(id.to_string(), doc.rev);
        state.order.retain(|existing| existing != id);
        true
    }

    pub fn list(&self, offset: usize, limit: usize) -> Vec<Entry> {
        let state = self.lock();
        state
            .order
            .iter()
            .skip(offset)
            .take(limit)
            .filter_map(|id| state.docs.get(id).map(|doc| doc.materialise(id)))
            .collect()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.lock().docs.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::INITIAL_MEMORY_REVISION;
    use chrono::Utc;
    use std::sync::Arc;

    fn fields(title: &str) -> EntryFields {
        EntryFields {
            title: title.into(),
            content: format!("{title} content"),
            tags: vec![],
            entry_date: Utc::now(),
        }
    }

    #[test]
    fn test_create_assigns_initial_revision() {
        let store = MemoryBackend::new();
        let entry = store.create(fields("My day"), Some("abc".into()));

        assert_eq!(entry.id, "abc");
        assert_eq!(entry.rev, INITIAL_MEMORY_REVISION);
        assert_eq!(entry.title, "My day");
    }

    #[test]
    fn test_create_without_id_never_collides() {
        let store = MemoryBackend::new();
        let first = store.create(fields("one"), None);
        store.create(fields("taken"), Some("2".into()));
        assert!(store.delete(&first.id));
        let second = store.create(fields("two"), None);
        let third = store.create(fields("three"), None);

        assert_ne!(second.id, "2");
        assert_ne!(second.id, third.id);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_get_returns_none_for_missing_id() {
        let store = MemoryBackend::new();
        assert!(store.get("missing").is_none());
    }

    #[test]
    fn test_update_merges_and_advances_revision() {
        let store = MemoryBackend::new();
        let created = store.create(
            EntryFields {
                title: "A".into(),
                content: "B".into(),
                tags: vec!["x".into()],
                entry_date: Utc::now(),
            },
            Some("e1".into()),
        );

        let updated = store
            .update(
                "e1",
                EntryPatch {
                    title: Some("C".into()),
                    ..Default::default()
                },
            )
            .expect("update should succeed");

        assert_eq!(updated.title, "C");
        assert_eq!(updated.content, "B");
        assert_eq!(updated.tags, vec!["x".to_string()]);
        assert_eq!(updated.entry_date, created.entry_date);
        assert_eq!(updated.rev, "2");

        let again = store
            .update("e1", EntryPatch::default())
            .expect("empty patch should still succeed");
        assert_eq!(again.rev, "3");
    }

    #[test]
    fn test_update_missing_id_is_not_found() {
        let store = MemoryBackend::new();
        let err = store
            .update("nope", EntryPatch::default())
            .expect_err("update of a missing entry should fail");
        assert!(matches!(err, EntryError::NotFound(id) if id == "nope"));
    }

    #[test]
    fn test_delete_reports_prior_existence() {
        let store = MemoryBackend::new();
        store.create(fields("gone"), Some("e1".into()));

        assert!(store.delete("e1"));
        assert!(store.get("e1").is_none());
        assert!(!store.delete("e1"));
        assert!(store.is_empty());
    }

    #[test]
    fn test_recreate_after_delete_continues_revision() {
        let store = MemoryBackend::new();
        let first = store.create(fields("first"), Some("e1".into()));
        store
            .update("e1", EntryPatch::default())
            .expect("update should succeed");
        assert!(store.delete("e1"));

        let again = store.create(fields("again"), Some("e1".into()));

        assert_eq!(first.rev, "1");
        assert_eq!(again.rev, "3");
        assert_eq!(again.title, "again");
        let ids: Vec<String> = store.list(0, 10).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e1"]);
    }

    #[test]
    fn test_create_over_existing_id_advances_revision() {
        let store = MemoryBackend::new();
        store.create(fields("first"), Some("e1".into()));

        let replaced = store.create(fields("second"), Some("e1".into()));

        assert_eq!(replaced.rev, "2");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_list_pages_in_insertion_order() {
        let store = MemoryBackend::new();
        for i in 1..=5 {
            store.create(fields(&format!("e{i}")), Some(format!("e{i}")));
        }

        let page: Vec<String> = store.list(1, 2).into_iter().map(|e| e.id).collect();
        assert_eq!(page, vec!["e2", "e3"]);

        assert_eq!(store.list(0, 100).len(), 5);
        assert!(store.list(5, 10).is_empty());
        assert!(store.list(0, 0).is_empty());
    }

    #[test]
    fn test_list_keeps_position_after_update_and_drops_deleted() {
        let store = MemoryBackend::new();
        for i in 1..=3 {
            store.create(fields(&format!("e{i}")), Some(format!("e{i}")));
        }
        store
            .update(
                "e1",
                EntryPatch {
                    content: Some("edited".into()),
                    ..Default::default()
                },
            )
            .expect("update should succeed");
        store.delete("e2");

        let ids: Vec<String> = store.list(0, 10).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["e1", "e3"]);
    }

    #[test]
    fn test_concurrent_creates_yield_distinct_ids() {
        let store = Arc::new(MemoryBackend::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.create(fields(&format!("t{i}")), None).id)
            })
            .collect();

        let mut ids: Vec<String> = handles
            .into_iter()
            .map(|h| h.join().expect("thread should not panic"))
            .collect();
        ids.sort();
        ids.dedup();

        assert_eq!(ids.len(), 8);
        for id in &ids {
            assert!(store.get(id).is_some());
        }
    }
}

use super::entry::Entry;
use super::error::JournalError;
use super::kv_store::KeyValueStore;
use std::collections::HashSet;
use std::rc::Rc;

pub const ENTRIES_KEY: &str = "dailyreset_entries_v2";

/// The saved journal entries.
///
/// Entries are kept newest-inserted first and the whole collection is written
/// back to the store after every mutation.
pub struct EntryStore<S: KeyValueStore> {
    store: Rc<S>,
    entries: Vec<Entry>,
}

impl<S: KeyValueStore> EntryStore<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Rebuilds the collection from the store. Missing or malformed data
    /// yields an empty collection; duplicate ids keep their first occurrence.
    pub fn load(store: Rc<S>) -> Self {
        let stored: Vec<Entry> = store.get_json(ENTRIES_KEY).unwrap_or_default();

        let mut seen = HashSet::new();
        let entries = stored
            .into_iter()
            .filter(|entry| seen.insert(entry.id.clone()))
            .collect();

        Self { store, entries }
    }

    pub fn create(&mut self, text: &str, now: i64) -> Option<Entry> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }

        let entry = Entry::new(trimmed.to_string(), now);
        self.entries.insert(0, entry.clone());
        self.persist();
        Some(entry)
    }

    pub fn amend(&mut self, id: &str, text: &str, now: i64) -> Result<Entry, JournalError> {
        let entry = self
            .entries
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or_else(|| JournalError::EntryNotFound(id.to_string()))?;

        entry.amend(text.to_string(), now);
        let amended = entry.clone();
        self.persist();
        Ok(amended)
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let initial_len = self.entries.len();
        self.entries.retain(|e| e.id != id);

        if self.entries.len() == initial_len {
            return false;
        }
        self.persist();
        true
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Entries by `updated_at` descending; equal timestamps keep the most
    /// recently inserted entry first (the sort is stable).
    pub fn list(&self) -> Vec<&Entry> {
        let mut entries: Vec<&Entry> = self.entries.iter().collect();
        entries.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn persist(&self) {
        if !self.store.set_json(ENTRIES_KEY, &self.entries) {
            log::warn!("Journal entries were not persisted; keeping them in memory");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryStore;

    fn new_store() -> (Rc<MemoryStore>, EntryStore<MemoryStore>) {
        let kv = Rc::new(MemoryStore::new());
        let store = EntryStore::new(kv.clone());
        (kv, store)
    }

    #[test]
    fn test_create_and_amend_scenario() {
        let (_, mut store) = new_store();

        let created = store.create("Morning thoughts", 1000).unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].created_at, 1000);
        assert_eq!(listed[0].updated_at, 1000);

        store
            .amend(&created.id, "Morning thoughts, revised", 2000)
            .unwrap();
        let listed = store.list();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].created_at, 1000);
        assert_eq!(listed[0].updated_at, 2000);
        assert_eq!(listed[0].text, "Morning thoughts, revised");
    }

    #[test]
    fn test_create_trims_and_rejects_blank_text() {
        let (kv, mut store) = new_store();

        assert!(store.create("   \n\t ", 1).is_none());
        assert!(store.list().is_empty());
        assert_eq!(kv.get(ENTRIES_KEY), None);

        let entry = store.create("  hello  ", 1).unwrap();
        assert_eq!(entry.text, "hello");
    }

    #[test]
    fn test_amend_unknown_id_is_not_found() {
        let (_, mut store) = new_store();
        let result = store.amend("missing", "text", 1);
        assert_eq!(
            result,
            Err(JournalError::EntryNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_delete_reports_removal() {
        let (_, mut store) = new_store();
        let entry = store.create("to delete", 1).unwrap();

        assert!(store.delete(&entry.id));
        assert!(!store.delete(&entry.id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_list_sorted_by_updated_at_desc() {
        let (_, mut store) = new_store();
        let older = store.create("older", 100).unwrap();
        let newer = store.create("newer", 200).unwrap();

        let listed = store.list();
        assert_eq!(listed[0].id, newer.id);
        assert_eq!(listed[1].id, older.id);

        store.amend(&older.id, "older, touched", 300).unwrap();
        let listed = store.list();
        assert_eq!(listed[0].id, older.id);
    }

    #[test]
    fn test_list_ties_prefer_latest_insert() {
        let (kv, mut store) = new_store();
        let first = store.create("first", 500).unwrap();
        let second = store.create("second", 500).unwrap();
        let third = store.create("third", 500).unwrap();

        let ids: Vec<&str> = store.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);

        let reloaded = EntryStore::load(kv);
        let reloaded_ids: Vec<&str> = reloaded.list().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(reloaded_ids, ids);
    }

    #[test]
    fn test_list_sorted_for_any_amend_order() {
        let (_, mut store) = new_store();
        let ids: Vec<String> = (0..5)
            .map(|i| store.create(&format!("entry {}", i), i * 10).unwrap().id)
            .collect();

        for (step, idx) in [3usize, 0, 4, 1, 3, 2].iter().enumerate() {
            store
                .amend(&ids[*idx], "edited", 100 + step as i64 * 7)
                .unwrap();
        }

        let listed = store.list();
        assert!(listed
            .windows(2)
            .all(|pair| pair[0].updated_at >= pair[1].updated_at));
    }

    #[test]
    fn test_collection_round_trip() {
        let (kv, mut store) = new_store();
        store.create("one", 10).unwrap();
        let two = store.create("two", 20).unwrap();
        store.amend(&two.id, "two, revised", 30).unwrap();

        let reloaded = EntryStore::load(kv);
        let mut original: Vec<Entry> = store.list().into_iter().cloned().collect();
        let mut restored: Vec<Entry> = reloaded.list().into_iter().cloned().collect();
        original.sort_by(|a, b| a.id.cmp(&b.id));
        restored.sort_by(|a, b| a.id.cmp(&b.id));
        assert_eq!(original, restored);
    }

    #[test]
    fn test_load_malformed_collection_is_empty() {
        let kv = Rc::new(MemoryStore::new());
        kv.set(ENTRIES_KEY, "[{\"id\": 3");
        let store = EntryStore::load(kv);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_drops_duplicate_ids() {
        let kv = Rc::new(MemoryStore::new());
        kv.set(
            ENTRIES_KEY,
            r#"[{"id":"a","createdAt":1,"updatedAt":2,"text":"keep"},
                {"id":"a","createdAt":1,"updatedAt":3,"text":"drop"}]"#,
        );
        let store = EntryStore::load(kv);
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("a").unwrap().text, "keep");
    }

    #[test]
    fn test_failed_write_keeps_memory_state() {
        let (kv, mut store) = new_store();
        kv.set_fail_writes(true);

        let entry = store.create("unsaved", 1).unwrap();
        assert!(store.contains(&entry.id));
        assert_eq!(kv.get(ENTRIES_KEY), None);
    }
}

use super::kv_store::KeyValueStore;
use std::rc::Rc;

pub const DRAFT_KEY: &str = "dailyreset_draft_v2";
pub const ACTIVE_ENTRY_KEY: &str = "dailyreset_active_v2";

/// The text being typed and the entry it amends, if any.
pub struct DraftBuffer<S: KeyValueStore> {
    store: Rc<S>,
    text: String,
    active_entry_id: Option<String>,
}

impl<S: KeyValueStore> DraftBuffer<S> {
    pub fn new(store: Rc<S>) -> Self {
        Self {
            store,
            text: String::new(),
            active_entry_id: None,
        }
    }

    pub fn load(store: Rc<S>) -> Self {
        let text = store.get_json::<String>(DRAFT_KEY).unwrap_or_default();
        let active_entry_id = store.get_json::<String>(ACTIVE_ENTRY_KEY);
        Self {
            store,
            text,
            active_entry_id,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn active_entry_id(&self) -> Option<&str> {
        self.active_entry_id.as_deref()
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_active_entry(&mut self, id: Option<String>) {
        match &id {
            Some(id) => {
                self.store.set_json(ACTIVE_ENTRY_KEY, id);
            }
            None => self.store.remove(ACTIVE_ENTRY_KEY),
        }
        self.active_entry_id = id;
    }

    /// Writes the raw text, whitespace included, to the draft slot.
    pub fn persist(&self) -> bool {
        self.store.set_json(DRAFT_KEY, &self.text)
    }

    pub fn reset(&mut self) {
        self.text.clear();
        self.active_entry_id = None;
        self.store.remove(DRAFT_KEY);
        self.store.remove(ACTIVE_ENTRY_KEY);
    }
}

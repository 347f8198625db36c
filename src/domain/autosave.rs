use super::debounce::{Clock, Debouncer};
use super::draft::DraftBuffer;
use super::entry::Entry;
use super::entry_store::EntryStore;
use super::error::JournalError;
use super::kv_store::KeyValueStore;
use std::rc::Rc;

pub const DEFAULT_AUTOSAVE_DELAY_MS: u64 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutosaveState {
    Idle,
    PendingWrite,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommitOutcome {
    /// Only the raw draft was saved; the text was blank.
    DraftOnly,
    Created(String),
    Amended(String),
}

/// Binds the draft to the entry store.
///
/// Text changes arm a debounce timer; when it fires the draft is committed.
/// The first commit of an editing session creates an entry, every later one
/// amends that same entry.
pub struct AutosaveController<S: KeyValueStore, C: Clock> {
    entries: EntryStore<S>,
    draft: DraftBuffer<S>,
    timer: Debouncer,
    clock: C,
}

impl<S: KeyValueStore, C: Clock> AutosaveController<S, C> {
    /// Restores entries and the draft from `store`. An active entry id that
    /// no longer exists is dropped so the next commit creates a fresh entry.
    pub fn load(store: Rc<S>, clock: C, delay_ms: u64) -> Self {
        let entries = EntryStore::load(store.clone());
        let mut draft = DraftBuffer::load(store);

        if let Some(id) = draft.active_entry_id() {
            if !entries.contains(id) {
                log::debug!("Dropping stale active entry '{}'", id);
                draft.set_active_entry(None);
            }
        }

        Self {
            entries,
            draft,
            timer: Debouncer::new(delay_ms),
            clock,
        }
    }

    pub fn state(&self) -> AutosaveState {
        if self.timer.is_armed() {
            AutosaveState::PendingWrite
        } else {
            AutosaveState::Idle
        }
    }

    pub fn entries(&self) -> &EntryStore<S> {
        &self.entries
    }

    pub fn draft_text(&self) -> &str {
        self.draft.text()
    }

    pub fn active_entry_id(&self) -> Option<&str> {
        self.draft.active_entry_id()
    }

    pub fn active_entry(&self) -> Option<&Entry> {
        self.active_entry_id().and_then(|id| self.entries.get(id))
    }

    /// Milliseconds until the pending commit fires.
    pub fn time_until_commit(&self) -> Option<u64> {
        self.timer.remaining_ms(self.clock.now_ms())
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.draft.set_text(text);
        self.timer.arm(self.clock.now_ms());
    }

    /// Commits if the debounce deadline has passed.
    pub fn tick(&mut self) -> Option<CommitOutcome> {
        let now = self.clock.now_ms();
        self.timer.fire_if_due(now)?;
        Some(self.commit(now))
    }

    /// Commits a pending write right away.
    pub fn flush(&mut self) -> Option<CommitOutcome> {
        self.timer.cancel()?;
        let now = self.clock.now_ms();
        Some(self.commit(now))
    }

    /// Drops a pending write without committing it.
    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn new_entry(&mut self) {
        self.timer.cancel();
        self.draft.reset();
    }

    pub fn open(&mut self, id: &str) -> Result<(), JournalError> {
        let text = self
            .entries
            .get(id)
            .map(|e| e.text.clone())
            .ok_or_else(|| JournalError::EntryNotFound(id.to_string()))?;

        self.timer.cancel();
        self.draft.set_text(text);
        // The draft slot and the active id slot must name the same entry
        if !self.draft.persist() {
            log::warn!("Draft for opened entry '{}' was not persisted", id);
        }
        self.draft.set_active_entry(Some(id.to_string()));
        Ok(())
    }

    pub fn delete(&mut self, id: &str) -> bool {
        let removed = self.entries.delete(id);
        if self.draft.active_entry_id() == Some(id) {
            self.new_entry();
        }
        removed
    }

    fn commit(&mut self, now: i64) -> CommitOutcome {
        if !self.draft.persist() {
            log::warn!("Draft was not persisted; it only lives in memory");
        }

        let trimmed = self.draft.text().trim().to_string();
        if trimmed.is_empty() {
            return CommitOutcome::DraftOnly;
        }

        if let Some(id) = self.draft.active_entry_id().map(str::to_string) {
            match self.entries.amend(&id, &trimmed, now) {
                Ok(entry) => return CommitOutcome::Amended(entry.id),
                Err(e) => log::warn!("{}; saving the draft as a new entry", e),
            }
        }

        match self.entries.create(&trimmed, now) {
            Some(entry) => {
                self.draft.set_active_entry(Some(entry.id.clone()));
                CommitOutcome::Created(entry.id)
            }
            None => CommitOutcome::DraftOnly,
        }
    }
}

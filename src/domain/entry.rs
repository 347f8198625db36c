use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A saved journal entry. Timestamps are Unix milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub text: String,
}

impl Entry {
    pub fn new(text: String, now: i64) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            text,
        }
    }

    /// Replaces the text. `updated_at` never moves backwards.
    pub fn amend(&mut self, text: String, now: i64) {
        self.text = text;
        self.updated_at = self.updated_at.max(now);
    }
}

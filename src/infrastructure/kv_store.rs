use crate::domain::KeyValueStore;
#[cfg(test)]
use std::cell::{Cell, RefCell};
#[cfg(test)]
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Stores each key as `<dir>/<key>.json`.
pub struct FileStore {
    dir: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, quota_bytes: Option<u64>) -> Self {
        Self {
            dir: dir.into(),
            quota_bytes,
        }
    }

    fn key_path(&self, key: &str) -> Option<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            log::warn!("Rejected invalid storage key '{}'", key);
            return None;
        }
        Some(self.dir.join(format!("{}.json", key)))
    }

    fn used_bytes_excluding(&self, skip: &Path) -> io::Result<u64> {
        let mut total = 0;
        if !self.dir.exists() {
            return Ok(0);
        }
        for item in fs::read_dir(&self.dir)? {
            let path = item?.path();
            if path == skip || path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            total += fs::metadata(&path)?.len();
        }
        Ok(total)
    }

    fn try_set(&self, path: &Path, value: &str) -> io::Result<()> {
        if let Some(quota) = self.quota_bytes {
            let used = self.used_bytes_excluding(path)?;
            if used + value.len() as u64 > quota {
                return Err(io::Error::new(
                    io::ErrorKind::Other,
                    format!("quota of {} bytes exceeded", quota),
                ));
            }
        }

        fs::create_dir_all(&self.dir)?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(&temp_path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms)?;
        }

        fs::rename(&temp_path, path)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        let path = self.key_path(key)?;
        if !path.exists() {
            return None;
        }
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) => {
                log::warn!("Failed to read '{}': {}", path.display(), e);
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> bool {
        let Some(path) = self.key_path(key) else {
            return false;
        };
        match self.try_set(&path, value) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("Failed to write '{}': {}", path.display(), e);
                false
            }
        }
    }

    fn remove(&self, key: &str) {
        let Some(path) = self.key_path(key) else {
            return;
        };
        if let Err(e) = fs::remove_file(&path) {
            if e.kind() != io::ErrorKind::NotFound {
                log::warn!("Failed to remove '{}': {}", path.display(), e);
            }
        }
    }
}

/// In-memory store with the same contract as [`FileStore`].
#[cfg(test)]
#[derive(Default)]
pub struct MemoryStore {
    values: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every following `set` report failure, like a full or disabled storage.
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        if self.fail_writes.get() {
            log::warn!("Write to '{}' rejected by memory store", key);
            return false;
        }
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use tempfile::TempDir;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Sample {
        name: String,
        count: u32,
    }

    #[test]
    fn test_file_store_set_get_remove() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), None);

        assert!(store.set("greeting", "\"hello\""));
        assert_eq!(store.get("greeting").as_deref(), Some("\"hello\""));

        store.remove("greeting");
        assert_eq!(store.get("greeting"), None);
    }

    #[test]
    fn test_file_store_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("data"), None);

        assert!(store.set("key", "1"));
        assert_eq!(store.get("key").as_deref(), Some("1"));
    }

    #[test]
    fn test_file_store_remove_missing_key_is_silent() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), None);
        store.remove("never_written");
        assert_eq!(store.get("never_written"), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), None);

        assert!(!store.set("../escape", "x"));
        assert_eq!(store.get("../escape"), None);
    }

    #[test]
    fn test_file_store_quota_exceeded() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path(), Some(10));

        assert!(store.set("a", "12345"));
        assert!(!store.set("b", "1234567"));
        assert_eq!(store.get("b"), None);
        // Overwriting a key does not count its old value against the quota
        assert!(store.set("a", "1234567890"));
    }

    #[test]
    fn test_json_helpers_round_trip() {
        let store = MemoryStore::new();
        let sample = Sample {
            name: "calm".to_string(),
            count: 3,
        };

        assert!(store.set_json("sample", &sample));
        assert_eq!(store.get_json::<Sample>("sample"), Some(sample));
    }

    #[test]
    fn test_malformed_json_is_absent() {
        let store = MemoryStore::new();
        store.set("sample", "{not json");
        assert_eq!(store.get_json::<Sample>("sample"), None);
    }

    #[test]
    fn test_memory_store_failing_writes() {
        let store = MemoryStore::new();
        store.set_fail_writes(true);
        assert!(!store.set("key", "value"));
        assert_eq!(store.get("key"), None);

        store.set_fail_writes(false);
        assert!(store.set("key", "value"));
    }
}

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Key-value storage that never fails loudly.
///
/// Every backend swallows its own errors: reads of broken data come back as
/// `None`, failed writes come back as `false`. Callers must not assume a
/// write landed.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;

    fn set(&self, key: &str, value: &str) -> bool;

    fn remove(&self, key: &str);

    fn get_json<T: DeserializeOwned>(&self, key: &str) -> Option<T>
    where
        Self: Sized,
    {
        let raw = self.get(key)?;
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring malformed value under '{}': {}", key, e);
                None
            }
        }
    }

    fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> bool
    where
        Self: Sized,
    {
        match serde_json::to_string(value) {
            Ok(json) => self.set(key, &json),
            Err(e) => {
                log::warn!("Failed to serialize value for '{}': {}", key, e);
                false
            }
        }
    }
}

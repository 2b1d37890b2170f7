//! Key-value storage seam.
//!
//! The cart and the role gate both persist a single string record under a
//! fixed key. Where that record lives is up to the caller: the storefront
//! backs the cart with the browser session and the role flag with a
//! long-lived cookie, tests use [`MemoryStorage`].

use std::collections::HashMap;

/// A string key-value store.
///
/// Writes are infallible from the caller's point of view. Backends that can
/// fail are expected to buffer and report on flush.
pub trait Storage {
    /// Returns the value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: String);

    /// Removes `key`. Removing an absent key is a no-op.
    fn remove(&mut self, key: &str);
}

impl<S: Storage + ?Sized> Storage for &mut S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }
}

/// In-memory storage backed by a `HashMap`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store seeded with a single entry.
    #[must_use]
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let mut storage = Self::new();
        storage.set(key, value.into());
        storage
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage_set_get_remove() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get("k"), None);

        storage.set("k", "v1".to_string());
        storage.set("k", "v2".to_string());
        assert_eq!(storage.get("k").as_deref(), Some("v2"));

        storage.remove("k");
        storage.remove("k");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_mut_ref_forwards() {
        fn write_through<S: Storage>(mut storage: S) {
            storage.set("k", "v".to_string());
        }

        let mut storage = MemoryStorage::new();
        write_through(&mut storage);
        assert_eq!(storage.get("k").as_deref(), Some("v"));
    }
}

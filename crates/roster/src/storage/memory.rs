//! In-memory durable store stand-in.

use std::collections::HashMap;

use super::KeyValueStore;
use crate::error::{Error, Result};

/// A [`KeyValueStore`] that keeps everything in a `HashMap`.
///
/// Nothing outlives the value. Writes can be made to fail with
/// [`MemoryStore::fail_writes`], which simulates a full or read-only backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    fail_writes: bool,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single key.
    #[must_use]
    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self {
            entries,
            fail_writes: false,
        }
    }

    /// Make every subsequent write fail (or succeed again).
    pub fn fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// Number of keys held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        if self.fail_writes {
            return Err(Error::storage_write(key, "quota exceeded"));
        }
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<bool> {
        if self.fail_writes {
            return Err(Error::storage_write(key, "store is read-only"));
        }
        Ok(self.entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_empty() {
        let store = MemoryStore::new();
        assert!(store.is_empty());
        assert!(store.get("students").unwrap().is_none());
    }

    #[test]
    fn test_with_entry() {
        let store = MemoryStore::with_entry("students", "[]");
        assert_eq!(store.len(), 1);
        assert_eq!(store.get("students").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_set_overwrites() {
        let mut store = MemoryStore::new();
        store.set("students", "a").unwrap();
        store.set("students", "b").unwrap();
        assert_eq!(store.get("students").unwrap().as_deref(), Some("b"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_failing_writes_leave_value() {
        let mut store = MemoryStore::with_entry("students", "old");
        store.fail_writes(true);

        let err = store.set("students", "new").unwrap_err();
        assert!(err.is_storage_write_error());
        assert!(store.remove("students").is_err());
        assert_eq!(store.get("students").unwrap().as_deref(), Some("old"));

        store.fail_writes(false);
        store.set("students", "new").unwrap();
        assert_eq!(store.get("students").unwrap().as_deref(), Some("new"));
    }

    #[test]
    fn test_remove() {
        let mut store = MemoryStore::with_entry("students", "[]");
        assert!(store.remove("students").unwrap());
        assert!(!store.remove("students").unwrap());
    }
}

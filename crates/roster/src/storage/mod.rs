//! Storage layer for roster.
//!
//! The roster is persisted as JSON text under a single key of a durable
//! key-value store. [`KeyValueStore`] is the seam between the two: the
//! [`RosterPersistence`] adapter only needs `get`/`set`, so it runs the same
//! against the `SQLite` store in production and [`MemoryStore`] in tests.

mod memory;
pub mod migrations;
pub mod schema;
mod sqlite;

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::student::Student;

pub use memory::MemoryStore;
pub use sqlite::{SqliteStore, StoreStats};

/// Key the roster is stored under.
pub const DEFAULT_KEY: &str = "students";

/// Suffix of the key an unreadable roster is preserved under.
pub const CORRUPT_SUFFIX: &str = ".corrupt";

/// A durable string-keyed store.
pub trait KeyValueStore {
    /// Read the value under `key`, or `None` if it was never set.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if the backend rejects the write.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Returns `true` if it existed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if the backend rejects the delete.
    fn remove(&mut self, key: &str) -> Result<bool>;
}

/// Serialize a roster to its persisted JSON form.
///
/// # Errors
///
/// Returns [`Error::Serialize`] if serialization fails.
pub fn serialize(roster: &[Student]) -> Result<String> {
    serde_json::to_string(roster).map_err(Error::Serialize)
}

/// Parse persisted JSON back into a roster.
///
/// Fields are taken as stored; nothing is re-validated, and a program label
/// outside the offered set loads as [`Enrollment::Other`].
///
/// [`Enrollment::Other`]: crate::student::Enrollment::Other
///
/// # Errors
///
/// Returns [`Error::Parse`] if `raw` is not a valid roster.
pub fn deserialize(raw: &str) -> Result<Vec<Student>> {
    serde_json::from_str(raw).map_err(Error::Parse)
}

/// Loads and saves the roster through a [`KeyValueStore`].
#[derive(Debug)]
pub struct RosterPersistence<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> RosterPersistence<S> {
    /// Wrap a store, using the default `"students"` key.
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_KEY)
    }

    /// Wrap a store, using a custom key.
    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// The key the roster lives under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The wrapped store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the wrapped store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Read the raw serialized roster, or `None` if it was never saved.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    pub fn load(&self) -> Result<Option<String>> {
        self.store.get(&self.key)
    }

    /// Serialize and write the roster, overwriting the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if the store rejects the write.
    pub fn save(&mut self, roster: &[Student]) -> Result<()> {
        let raw = serialize(roster)?;
        self.store.set(&self.key, &raw)?;
        debug!("Saved {} students under '{}'", roster.len(), self.key);
        Ok(())
    }

    /// Key an unreadable roster is copied to before it is overwritten.
    #[must_use]
    pub fn backup_key(&self) -> String {
        format!("{}{CORRUPT_SUFFIX}", self.key)
    }

    /// Copy `raw` to [`backup_key`](Self::backup_key).
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if the store rejects the write.
    pub fn back_up(&mut self, raw: &str) -> Result<String> {
        let key = self.backup_key();
        self.store.set(&key, raw)?;
        info!("Preserved unreadable roster under '{key}'");
        Ok(key)
    }

    /// Remove the stored roster so the next start falls back to the seed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StorageWrite`] if the store rejects the delete.
    pub fn clear(&mut self) -> Result<bool> {
        self.store.remove(&self.key)
    }

    /// Unwrap the store.
    pub fn into_inner(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::student::Program;

    fn student(id: &str, name: &str, program: Program) -> Student {
        Student {
            id: id.to_string(),
            full_name: name.to_string(),
            image: format!("https://example.com/{id}.png"),
            phone: "555-0100".to_string(),
            email: format!("{id}@example.com"),
            program: program.into(),
            graduation_year: 2025,
            graduated: false,
        }
    }

    fn roster() -> Vec<Student> {
        vec![
            student("a", "Ana", Program::WebDev),
            student("b", "Bo", Program::UxUi),
            student("c", "Cy", Program::Data),
        ]
    }

    #[test]
    fn test_round_trip() {
        let roster = roster();
        let raw = serialize(&roster).unwrap();
        assert_eq!(deserialize(&raw).unwrap(), roster);
    }

    #[test]
    fn test_round_trip_empty() {
        let raw = serialize(&[]).unwrap();
        assert_eq!(raw, "[]");
        assert!(deserialize(&raw).unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_bad_json() {
        let err = deserialize(r#"{"bad json"#).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_deserialize_wrong_shape() {
        let err = deserialize(r#"{"students": []}"#).unwrap_err();
        assert!(err.is_parse_error());
    }

    #[test]
    fn test_deserialize_keeps_out_of_range_year() {
        let raw = r#"[{"id":"z","fullName":"Zed","image":"i","phone":"p","email":"e",
            "program":"Data","graduationYear":1990,"graduated":true}]"#;
        let roster = deserialize(raw).unwrap();
        assert_eq!(roster[0].graduation_year, 1990);
    }

    #[test]
    fn test_deserialize_keeps_unknown_program() {
        let raw = r#"[{"id":"r1","fullName":"Real User","image":"i","phone":"p","email":"e",
            "program":"Cybersecurity","graduationYear":2024,"graduated":false}]"#;
        let roster = deserialize(raw).unwrap();

        assert_eq!(roster[0].full_name, "Real User");
        assert_eq!(roster[0].program.label(), "Cybersecurity");
        assert!(serialize(&roster).unwrap().contains(r#""program":"Cybersecurity""#));
    }

    #[test]
    fn test_load_absent() {
        let persistence = RosterPersistence::new(MemoryStore::new());
        assert!(persistence.load().unwrap().is_none());
        assert_eq!(persistence.key(), "students");
    }

    #[test]
    fn test_save_then_load() {
        let mut persistence = RosterPersistence::new(MemoryStore::new());
        persistence.save(&roster()).unwrap();

        let raw = persistence.load().unwrap().unwrap();
        assert_eq!(deserialize(&raw).unwrap(), roster());
    }

    #[test]
    fn test_save_overwrites() {
        let mut persistence = RosterPersistence::new(MemoryStore::new());
        persistence.save(&roster()).unwrap();
        persistence.save(&roster()[..1]).unwrap();

        let raw = persistence.load().unwrap().unwrap();
        assert_eq!(deserialize(&raw).unwrap().len(), 1);
    }

    #[test]
    fn test_save_uses_custom_key() {
        let mut persistence = RosterPersistence::with_key(MemoryStore::new(), "cohort");
        persistence.save(&roster()).unwrap();

        let store = persistence.into_inner();
        assert!(store.get("students").unwrap().is_none());
        assert!(store.get("cohort").unwrap().is_some());
    }

    #[test]
    fn test_save_failure_is_storage_write_error() {
        let mut persistence = RosterPersistence::new(MemoryStore::new());
        persistence.store_mut().fail_writes(true);

        let err = persistence.save(&roster()).unwrap_err();
        assert!(err.is_storage_write_error());
    }

    #[test]
    fn test_back_up_writes_beside_roster() {
        let mut persistence = RosterPersistence::with_key(MemoryStore::new(), "cohort");
        assert_eq!(persistence.backup_key(), "cohort.corrupt");

        let key = persistence.back_up(r#"{"bad json"#).unwrap();
        assert_eq!(key, "cohort.corrupt");
        assert_eq!(
            persistence.store().get("cohort.corrupt").unwrap().as_deref(),
            Some(r#"{"bad json"#)
        );
        assert!(persistence.load().unwrap().is_none());
    }

    #[test]
    fn test_clear() {
        let mut persistence = RosterPersistence::new(MemoryStore::new());
        persistence.save(&roster()).unwrap();

        assert!(persistence.clear().unwrap());
        assert!(persistence.load().unwrap().is_none());
    }

    #[test]
    fn test_persisted_layout_matches_sqlite() {
        let mut persistence = RosterPersistence::new(SqliteStore::open_in_memory().unwrap());
        persistence.save(&roster()).unwrap();

        let raw = persistence.store().get("students").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert!(value.is_array());
        assert_eq!(value[1]["fullName"], "Bo");
        assert_eq!(value[1]["program"], "UXUI");
    }
}

//! Seed dataset used when no roster has been stored yet.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::student::{Program, Student};

/// Seed data compiled into the binary.
pub const BUNDLED_SEED: &str = include_str!("../assets/students.json");

/// Origin label used in errors for the bundled seed.
const BUNDLED_ORIGIN: &str = "bundled seed";

/// A seed entry. Same shape as [`Student`], but `id` may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedRecord {
    /// Identifier, if the seed already carries one.
    #[serde(default)]
    pub id: Option<String>,
    /// Full name.
    pub full_name: String,
    /// URL of the profile picture.
    pub image: String,
    /// Phone number.
    pub phone: String,
    /// Email address.
    pub email: String,
    /// Enrolled program.
    pub program: Program,
    /// Graduation year.
    pub graduation_year: i64,
    /// Whether the student has graduated.
    pub graduated: bool,
}

impl SeedRecord {
    /// Turn this record into a student, generating an id if it has none.
    ///
    /// An empty id counts as missing.
    #[must_use]
    pub fn into_student(self) -> Student {
        let id = self
            .id
            .filter(|id| !id.is_empty())
            .unwrap_or_else(Student::generate_id);
        Student {
            id,
            full_name: self.full_name,
            image: self.image,
            phone: self.phone,
            email: self.email,
            program: self.program.into(),
            graduation_year: self.graduation_year,
            graduated: self.graduated,
        }
    }

    fn has_id(&self) -> bool {
        self.id.as_deref().is_some_and(|id| !id.is_empty())
    }
}

/// The default roster for a fresh store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    records: Vec<SeedRecord>,
}

impl Seed {
    /// Build a seed from records.
    #[must_use]
    pub fn new(records: Vec<SeedRecord>) -> Self {
        Self { records }
    }

    /// The seed bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedLoad`] if the bundled JSON is malformed.
    pub fn bundled() -> Result<Self> {
        Self::from_json(BUNDLED_ORIGIN, BUNDLED_SEED)
    }

    /// Read a seed from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedLoad`] if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let origin = path.display().to_string();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| Error::seed_load(origin.as_str(), e.to_string()))?;
        Self::from_json(&origin, &raw)
    }

    /// Parse a seed from JSON text. `origin` only labels errors.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SeedLoad`] if `raw` is not a JSON array of seed records.
    pub fn from_json(origin: &str, raw: &str) -> Result<Self> {
        let records: Vec<SeedRecord> =
            serde_json::from_str(raw).map_err(|e| Error::seed_load(origin, e.to_string()))?;
        Ok(Self { records })
    }

    /// Seed records, in order.
    #[must_use]
    pub fn records(&self) -> &[SeedRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the seed has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Materialize the roster, backfilling any missing ids.
    ///
    /// The first record carrying an id keeps it; a later record repeating
    /// that id gets a fresh one, so the result never holds duplicates.
    #[must_use]
    pub fn to_students(&self) -> Vec<Student> {
        let backfilled = self.records.iter().filter(|r| !r.has_id()).count();
        if backfilled > 0 {
            debug!(
                "Assigning ids to {} of {} seed records",
                backfilled,
                self.records.len()
            );
        }

        let mut seen = HashSet::with_capacity(self.records.len());
        self.records
            .iter()
            .cloned()
            .map(|record| {
                let mut student = record.into_student();
                while !seen.insert(student.id.clone()) {
                    warn!("Seed repeats id '{}', assigning a new one", student.id);
                    student.id = Student::generate_id();
                }
                student
            })
            .collect()
    }
}

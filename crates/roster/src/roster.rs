//! The roster store.
//!
//! [`RosterStore`] owns the ordered list of students and is the only thing
//! that changes it. Every change is saved through the injected
//! [`RosterPersistence`] before control returns to the caller.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::draft::DraftStudent;
use crate::error::{Error, Result};
use crate::seed::Seed;
use crate::storage::{deserialize, KeyValueStore, RosterPersistence};
use crate::student::{Program, Student};

/// What to do when the stored roster cannot be parsed at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CorruptPolicy {
    /// Log a warning and start from the seed dataset.
    #[default]
    Reseed,
    /// Fail initialization with the parse error.
    Fail,
}

/// Return a new roster with `student` appended. `roster` is left untouched.
#[must_use]
pub fn append(roster: &[Student], student: Student) -> Vec<Student> {
    let mut next = Vec::with_capacity(roster.len() + 1);
    next.extend_from_slice(roster);
    next.push(student);
    next
}

/// Compute the initial roster.
///
/// A non-empty stored value is parsed as-is. An absent or empty one selects
/// the seed, with missing ids backfilled. The only side effect is the read.
///
/// # Errors
///
/// Returns an error if the store cannot be read, or [`Error::Parse`] if the
/// stored value is corrupt and `policy` is [`CorruptPolicy::Fail`].
pub fn initialize<S: KeyValueStore>(
    persistence: &RosterPersistence<S>,
    seed: &Seed,
    policy: CorruptPolicy,
) -> Result<Vec<Student>> {
    load_or_seed(persistence, seed, policy).map(|(students, _)| students)
}

/// Where the initial roster came from.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Origin {
    Stored,
    Seeded,
    /// The stored value was unreadable; it is kept until the first change.
    Recovered(String),
}

fn load_or_seed<S: KeyValueStore>(
    persistence: &RosterPersistence<S>,
    seed: &Seed,
    policy: CorruptPolicy,
) -> Result<(Vec<Student>, Origin)> {
    match persistence.load()? {
        Some(raw) if !raw.is_empty() => match deserialize(&raw) {
            Ok(students) => {
                info!("Loaded {} students from store", students.len());
                Ok((students, Origin::Stored))
            }
            Err(err) if err.is_parse_error() && policy == CorruptPolicy::Reseed => {
                warn!(
                    "Stored roster under '{}' is unreadable, reseeding: {err}",
                    persistence.key()
                );
                Ok((seed.to_students(), Origin::Recovered(raw)))
            }
            Err(err) => Err(err),
        },
        _ => {
            info!("No stored roster, loading {} seed students", seed.len());
            Ok((seed.to_students(), Origin::Seeded))
        }
    }
}

/// Result of a save that followed a roster change.
#[derive(Debug)]
pub enum SaveStatus {
    /// The durable copy matches the in-memory roster.
    Saved,
    /// The write failed; the in-memory roster is still correct.
    Unsaved(Error),
}

impl SaveStatus {
    /// Whether the durable copy is up to date.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved)
    }
}

/// Counts over the current roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterSummary {
    /// Number of students.
    pub total: usize,
    /// Number of students marked graduated.
    pub graduated: usize,
    /// Students per program, in intake order.
    pub by_program: Vec<(Program, usize)>,
    /// Students whose stored program is none of the offered ones.
    pub other_programs: usize,
}

/// Holds the roster and keeps the durable copy in step with it.
#[derive(Debug)]
pub struct RosterStore<S> {
    persistence: RosterPersistence<S>,
    students: Vec<Student>,
    unreadable: Option<String>,
}

impl<S: KeyValueStore> RosterStore<S> {
    /// Build the store from whatever the durable store holds, falling back to
    /// `seed`. A seeded roster is written back right away so the generated
    /// ids stay stable across runs.
    ///
    /// A roster recovered from an unreadable stored value is not written
    /// back. The stored value stays in place until the first change, which
    /// copies it to [`RosterPersistence::backup_key`] before saving.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`initialize`]. A failed
    /// write-back is only logged.
    pub fn open(
        persistence: RosterPersistence<S>,
        seed: &Seed,
        policy: CorruptPolicy,
    ) -> Result<Self> {
        let (students, origin) = load_or_seed(&persistence, seed, policy)?;
        let mut store = Self {
            persistence,
            students,
            unreadable: None,
        };
        match origin {
            Origin::Stored => {}
            Origin::Seeded => {
                store.persist();
            }
            Origin::Recovered(raw) => store.unreadable = Some(raw),
        }
        Ok(store)
    }

    /// The roster in display order.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    /// Number of students.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the roster is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    /// Look up a student by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.id == id)
    }

    /// The persistence adapter.
    pub fn persistence(&self) -> &RosterPersistence<S> {
        &self.persistence
    }

    /// Whether the roster was recovered from an unreadable stored value that
    /// has not been backed up yet.
    #[must_use]
    pub fn is_recovered(&self) -> bool {
        self.unreadable.is_some()
    }

    /// Mutable access to the persistence adapter.
    pub fn persistence_mut(&mut self) -> &mut RosterPersistence<S> {
        &mut self.persistence
    }

    /// Append a student and save.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateId`] if a student with the same id is
    /// already on the roster; nothing changes in that case. A failed save is
    /// reported through the returned [`SaveStatus`], not as an error.
    pub fn add(&mut self, student: Student) -> Result<SaveStatus> {
        if self.get(&student.id).is_some() {
            return Err(Error::DuplicateId { id: student.id });
        }
        Ok(self.push(student))
    }

    /// Validate a draft, add the resulting student, and reset the draft.
    ///
    /// A rejected draft leaves both the roster and the draft unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the draft is incomplete.
    pub fn submit(&mut self, draft: &mut DraftStudent) -> Result<(String, SaveStatus)> {
        let mut student = match draft.validate() {
            Ok(student) => student,
            Err(err) => {
                debug!("Rejected draft: {err}");
                return Err(err.into());
            }
        };
        while self.get(&student.id).is_some() {
            student.id = Student::generate_id();
        }
        let id = student.id.clone();
        let status = self.push(student);
        draft.reset();
        Ok((id, status))
    }

    /// Counts by program and graduation status.
    #[must_use]
    pub fn summary(&self) -> RosterSummary {
        let by_program = Program::ALL
            .into_iter()
            .map(|program| {
                let count = self.students.iter().filter(|s| s.program == program).count();
                (program, count)
            })
            .collect();
        RosterSummary {
            total: self.students.len(),
            graduated: self.students.iter().filter(|s| s.graduated).count(),
            by_program,
            other_programs: self
                .students
                .iter()
                .filter(|s| s.program.program().is_none())
                .count(),
        }
    }

    fn push(&mut self, student: Student) -> SaveStatus {
        debug!("Adding student {} ({})", student.id, student.full_name);
        self.students = append(&self.students, student);
        self.persist()
    }

    fn persist(&mut self) -> SaveStatus {
        if let Some(raw) = self.unreadable.take() {
            if let Err(err) = self.persistence.back_up(&raw) {
                warn!("Unreadable roster not backed up, keeping it in place: {err}");
                self.unreadable = Some(raw);
                return SaveStatus::Unsaved(err);
            }
        }
        match self.persistence.save(&self.students) {
            Ok(()) => SaveStatus::Saved,
            Err(err) => {
                warn!("Roster change not persisted: {err}");
                SaveStatus::Unsaved(err)
            }
        }
    }
}

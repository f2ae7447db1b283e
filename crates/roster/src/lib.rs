//! `roster` - A student roster with durable local persistence
//!
//! This library provides the roster data model, draft intake with
//! validation, and the store that keeps the roster in step with a durable
//! key-value backend.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod cli;
pub mod config;
pub mod draft;
pub mod error;
pub mod logging;
pub mod roster;
pub mod seed;
pub mod storage;
pub mod student;

pub use config::Config;
pub use draft::{DraftStudent, Field, ValidationError};
pub use error::{Error, Result};
pub use logging::init_logging;
pub use roster::{append, initialize, CorruptPolicy, RosterStore, RosterSummary, SaveStatus};
pub use seed::Seed;
pub use storage::{deserialize, serialize, KeyValueStore, MemoryStore, RosterPersistence, SqliteStore};
pub use student::{Enrollment, Program, Student};

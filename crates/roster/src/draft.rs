//! Intake of new students.
//!
//! A [`DraftStudent`] collects the form fields one at a time. Nothing reaches
//! the roster until [`DraftStudent::validate`] turns the draft into a
//! [`Student`].

use std::fmt;

use crate::student::{Program, Student, GRADUATION_YEAR_MIN, PROGRAM_SENTINEL};

/// A required intake field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Full name.
    FullName,
    /// Profile image URL.
    Image,
    /// Phone number.
    Phone,
    /// Email address.
    Email,
    /// Program selection.
    Program,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::FullName => "full name",
            Self::Image => "profile image",
            Self::Phone => "phone",
            Self::Email => "email",
            Self::Program => "program",
        };
        f.write_str(name)
    }
}

/// A draft was rejected because required fields are missing.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("please fill in all required fields before submitting (missing: {})", join_fields(.missing))]
pub struct ValidationError {
    /// Fields that were empty, in form order.
    pub missing: Vec<Field>,
}

fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Form state for a student that has not been submitted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftStudent {
    full_name: String,
    image: String,
    phone: String,
    email: String,
    program: Option<Program>,
    graduation_year: i64,
    graduated: bool,
}

impl Default for DraftStudent {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            image: String::new(),
            phone: String::new(),
            email: String::new(),
            program: None,
            graduation_year: GRADUATION_YEAR_MIN,
            graduated: false,
        }
    }
}

impl DraftStudent {
    /// An empty draft: blank fields, no program, earliest graduation year.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the full name.
    pub fn set_full_name(&mut self, value: impl Into<String>) -> &mut Self {
        self.full_name = value.into();
        self
    }

    /// Set the profile image URL.
    pub fn set_image(&mut self, value: impl Into<String>) -> &mut Self {
        self.image = value.into();
        self
    }

    /// Set the phone number.
    pub fn set_phone(&mut self, value: impl Into<String>) -> &mut Self {
        self.phone = value.into();
        self
    }

    /// Set the email address.
    pub fn set_email(&mut self, value: impl Into<String>) -> &mut Self {
        self.email = value.into();
        self
    }

    /// Select a program, or `None` for the unselected state.
    pub fn set_program(&mut self, value: Option<Program>) -> &mut Self {
        self.program = value;
        self
    }

    /// Set the graduation year.
    ///
    /// Bounds are the intake widget's job; the draft stores what it is given.
    pub fn set_graduation_year(&mut self, value: i64) -> &mut Self {
        self.graduation_year = value;
        self
    }

    /// Set the graduated flag.
    pub fn set_graduated(&mut self, value: bool) -> &mut Self {
        self.graduated = value;
        self
    }

    /// The currently selected program label, the sentinel when unset.
    #[must_use]
    pub fn program_label(&self) -> &'static str {
        self.program.map_or(PROGRAM_SENTINEL, Program::label)
    }

    /// Check the draft and build a student with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] naming every empty field, plus the
    /// program when none is selected.
    pub fn validate(&self) -> Result<Student, ValidationError> {
        let mut missing = Vec::new();
        for (field, value) in [
            (Field::FullName, &self.full_name),
            (Field::Image, &self.image),
            (Field::Phone, &self.phone),
            (Field::Email, &self.email),
        ] {
            if value.is_empty() {
                missing.push(field);
            }
        }

        let Some(program) = self.program else {
            missing.push(Field::Program);
            return Err(ValidationError { missing });
        };
        if !missing.is_empty() {
            return Err(ValidationError { missing });
        }

        Ok(Student {
            id: Student::generate_id(),
            full_name: self.full_name.clone(),
            image: self.image.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
            program: program.into(),
            graduation_year: self.graduation_year,
            graduated: self.graduated,
        })
    }

    /// Clear the draft back to its initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

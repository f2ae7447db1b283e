//! Core roster types.
//!
//! This module defines the `Student` record and the fixed set of programs a
//! student can be enrolled in.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Label shown for "no program selected". Never a valid stored value.
pub const PROGRAM_SENTINEL: &str = "-- None --";

/// Earliest graduation year accepted at intake.
pub const GRADUATION_YEAR_MIN: i64 = 2023;

/// Latest graduation year accepted at intake.
pub const GRADUATION_YEAR_MAX: i64 = 2030;

/// The program a student is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    /// Web development.
    #[serde(rename = "Web Dev")]
    WebDev,
    /// UX/UI design.
    #[serde(rename = "UXUI")]
    UxUi,
    /// Data analytics.
    #[serde(rename = "Data")]
    Data,
}

impl Program {
    /// All programs, in the order they are offered at intake.
    pub const ALL: [Program; 3] = [Program::WebDev, Program::UxUi, Program::Data];

    /// The label this program is stored and displayed under.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::WebDev => "Web Dev",
            Self::UxUi => "UXUI",
            Self::Data => "Data",
        }
    }

    /// Parse an intake selection.
    ///
    /// The sentinel maps to `Ok(None)`; any other unknown label is an error.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownProgram`] if `label` is neither a program nor the sentinel.
    pub fn parse_selection(label: &str) -> Result<Option<Self>, UnknownProgram> {
        if label == PROGRAM_SENTINEL {
            Ok(None)
        } else {
            label.parse().map(Some)
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A program label that matches none of the offered programs.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown program: {0}")]
pub struct UnknownProgram(pub String);

impl FromStr for Program {
    type Err = UnknownProgram;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|program| program.label() == s)
            .ok_or_else(|| UnknownProgram(s.to_string()))
    }
}

/// The program recorded on a stored student.
///
/// Intake only ever produces [`Enrollment::Known`]. A stored roster is taken
/// as written, so a label outside [`Program::ALL`] is carried through as
/// [`Enrollment::Other`] instead of failing the whole load.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Enrollment {
    /// One of the offered programs.
    Known(Program),
    /// Any other label found in stored data.
    Other(String),
}

impl Enrollment {
    /// The stored label.
    #[must_use]
    pub fn label(&self) -> &str {
        match self {
            Self::Known(program) => program.label(),
            Self::Other(label) => label,
        }
    }

    /// The offered program, if this is one.
    #[must_use]
    pub fn program(&self) -> Option<Program> {
        match self {
            Self::Known(program) => Some(*program),
            Self::Other(_) => None,
        }
    }
}

impl From<Program> for Enrollment {
    fn from(program: Program) -> Self {
        Self::Known(program)
    }
}

impl PartialEq<Program> for Enrollment {
    fn eq(&self, other: &Program) -> bool {
        self.program() == Some(*other)
    }
}

impl fmt::Display for Enrollment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A student on the roster.
///
/// Serialized with camelCase field names; this is the persisted layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    /// Unique identifier, assigned once and never changed.
    pub id: String,
    /// Full name.
    pub full_name: String,
    /// URL of the profile picture.
    pub image: String,
    /// Phone number, free-form.
    pub phone: String,
    /// Email address, free-form.
    pub email: String,
    /// Enrolled program.
    pub program: Enrollment,
    /// Expected or actual graduation year.
    pub graduation_year: i64,
    /// Whether the student has graduated.
    pub graduated: bool,
}

impl Student {
    /// Generate a fresh unique identifier.
    #[must_use]
    pub fn generate_id() -> String {
        Uuid::new_v4().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Student {
        Student {
            id: "a1".to_string(),
            full_name: "Ana Lima".to_string(),
            image: "https://example.com/ana.png".to_string(),
            phone: "555-0100".to_string(),
            email: "ana@example.com".to_string(),
            program: Program::WebDev.into(),
            graduation_year: 2024,
            graduated: true,
        }
    }

    #[test]
    fn test_program_labels() {
        assert_eq!(Program::WebDev.label(), "Web Dev");
        assert_eq!(Program::UxUi.label(), "UXUI");
        assert_eq!(Program::Data.label(), "Data");
        assert_eq!(Program::Data.to_string(), "Data");
    }

    #[test]
    fn test_program_from_str() {
        for program in Program::ALL {
            assert_eq!(program.label().parse::<Program>().unwrap(), program);
        }
        assert!("Cybersecurity".parse::<Program>().is_err());
    }

    #[test]
    fn test_program_sentinel_is_not_a_program() {
        assert!(PROGRAM_SENTINEL.parse::<Program>().is_err());
        assert_eq!(Program::parse_selection(PROGRAM_SENTINEL), Ok(None));
        assert_eq!(Program::parse_selection("UXUI"), Ok(Some(Program::UxUi)));
        assert_eq!(
            Program::parse_selection("web dev"),
            Err(UnknownProgram("web dev".to_string()))
        );
    }

    #[test]
    fn test_program_serializes_as_label() {
        let json = serde_json::to_string(&Program::WebDev).unwrap();
        assert_eq!(json, "\"Web Dev\"");
        let program: Program = serde_json::from_str("\"UXUI\"").unwrap();
        assert_eq!(program, Program::UxUi);
    }

    #[test]
    fn test_program_rejects_sentinel_on_deserialize() {
        let result: Result<Program, _> = serde_json::from_str("\"-- None --\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_student_uses_camel_case_fields() {
        let json = serde_json::to_value(sample()).unwrap();
        let object = json.as_object().unwrap();

        for field in [
            "id",
            "fullName",
            "image",
            "phone",
            "email",
            "program",
            "graduationYear",
            "graduated",
        ] {
            assert!(object.contains_key(field), "missing field {field}");
        }
        assert_eq!(object.len(), 8);
        assert_eq!(json["graduationYear"], 2024);
        assert_eq!(json["program"], "Web Dev");
    }

    #[test]
    fn test_student_deserialize() {
        let json = r#"{
            "id": "x9",
            "fullName": "Bo",
            "image": "http://x",
            "phone": "555",
            "email": "b@x.com",
            "program": "Data",
            "graduationYear": 2024,
            "graduated": false
        }"#;
        let student: Student = serde_json::from_str(json).unwrap();
        assert_eq!(student.full_name, "Bo");
        assert_eq!(student.program, Program::Data);
        assert!(!student.graduated);
    }

    #[test]
    fn test_student_keeps_unknown_program() {
        let json = r#"{"id":"x1","fullName":"Real User","image":"i","phone":"p",
            "email":"e","program":"Cybersecurity","graduationYear":2031,"graduated":false}"#;
        let student: Student = serde_json::from_str(json).unwrap();

        assert_eq!(student.program, Enrollment::Other("Cybersecurity".to_string()));
        assert_eq!(student.program.program(), None);
        assert_eq!(student.program.to_string(), "Cybersecurity");

        let value = serde_json::to_value(&student).unwrap();
        assert_eq!(value["program"], "Cybersecurity");
    }

    #[test]
    fn test_enrollment_known_program() {
        let enrollment: Enrollment = serde_json::from_str("\"UXUI\"").unwrap();
        assert_eq!(enrollment, Enrollment::Known(Program::UxUi));
        assert_eq!(enrollment, Program::UxUi);
        assert_ne!(enrollment, Program::Data);
        assert_eq!(serde_json::to_string(&enrollment).unwrap(), "\"UXUI\"");
    }

    #[test]
    fn test_generate_id_is_unique_uuid() {
        let a = Student::generate_id();
        let b = Student::generate_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
        assert!(Uuid::parse_str(&a).is_ok());
    }
}

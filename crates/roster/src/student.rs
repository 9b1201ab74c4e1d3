//! The student record type.

use serde::{Deserialize, Serialize};

/// A single student on the roster.
///
/// The roll number is the record's identity: it is compared ignoring case and
/// never changes after the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    name: String,
    roll_number: String,
    grade: String,
}

impl Student {
    /// Create a new student record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        roll_number: impl Into<String>,
        grade: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            roll_number: roll_number.into(),
            grade: grade.into(),
        }
    }

    /// The student's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The student's roll number.
    #[must_use]
    pub fn roll_number(&self) -> &str {
        &self.roll_number
    }

    /// The student's grade.
    #[must_use]
    pub fn grade(&self) -> &str {
        &self.grade
    }

    /// Replace the name and grade, leaving the roll number alone.
    pub fn set_details(&mut self, name: impl Into<String>, grade: impl Into<String>) {
        self.name = name.into();
        self.grade = grade.into();
    }

    /// Check whether this record is identified by `key`, ignoring case.
    #[must_use]
    pub fn has_key(&self, key: &str) -> bool {
        keys_match(&self.roll_number, key)
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Name: {}, Roll Number: {}, Grade: {}",
            self.name, self.roll_number, self.grade
        )
    }
}

/// Compare two roll numbers character by character, ignoring case.
///
/// Two characters match if they are equal, or if their upper-case or
/// lower-case forms are equal.
#[must_use]
pub fn keys_match(a: &str, b: &str) -> bool {
    a.chars().count() == b.chars().count()
        && a.chars().zip(b.chars()).all(|(x, y)| {
            x == y
                || x.to_uppercase().eq(y.to_uppercase())
                || x.to_lowercase().eq(y.to_lowercase())
        })
}

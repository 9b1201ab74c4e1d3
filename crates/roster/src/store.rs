//! In-memory record store.
//!
//! Holds the roster as an ordered list. Lookups are linear scans over the
//! roll number, compared ignoring case.

use crate::student::Student;

/// Ordered, in-memory collection of student records.
///
/// Insertion order is preserved. Mutating operations treat a missing key as a
/// no-op and report it through their return value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordStore {
    students: Vec<Student>,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection with previously loaded records.
    ///
    /// Records are kept as given, including any duplicate keys.
    #[must_use]
    pub fn from_records(students: Vec<Student>) -> Self {
        Self { students }
    }

    /// Append a record unless another record already has its key.
    ///
    /// Returns `true` if the record was appended.
    pub fn add(&mut self, student: Student) -> bool {
        if self.find_by_key(student.roll_number()).is_some() {
            return false;
        }
        self.students.push(student);
        true
    }

    /// The first record whose roll number matches `key`.
    #[must_use]
    pub fn find_by_key(&self, key: &str) -> Option<&Student> {
        self.students.iter().find(|s| s.has_key(key))
    }

    /// Remove every record whose roll number matches `key`.
    ///
    /// Returns how many were removed.
    pub fn remove_by_key(&mut self, key: &str) -> usize {
        let before = self.students.len();
        self.students.retain(|s| !s.has_key(key));
        before - self.students.len()
    }

    /// Set the name and grade of the first record matching `key`.
    ///
    /// Returns `false` and leaves the store untouched if nothing matches.
    pub fn update(&mut self, key: &str, name: &str, grade: &str) -> bool {
        match self.students.iter_mut().find(|s| s.has_key(key)) {
            Some(student) => {
                student.set_details(name, grade);
                true
            }
            None => false,
        }
    }

    /// All records in insertion order.
    #[must_use]
    pub fn list_all(&self) -> &[Student] {
        &self.students
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.students.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }
}

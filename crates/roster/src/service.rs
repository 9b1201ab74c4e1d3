//! The roster service.
//!
//! Pairs the in-memory [`RecordStore`] with the on-disk [`Storage`]. Input is
//! validated here before it reaches the store, and every change is written
//! back to disk straight away. A failed write is logged and kept pending;
//! [`Roster::flush`] retries it and reports the error. Nothing in this module
//! touches the terminal.

use std::path::Path;

use tracing::{debug, error};

use crate::error::{Error, Result};
use crate::storage::{Storage, StorageStats};
use crate::store::RecordStore;
use crate::student::Student;

/// A roster of students backed by a file.
#[derive(Debug)]
pub struct Roster {
    store: RecordStore,
    storage: Storage,
    /// Set when the last save failed.
    unsaved: bool,
}

impl Roster {
    /// Load the roster from `storage`.
    ///
    /// An unreadable file is logged and the roster starts out empty.
    #[must_use]
    pub fn open(mut storage: Storage) -> Self {
        let students = storage.load().unwrap_or_else(|e| {
            error!(
                "Failed to load roster from {}: {e}",
                storage.path().display()
            );
            Vec::new()
        });
        Self::with_students(students, storage)
    }

    /// Load the roster from `storage`, failing if the file is unreadable.
    ///
    /// # Errors
    ///
    /// Returns the load error instead of starting empty.
    pub fn try_open(mut storage: Storage) -> Result<Self> {
        let students = storage.load()?;
        Ok(Self::with_students(students, storage))
    }

    fn with_students(students: Vec<Student>, storage: Storage) -> Self {
        debug!("Roster opened with {} students", students.len());
        Self {
            store: RecordStore::from_records(students),
            storage,
            unsaved: false,
        }
    }

    /// Add a new student.
    ///
    /// All fields are trimmed and must be non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] for an empty field and
    /// [`Error::DuplicateRollNumber`] if the roll number is taken.
    pub fn add(&mut self, name: &str, roll_number: &str, grade: &str) -> Result<()> {
        let name = required("name", name)?;
        let roll_number = required("roll number", roll_number)?;
        let grade = required("grade", grade)?;

        if !self.store.add(Student::new(name, roll_number, grade)) {
            return Err(Error::duplicate(roll_number));
        }
        self.persist();
        Ok(())
    }

    /// Change the name and grade of an existing student.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no student has this roll number, and
    /// [`Error::MissingField`] if the new name or grade is empty.
    pub fn edit(&mut self, roll_number: &str, name: &str, grade: &str) -> Result<()> {
        let roll_number = roll_number.trim();
        if self.store.find_by_key(roll_number).is_none() {
            return Err(Error::not_found(roll_number));
        }
        let name = required("name", name)?;
        let grade = required("grade", grade)?;

        self.store.update(roll_number, name, grade);
        self.persist();
        Ok(())
    }

    /// Remove every student with this roll number.
    ///
    /// Returns how many records were removed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] if no student has this roll number.
    pub fn remove(&mut self, roll_number: &str) -> Result<usize> {
        let roll_number = roll_number.trim();
        let removed = self.store.remove_by_key(roll_number);
        if removed == 0 {
            return Err(Error::not_found(roll_number));
        }
        self.persist();
        Ok(removed)
    }

    /// Look up a student by roll number, ignoring case.
    #[must_use]
    pub fn find(&self, roll_number: &str) -> Option<&Student> {
        self.store.find_by_key(roll_number.trim())
    }

    /// All students in the order they were added.
    #[must_use]
    pub fn students(&self) -> &[Student] {
        self.store.list_all()
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.storage.path()
    }

    /// Statistics about the backing file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn stats(&mut self) -> Result<StorageStats> {
        self.storage.stats()
    }

    /// Whether a change has not reached the disk yet.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved
    }

    /// Retry a save that failed earlier.
    ///
    /// Does nothing when every change has already been written.
    ///
    /// # Errors
    ///
    /// Returns the save error if the roster still cannot be written.
    pub fn flush(&mut self) -> Result<()> {
        if self.unsaved {
            self.storage.save(self.store.list_all())?;
            self.unsaved = false;
        }
        Ok(())
    }

    /// Write the whole roster to disk.
    ///
    /// A failure is logged; the in-memory change stays in place.
    fn persist(&mut self) {
        match self.storage.save(self.store.list_all()) {
            Ok(()) => self.unsaved = false,
            Err(e) => {
                error!(
                    "Failed to save roster to {}: {e}",
                    self.storage.path().display()
                );
                self.unsaved = true;
            }
        }
    }
}

fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::missing_field(field));
    }
    Ok(value)
}

//! Storage layer for roster.
//!
//! This module persists the whole roster to a single `SQLite` file. The file
//! is read once at startup and rewritten in full after every change.

pub mod migrations;
pub mod schema;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info, warn};

use crate::error::{Error, Result};
use crate::student::Student;

/// Path reported for in-memory databases.
const IN_MEMORY_PATH: &str = ":memory:";

/// Metadata key holding the time of the last successful save.
const LAST_SAVED_KEY: &str = "last_saved";

/// Suffix appended to an unreadable roster file when it is moved aside.
const CORRUPT_SUFFIX: &str = ".corrupt";

/// Persistence adapter for the roster.
///
/// The connection is opened lazily: loading from a path that does not exist
/// yields an empty roster without creating anything on disk. Saving creates
/// the parent directories and the file as needed.
///
/// If `load` finds the file unreadable, the next `save` moves it aside to
/// `<file>.corrupt` and writes a fresh file in its place.
#[derive(Debug)]
pub struct Storage {
    /// Path to the database file.
    path: PathBuf,
    /// Database connection, once opened.
    conn: Option<Connection>,
    /// Set when `load` failed on an existing file.
    unreadable: bool,
}

impl Storage {
    /// Create a storage handle for the file at `path`.
    ///
    /// Nothing is read or written until `load`, `save` or `stats` is called.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            conn: None,
            unreadable: false,
        }
    }

    /// Create an in-memory storage instance for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the in-memory database cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|source| Error::DatabaseOpen {
            path: PathBuf::from(IN_MEMORY_PATH),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        Ok(Self {
            path: PathBuf::from(IN_MEMORY_PATH),
            conn: Some(conn),
            unreadable: false,
        })
    }

    /// Get the path to the database file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }

    /// Whether there is anything to read yet.
    fn has_backing_file(&self) -> bool {
        self.conn.is_some() || self.path.exists()
    }

    /// Read the whole roster, in the order it was saved.
    ///
    /// Returns an empty list if the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but is not a readable roster. The
    /// file is then replaced on the next `save`.
    pub fn load(&mut self) -> Result<Vec<Student>> {
        if !self.has_backing_file() {
            debug!("No roster file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let result = self.read_students();
        self.unreadable = result.is_err();
        result
    }

    fn read_students(&mut self) -> Result<Vec<Student>> {
        let students = {
            let conn = self.connection()?;
            let mut stmt = conn.prepare(
                r"
                SELECT name, roll_number, grade
                FROM students ORDER BY position ASC
                ",
            )?;
            let students = stmt
                .query_map([], Self::row_to_student)?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            students
        };

        debug!(
            "Loaded {} students from {}",
            students.len(),
            self.path.display()
        );
        Ok(students)
    }

    /// Replace the stored roster with `students`.
    ///
    /// The rewrite runs in one transaction; if any step fails the previous
    /// contents of the file are kept.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or written, or if an
    /// unreadable file cannot be moved aside.
    pub fn save(&mut self, students: &[Student]) -> Result<()> {
        if self.unreadable {
            self.set_aside()?;
        }

        let conn = self.connection()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM students", [])?;
        {
            let mut stmt = tx.prepare(
                r"
                INSERT INTO students (position, name, roll_number, grade)
                VALUES (?1, ?2, ?3, ?4)
                ",
            )?;
            for (position, student) in students.iter().enumerate() {
                let position = i64::try_from(position).unwrap_or(i64::MAX);
                stmt.execute(params![
                    position,
                    student.name(),
                    student.roll_number(),
                    student.grade(),
                ])?;
            }
        }
        tx.execute(
            "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
            (LAST_SAVED_KEY, Utc::now().to_rfc3339()),
        )?;
        tx.commit()?;

        debug!("Saved {} students to {}", students.len(), self.path.display());
        Ok(())
    }

    /// Get statistics about the stored roster.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read.
    pub fn stats(&mut self) -> Result<StorageStats> {
        if !self.has_backing_file() {
            return Ok(StorageStats::default());
        }

        let (total_students, last_saved) = {
            let conn = self.connection()?;
            let total: i64 =
                conn.query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
            let saved: Option<String> = conn
                .query_row(
                    "SELECT value FROM metadata WHERE key = ?1",
                    [LAST_SAVED_KEY],
                    |row| row.get(0),
                )
                .optional()?;
            (total, saved)
        };

        let last_saved = last_saved
            .and_then(|s| DateTime::parse_from_rfc3339(&s).ok())
            .map(|dt| dt.with_timezone(&Utc));

        let file_size_bytes = if self.is_in_memory() {
            0
        } else {
            std::fs::metadata(&self.path).map(|m| m.len()).unwrap_or(0)
        };

        Ok(StorageStats {
            total_students,
            last_saved,
            file_size_bytes,
        })
    }

    /// Move an unreadable file out of the way so a fresh one can be written.
    fn set_aside(&mut self) -> Result<()> {
        self.conn = None;
        if self.path.exists() {
            let mut target = self.path.clone().into_os_string();
            target.push(CORRUPT_SUFFIX);
            let target = PathBuf::from(target);

            std::fs::rename(&self.path, &target)?;
            warn!(
                "Moved unreadable roster file {} to {}",
                self.path.display(),
                target.display()
            );
        }
        self.unreadable = false;
        Ok(())
    }

    /// The open connection, opening the file first if needed.
    ///
    /// A failed open is not cached, so a later call tries again.
    fn connection(&mut self) -> Result<&mut Connection> {
        let conn = match self.conn.take() {
            Some(conn) => conn,
            None => Self::open_file(&self.path)?,
        };
        Ok(self.conn.insert(conn))
    }

    fn open_file(path: &Path) -> Result<Connection> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(|source| Error::DirectoryCreate {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        debug!("Opening roster file at {}", path.display());
        let conn = Connection::open(path).map_err(|source| Error::DatabaseOpen {
            path: path.to_path_buf(),
            source,
        })?;

        migrations::initialize_schema(&conn)?;

        info!("Roster file opened at {}", path.display());
        Ok(conn)
    }

    fn row_to_student(row: &rusqlite::Row) -> rusqlite::Result<Student> {
        let name: String = row.get(0)?;
        let roll_number: String = row.get(1)?;
        let grade: String = row.get(2)?;
        Ok(Student::new(name, roll_number, grade))
    }
}

/// Statistics about the stored roster.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StorageStats {
    /// Number of students in the file.
    pub total_students: i64,
    /// When the file was last written.
    pub last_saved: Option<DateTime<Utc>>,
    /// Size of the file in bytes.
    pub file_size_bytes: u64,
}

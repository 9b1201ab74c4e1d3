//! `SQLite` schema definitions for the roster file.

/// SQL statement to create the students table.
///
/// `position` records insertion order. Roll numbers are neither unique nor
/// indexed here; lookups happen in memory.
pub const CREATE_STUDENTS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS students (
    position INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    roll_number TEXT NOT NULL,
    grade TEXT NOT NULL
)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_STUDENTS_TABLE, CREATE_METADATA_TABLE];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_statements_not_empty() {
        assert!(!SCHEMA_STATEMENTS.is_empty());
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.trim().is_empty());
        }
    }

    #[test]
    fn test_create_students_table_contains_required_columns() {
        assert!(CREATE_STUDENTS_TABLE.contains("position INTEGER PRIMARY KEY"));
        assert!(CREATE_STUDENTS_TABLE.contains("name TEXT NOT NULL"));
        assert!(CREATE_STUDENTS_TABLE.contains("roll_number TEXT NOT NULL"));
        assert!(CREATE_STUDENTS_TABLE.contains("grade TEXT NOT NULL"));
        assert!(!CREATE_STUDENTS_TABLE.contains("UNIQUE"));
    }

    #[test]
    fn test_no_indexes_declared() {
        for stmt in SCHEMA_STATEMENTS {
            assert!(!stmt.contains("CREATE INDEX"));
        }
    }

    #[test]
    fn test_create_metadata_table_structure() {
        assert!(CREATE_METADATA_TABLE.contains("key TEXT PRIMARY KEY"));
        assert!(CREATE_METADATA_TABLE.contains("value TEXT NOT NULL"));
    }
}

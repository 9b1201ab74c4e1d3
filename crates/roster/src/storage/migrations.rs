//! Schema versioning for the roster file.
//!
//! The version lives in the `metadata` table. A file written by a newer
//! release is refused rather than read with the wrong layout.

use rusqlite::Connection;

use crate::error::{Error, Result};

use super::schema::SCHEMA_STATEMENTS;

/// The current schema version.
pub const CURRENT_VERSION: i32 = 1;

/// Key used to store the schema version in the metadata table.
const VERSION_KEY: &str = "schema_version";

/// Create the tables if needed and check the file's schema version.
///
/// A fresh file is stamped with [`CURRENT_VERSION`].
///
/// # Errors
///
/// Returns an error if the tables cannot be created, or if the file carries
/// a version this build does not understand.
pub fn initialize_schema(conn: &Connection) -> Result<()> {
    for statement in SCHEMA_STATEMENTS {
        conn.execute(statement, [])?;
    }

    match get_schema_version(conn)? {
        None => set_schema_version(conn, CURRENT_VERSION),
        Some(CURRENT_VERSION) => Ok(()),
        Some(version) => Err(Error::DatabaseMigration {
            message: format!(
                "file has schema version {version}, this build supports {CURRENT_VERSION}"
            ),
        }),
    }
}

/// Get the schema version recorded in the database, if any.
fn get_schema_version(conn: &Connection) -> Result<Option<i32>> {
    let result: std::result::Result<String, rusqlite::Error> = conn.query_row(
        "SELECT value FROM metadata WHERE key = ?1",
        [VERSION_KEY],
        |row| row.get(0),
    );

    match result {
        Ok(value) => value.parse().map(Some).map_err(|_| Error::DatabaseMigration {
            message: format!("invalid schema version: {value}"),
        }),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES (?1, ?2)",
        (VERSION_KEY, version.to_string()),
    )?;
    Ok(())
}

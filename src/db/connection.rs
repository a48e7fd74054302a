use std::fs;
use std::path::Path;

use rusqlite::Connection;
use tracing::debug;

use crate::error::NgoError;

use super::migrations;

/// Open (creating if needed) the database at `path` and bring its schema up.
pub fn open_db(path: &Path) -> Result<Connection, NgoError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    debug!(path = %path.display(), "opening database");
    let conn = Connection::open(path)?;
    configure_connection(&conn)?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

/// In-memory database with the same schema, for tests.
pub fn open_in_memory() -> Result<Connection, NgoError> {
    let conn = Connection::open_in_memory()?;
    migrations::run_migrations(&conn)?;
    Ok(conn)
}

fn configure_connection(conn: &Connection) -> Result<(), NgoError> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA busy_timeout=5000;",
    )?;
    Ok(())
}

use rusqlite::Connection;

use crate::error::NgoError;

/// One key, one JSON document. No per-entity tables and no versioning.
pub fn run_migrations(conn: &Connection) -> Result<(), NgoError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS storage (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now'))
        );
        ",
    )?;
    Ok(())
}

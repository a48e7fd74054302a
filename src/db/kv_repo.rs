use rusqlite::{params, Connection, OptionalExtension};

use crate::error::NgoError;

pub fn get_value(conn: &Connection, key: &str) -> Result<Option<String>, NgoError> {
    let value = conn
        .query_row(
            "SELECT value FROM storage WHERE key = ?1",
            params![key],
            |row| row.get(0),
        )
        .optional()?;
    Ok(value)
}

pub fn put_value(conn: &Connection, key: &str, value: &str) -> Result<(), NgoError> {
    conn.execute(
        "INSERT INTO storage (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = datetime('now')",
        params![key, value],
    )?;
    Ok(())
}

pub fn delete_value(conn: &Connection, key: &str) -> Result<bool, NgoError> {
    let changed = conn.execute("DELETE FROM storage WHERE key = ?1", params![key])?;
    Ok(changed > 0)
}

use rusqlite::Connection;
use tracing::debug;

use crate::config::Config;
use crate::error::NgoError;
use crate::models::Project;
use crate::state::SnapshotStore;

use super::{connection, kv_repo};

/// The project set stored as one JSON document under a single key.
pub struct SqliteStore {
    conn: Connection,
    key: String,
}

impl SqliteStore {
    pub fn open(config: &Config) -> Result<Self, NgoError> {
        let conn = connection::open_db(&config.db_path())?;
        Ok(Self {
            conn,
            key: config.storage_key.clone(),
        })
    }

    pub fn in_memory(key: &str) -> Result<Self, NgoError> {
        Ok(Self {
            conn: connection::open_in_memory()?,
            key: key.to_string(),
        })
    }

    /// Whether anything has been written under the key yet.
    pub fn has_snapshot(&self) -> Result<bool, NgoError> {
        Ok(kv_repo::get_value(&self.conn, &self.key)?.is_some())
    }

    /// Drop the stored document so the next load falls back to the seed set.
    pub fn clear(&self) -> Result<bool, NgoError> {
        kv_repo::delete_value(&self.conn, &self.key)
    }

    /// Store raw text under the key without validation.
    pub fn put_raw(&self, raw: &str) -> Result<(), NgoError> {
        kv_repo::put_value(&self.conn, &self.key, raw)
    }
}

impl SnapshotStore for SqliteStore {
    fn load(&self) -> Result<Option<Vec<Project>>, NgoError> {
        let Some(raw) = kv_repo::get_value(&self.conn, &self.key)? else {
            debug!(key = %self.key, "no stored snapshot");
            return Ok(None);
        };
        let projects: Vec<Project> = serde_json::from_str(&raw).map_err(|e| {
            NgoError::corrupt_state(format!("Stored data under '{}' is not valid: {e}", self.key))
        })?;
        debug!(key = %self.key, projects = projects.len(), "loaded snapshot");
        Ok(Some(projects))
    }

    fn save(&self, projects: &[Project]) -> Result<(), NgoError> {
        let raw = serde_json::to_string(projects)
            .map_err(|e| NgoError::storage(format!("Failed to serialize projects: {e}")))?;
        kv_repo::put_value(&self.conn, &self.key, &raw)?;
        debug!(key = %self.key, projects = projects.len(), bytes = raw.len(), "saved snapshot");
        Ok(())
    }
}

//! SQLite-backed presenter state.
//!
//! Persists the resumable bits of a presentation between shell
//! invocations:
//! - Saved deck position per pack (the serialized location key)
//! - Key-value store for countdown engine snapshots

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::StoreError;

/// A saved deck position for one pack.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPosition {
    pub pack_id: String,
    /// Serialized deck location key.
    pub location: String,
    pub updated_at: DateTime<Utc>,
}

/// SQLite store for presenter state.
pub struct StateStore {
    conn: Connection,
}

impl StateStore {
    /// Open the store at `~/.config/quizdeck/quizdeck.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    pub fn open() -> Result<Self, StoreError> {
        let dir = data_dir().map_err(|e| StoreError::DataDir(e.to_string()))?;
        let path = dir.join("quizdeck.db");
        let conn =
            Connection::open(&path).map_err(|source| StoreError::OpenFailed { path, source })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    /// Open an in-memory store (for tests).
    #[cfg(test)]
    pub fn open_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory()
            .map_err(|source| StoreError::OpenFailed {
                path: ":memory:".into(),
                source,
            })?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS kv (
                key   TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS positions (
                pack_id    TEXT PRIMARY KEY,
                location   TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );",
        )?;
        Ok(())
    }

    // ── Key-value store ──────────────────────────────────────────────

    pub fn kv_get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let value = self
            .conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(value)
    }

    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    pub fn kv_delete(&self, key: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }

    // ── Saved positions ──────────────────────────────────────────────

    pub fn position_get(&self, pack_id: &str) -> Result<Option<SavedPosition>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT location, updated_at FROM positions WHERE pack_id = ?1",
                params![pack_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                    ))
                },
            )
            .optional()?;
        match row {
            Some((location, updated_at)) => {
                let updated_at = updated_at
                    .parse::<DateTime<Utc>>()
                    .map_err(|e| StoreError::QueryFailed(e.to_string()))?;
                Ok(Some(SavedPosition {
                    pack_id: pack_id.to_string(),
                    location,
                    updated_at,
                }))
            }
            None => Ok(None),
        }
    }

    pub fn position_set(&self, pack_id: &str, location: &str) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO positions (pack_id, location, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(pack_id) DO UPDATE SET
                 location = excluded.location,
                 updated_at = excluded.updated_at",
            params![pack_id, location, Utc::now().to_rfc3339()],
        )?;
        Ok(())
    }

    pub fn position_clear(&self, pack_id: &str) -> Result<(), StoreError> {
        self.conn
            .execute("DELETE FROM positions WHERE pack_id = ?1", params![pack_id])?;
        Ok(())
    }
}

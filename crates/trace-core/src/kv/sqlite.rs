//! SQLite-backed key-value store.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, TraceError};

use super::KeyValueStore;

/// Key-value table inside a single SQLite database file.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path)?)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS kv (
                key TEXT PRIMARY KEY,
                value TEXT NOT NULL
            );
            "#,
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the database connection, returning an error if the mutex is poisoned.
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TraceError::Storage("SQLite connection poisoned".to_string()))
    }
}

impl KeyValueStore for SqliteStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let conn = self.lock_conn()?;
        let value = conn
            .query_row("SELECT value FROM kv WHERE key = ?1", params![key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute(
            "INSERT INTO kv (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![key, value],
        )?;
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        conn.execute("DELETE FROM kv WHERE key = ?1", params![key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_upsert_replaces_value() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.set("trace_entries", "[]").unwrap();
        store.set("trace_entries", "[1]").unwrap();
        assert_eq!(store.get("trace_entries").unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_persists_to_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trace.db");
        SqliteStore::open(&path)
            .unwrap()
            .set("trace_user", "{}")
            .unwrap();

        let reopened = SqliteStore::open(&path).unwrap();
        assert_eq!(reopened.get("trace_user").unwrap().as_deref(), Some("{}"));
        reopened.delete("trace_user").unwrap();
        assert_eq!(reopened.get("trace_user").unwrap(), None);
    }
}

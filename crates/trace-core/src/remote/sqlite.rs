//! SQLite implementation of the remote data service.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::debug;

use crate::entry::new_entry_id;
use crate::error::{Result, TraceError};

use super::{DataService, EntryRecord};

/// Entries table in a SQLite database shared by every user of the service.
pub struct SqliteDataService {
    conn: Mutex<Connection>,
}

impl SqliteDataService {
    /// Open (or create) the service database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Self::init(Connection::open(path).map_err(remote_error)?)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory().map_err(remote_error)?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                date TEXT NOT NULL,
                title TEXT NOT NULL DEFAULT '',
                body TEXT NOT NULL DEFAULT '',
                updated_at TEXT NOT NULL,
                UNIQUE (user_id, date)
            );
            CREATE INDEX IF NOT EXISTS idx_entries_user_date ON entries(user_id, date);
            "#,
        )
        .map_err(remote_error)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| TraceError::Remote("SQLite connection poisoned".to_string()))
    }
}

fn remote_error(err: rusqlite::Error) -> TraceError {
    TraceError::Remote(format!("SQLite error: {}", err))
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<EntryRecord> {
    Ok(EntryRecord {
        id: row.get(0)?,
        user_id: row.get(1)?,
        date: row.get(2)?,
        title: row.get(3)?,
        body: row.get(4)?,
        updated_at: row.get(5)?,
    })
}

impl DataService for SqliteDataService {
    fn select_by_owner(&self, user_id: &str) -> Result<Vec<EntryRecord>> {
        let conn = self.lock_conn()?;
        let mut stmt = conn
            .prepare(
                "SELECT id, user_id, date, title, body, updated_at
                 FROM entries WHERE user_id = ?1 ORDER BY date ASC",
            )
            .map_err(remote_error)?;
        let rows = stmt
            .query_map(params![user_id], record_from_row)
            .map_err(remote_error)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row.map_err(remote_error)?);
        }
        debug!(user_id, count = records.len(), "selected entries");
        Ok(records)
    }

    fn upsert(&self, records: &[EntryRecord]) -> Result<Vec<EntryRecord>> {
        let mut conn = self.lock_conn()?;
        let tx = conn.transaction().map_err(remote_error)?;
        let mut stored = Vec::with_capacity(records.len());

        for record in records {
            // Ids stay unique across rows; a reused id gets a fresh one.
            let taken: Option<i64> = tx
                .query_row(
                    "SELECT 1 FROM entries WHERE id = ?1 AND NOT (user_id = ?2 AND date = ?3)",
                    params![record.id, record.user_id, record.date],
                    |row| row.get(0),
                )
                .optional()
                .map_err(remote_error)?;
            let id = if taken.is_some() {
                new_entry_id()
            } else {
                record.id.clone()
            };

            let row = tx
                .query_row(
                    "INSERT INTO entries (id, user_id, date, title, body, updated_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                     ON CONFLICT (user_id, date) DO UPDATE SET
                        title = excluded.title,
                        body = excluded.body,
                        updated_at = excluded.updated_at
                     RETURNING id, user_id, date, title, body, updated_at",
                    params![
                        id,
                        record.user_id,
                        record.date,
                        record.title,
                        record.body,
                        record.updated_at
                    ],
                    record_from_row,
                )
                .map_err(remote_error)?;
            stored.push(row);
        }

        tx.commit().map_err(remote_error)?;
        debug!(count = stored.len(), "upserted entries");
        Ok(stored)
    }

    fn delete(&self, user_id: &str, date: &str) -> Result<()> {
        let conn = self.lock_conn()?;
        let removed = conn
            .execute(
                "DELETE FROM entries WHERE user_id = ?1 AND date = ?2",
                params![user_id, date],
            )
            .map_err(remote_error)?;
        debug!(user_id, date, removed, "deleted entries");
        Ok(())
    }
}

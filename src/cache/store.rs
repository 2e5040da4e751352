use std::{
    path::Path,
    sync::{Mutex, MutexGuard},
};

use rusqlite::{Connection, OptionalExtension};
use tracing::debug;

use crate::error::SecretaryError;

use super::{schema::ensure_schema, types::CachedSummary};

/// Per-user summary cache. Invalidation is the caller's job: call `clear`
/// after every task create/update/delete for that user.
pub trait SummaryCache: Send + Sync {
    fn get(&self, user_id: &str) -> Result<Option<CachedSummary>, SecretaryError>;
    fn put(&self, user_id: &str, date: &str, text: &str) -> Result<(), SecretaryError>;
    fn clear(&self, user_id: &str) -> Result<(), SecretaryError>;
}

pub struct ResponseCache {
    conn: Mutex<Connection>,
}

impl ResponseCache {
    pub fn open(path: &Path) -> Result<Self, SecretaryError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|e| SecretaryError::Cache(e.to_string()))?;
            }
        }
        let conn = Connection::open(path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        ensure_schema(&conn)?;
        debug!(path = %path.display(), "response cache opened");
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self, SecretaryError> {
        let conn = Connection::open_in_memory()?;
        ensure_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|p| p.into_inner())
    }
}

impl SummaryCache for ResponseCache {
    fn get(&self, user_id: &str) -> Result<Option<CachedSummary>, SecretaryError> {
        let conn = self.lock();
        let row = conn
            .query_row(
                "SELECT user_id, date, response FROM ai_response WHERE user_id = ? LIMIT 1",
                [user_id],
                |row| {
                    Ok(CachedSummary {
                        user_id: row.get(0)?,
                        date: row.get(1)?,
                        response: row.get(2)?,
                    })
                },
            )
            .optional()?;
        Ok(row)
    }

    fn put(&self, user_id: &str, date: &str, text: &str) -> Result<(), SecretaryError> {
        let conn = self.lock();
        conn.execute(
            "INSERT OR REPLACE INTO ai_response(user_id, date, response) VALUES (?, ?, ?)",
            rusqlite::params![user_id, date, text],
        )?;
        Ok(())
    }

    fn clear(&self, user_id: &str) -> Result<(), SecretaryError> {
        let conn = self.lock();
        conn.execute("DELETE FROM ai_response WHERE user_id = ?", [user_id])?;
        Ok(())
    }
}

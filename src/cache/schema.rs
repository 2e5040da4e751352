use rusqlite::Connection;

use crate::error::SecretaryError;

const SCHEMA_VERSION: &str = "1";

pub fn ensure_schema(conn: &Connection) -> Result<(), SecretaryError> {
    conn.execute_batch(
        r#"
CREATE TABLE IF NOT EXISTS meta (
  key TEXT PRIMARY KEY,
  value TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS ai_response (
  user_id TEXT PRIMARY KEY,
  date TEXT NOT NULL,
  response TEXT NOT NULL
);
"#,
    )?;

    let schema_version: Option<String> = conn
        .query_row(
            "SELECT value FROM meta WHERE key = 'schema_version' LIMIT 1",
            [],
            |row| row.get(0),
        )
        .ok();
    if schema_version.as_deref() != Some(SCHEMA_VERSION) {
        conn.execute(
            "INSERT OR REPLACE INTO meta(key, value) VALUES('schema_version', ?)",
            [SCHEMA_VERSION],
        )?;
    }

    Ok(())
}

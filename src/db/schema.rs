//! SQL DDL for the knowledge tables.
//!
//! Creates the version-1 `knowledge` table and `schema_meta`. Later columns are
//! added by [`super::migrations`]. All DDL uses `IF NOT EXISTS`.

use rusqlite::Connection;

const SCHEMA_SQL: &str = r#"
-- Question -> answer lookup, first write wins
CREATE TABLE IF NOT EXISTS knowledge (
    id INTEGER PRIMARY KEY,
    question TEXT UNIQUE,
    answer TEXT
);

-- Schema metadata
CREATE TABLE IF NOT EXISTS schema_meta (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;

/// Initialize all schema tables. Idempotent (uses IF NOT EXISTS).
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA_SQL)?;

    // Set initial schema version if not already present
    conn.execute(
        "INSERT OR IGNORE INTO schema_meta (key, value) VALUES ('schema_version', '1')",
        [],
    )?;

    Ok(())
}

//! SQL for the knowledge table.
//!
//! Uniqueness of `question` is enforced by the table's `UNIQUE` constraint, so two
//! writers racing on the same new question cannot both insert.

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::StoreError;
use crate::knowledge::types::{KnowledgeEntry, PutStatus};

/// Insert a question/answer pair. Returns [`PutStatus::AlreadyExists`] when the
/// question is already stored; the stored answer is left untouched.
pub fn insert_knowledge(
    conn: &Connection,
    question: &str,
    answer: &str,
) -> Result<PutStatus, StoreError> {
    let now = chrono::Utc::now().to_rfc3339();
    let result = conn.execute(
        "INSERT INTO knowledge (question, answer, created_at) VALUES (?1, ?2, ?3)",
        params![question, answer, now],
    );

    match result {
        Ok(_) => Ok(PutStatus::Inserted),
        Err(e) if is_unique_violation(&e) => Ok(PutStatus::AlreadyExists),
        Err(e) => Err(e.into()),
    }
}

fn is_unique_violation(err: &rusqlite::Error) -> bool {
    matches!(
        err,
        rusqlite::Error::SqliteFailure(e, _)
            if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

/// Exact, case-sensitive lookup.
pub fn lookup_answer(conn: &Connection, question: &str) -> Result<Option<String>, StoreError> {
    let answer = conn
        .query_row(
            "SELECT answer FROM knowledge WHERE question = ?1",
            params![question],
            |row| row.get::<_, Option<String>>(0),
        )
        .optional()?;
    Ok(answer.flatten())
}

/// Newest entries first.
pub fn list_knowledge(conn: &Connection, limit: usize) -> Result<Vec<KnowledgeEntry>, StoreError> {
    let mut stmt = conn.prepare(
        "SELECT question, answer, created_at FROM knowledge ORDER BY id DESC LIMIT ?1",
    )?;
    let entries = stmt
        .query_map(params![limit as i64], |row| {
            Ok(KnowledgeEntry {
                question: row.get::<_, Option<String>>(0)?.unwrap_or_default(),
                answer: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                created_at: row.get(2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(entries)
}

pub fn count_knowledge(conn: &Connection) -> Result<i64, StoreError> {
    Ok(conn.query_row("SELECT COUNT(*) FROM knowledge", [], |r| r.get(0))?)
}

//! Question → answer knowledge store.
//!
//! [`KnowledgeStore`] is a cloneable handle over a shared SQLite connection. Writes
//! are serialized by the connection mutex and the table's unique constraint; the
//! lock is only held for the duration of a single statement.

pub mod store;
pub mod types;

use std::sync::{Arc, Mutex, MutexGuard};

use rusqlite::Connection;

use crate::error::StoreError;
use types::{KnowledgeEntry, PutStatus};

#[derive(Clone)]
pub struct KnowledgeStore {
    db: Arc<Mutex<Connection>>,
}

impl KnowledgeStore {
    pub fn new(conn: Connection) -> Self {
        Self {
            db: Arc::new(Mutex::new(conn)),
        }
    }

    fn conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.db.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Add an entry. Never overwrites; storage failures become [`PutStatus::Failed`].
    pub fn put(&self, question: &str, answer: &str) -> PutStatus {
        let result = self
            .conn()
            .and_then(|conn| store::insert_knowledge(&conn, question, answer));
        match result {
            Ok(status) => {
                tracing::info!(
                    question_len = question.len(),
                    inserted = status.is_inserted(),
                    "knowledge put"
                );
                status
            }
            Err(e) => {
                tracing::error!(error = %e, "knowledge insert failed");
                PutStatus::Failed(e.to_string())
            }
        }
    }

    pub fn get(&self, question: &str) -> Result<Option<String>, StoreError> {
        store::lookup_answer(&*self.conn()?, question)
    }

    pub fn list(&self, limit: usize) -> Result<Vec<KnowledgeEntry>, StoreError> {
        store::list_knowledge(&*self.conn()?, limit)
    }

    pub fn count(&self) -> Result<i64, StoreError> {
        store::count_knowledge(&*self.conn()?)
    }
}

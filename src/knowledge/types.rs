//! Knowledge store record and status types.

use serde::{Deserialize, Serialize};

/// A stored question → answer pair, matching the `knowledge` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub question: String,
    pub answer: String,
    /// RFC 3339 insert time.
    pub created_at: Option<String>,
}

/// Outcome of adding a question. A duplicate is rejected, never overwritten.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PutStatus {
    Inserted,
    AlreadyExists,
    Failed(String),
}

impl PutStatus {
    /// The user-facing status line shown in the UI and API.
    pub fn message(&self) -> String {
        match self {
            Self::Inserted => "ज्ञान सफलतापूर्वक जोड़ा गया।".to_string(),
            Self::AlreadyExists => "इस प्रश्न के लिए ज्ञान पहले से मौजूद है।".to_string(),
            Self::Failed(reason) => format!("ज्ञान जोड़ने में त्रुटि हुई: {reason}"),
        }
    }

    pub fn is_inserted(&self) -> bool {
        matches!(self, Self::Inserted)
    }
}

impl std::fmt::Display for PutStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message())
    }
}

//! Shared state handed to every route handler.

use std::sync::Arc;

use crate::assistant::Assistant;
use crate::transcript::SessionTranscripts;

/// Cheap to clone; all fields are behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<Assistant>,
    pub transcripts: Arc<SessionTranscripts>,
}

impl AppState {
    pub fn new(assistant: Assistant) -> Self {
        Self {
            assistant: Arc::new(assistant),
            transcripts: Arc::new(SessionTranscripts::default()),
        }
    }

    pub fn with_transcripts(mut self, transcripts: SessionTranscripts) -> Self {
        self.transcripts = Arc::new(transcripts);
        self
    }
}

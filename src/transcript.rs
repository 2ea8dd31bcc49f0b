//! Chat transcripts for the web UI.
//!
//! A [`Transcript`] is display-only: the assistant never reads it back. The
//! [`SessionTranscripts`] map keeps one transcript per browser session, bounded
//! both in session count and in messages per transcript.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// Sessions kept before the least recently used one is evicted.
pub const DEFAULT_MAX_SESSIONS: usize = 1000;
/// Messages kept per transcript; older ones are dropped first.
pub const DEFAULT_MAX_MESSAGES: usize = 200;

/// Ordered, append-only list of messages.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Transcript {
    messages: Vec<ChatMessage>,
}

impl Transcript {
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
    }

    /// Drop the oldest messages until at most `max` remain.
    fn keep_latest(&mut self, max: usize) {
        let excess = self.messages.len().saturating_sub(max);
        if excess > 0 {
            self.messages.drain(..excess);
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[derive(Debug)]
struct Entry {
    transcript: Transcript,
    last_touched: u64,
}

#[derive(Debug, Default)]
struct Sessions {
    entries: HashMap<String, Entry>,
    ticks: u64,
}

/// Transcripts keyed by session id, capped at `max_sessions` entries of at most
/// `max_messages` messages each.
#[derive(Debug)]
pub struct SessionTranscripts {
    sessions: Mutex<Sessions>,
    max_sessions: usize,
    max_messages: usize,
}

impl Default for SessionTranscripts {
    fn default() -> Self {
        Self::with_limits(DEFAULT_MAX_SESSIONS, DEFAULT_MAX_MESSAGES)
    }
}

impl SessionTranscripts {
    pub fn with_limits(max_sessions: usize, max_messages: usize) -> Self {
        Self {
            sessions: Mutex::new(Sessions::default()),
            max_sessions: max_sessions.max(1),
            max_messages: max_messages.max(2),
        }
    }

    /// Copy of the session's transcript (empty if unknown or evicted).
    pub fn snapshot(&self, session: &str) -> Transcript {
        self.sessions
            .lock()
            .ok()
            .and_then(|s| s.entries.get(session).map(|e| e.transcript.clone()))
            .unwrap_or_default()
    }

    /// Append one exchange to the session's transcript, evicting the least
    /// recently touched session when a new one would exceed the cap.
    pub fn record_exchange(&self, session: &str, user: &str, assistant: &str) {
        let mut sessions = match self.sessions.lock() {
            Ok(sessions) => sessions,
            Err(_) => {
                tracing::error!(session, "transcript lock poisoned, dropping exchange");
                return;
            }
        };

        if !sessions.entries.contains_key(session) {
            while sessions.entries.len() >= self.max_sessions {
                let oldest = sessions
                    .entries
                    .iter()
                    .min_by_key(|(_, e)| e.last_touched)
                    .map(|(id, _)| id.clone());
                match oldest {
                    Some(id) => {
                        sessions.entries.remove(&id);
                        tracing::debug!(evicted = %id, "transcript evicted");
                    }
                    None => break,
                }
            }
        }

        sessions.ticks += 1;
        let tick = sessions.ticks;
        let entry = sessions
            .entries
            .entry(session.to_string())
            .or_insert_with(|| Entry {
                transcript: Transcript::default(),
                last_touched: tick,
            });
        entry.last_touched = tick;
        entry.transcript.push(Role::User, user);
        entry.transcript.push(Role::Assistant, assistant);
        entry.transcript.keep_latest(self.max_messages);
    }

    pub fn session_count(&self) -> usize {
        self.sessions.lock().map(|s| s.entries.len()).unwrap_or(0)
    }
}

//! [`SessionStore`]: user id → [`Session`], safe for concurrent use.

use dashmap::DashMap;
use prompt::{ChatMessage, MessageRole};
use std::sync::Arc;
use tracing::debug;

use crate::session::Session;

/// User identifier (Telegram user id).
pub type UserId = i64;

/// Default maximum number of messages kept per user.
pub const DEFAULT_MAX_HISTORY: usize = 10;

/// Per-user conversation histories.
///
/// Each method is atomic with respect to other calls on the same user id. A `snapshot` followed by
/// an `append` is *not* one atomic unit; callers that need per-user ordering must serialize their
/// own calls for that user.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<DashMap<UserId, Session>>,
    max_history: usize,
}

impl SessionStore {
    /// Creates an empty store whose sessions hold at most `max_history` messages (clamped to ≥ 1).
    pub fn new(max_history: usize) -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
            max_history: max_history.max(1),
        }
    }

    pub fn max_history(&self) -> usize {
        self.max_history
    }

    /// Replaces the user's session with an empty one.
    pub fn reset(&self, user_id: UserId) {
        self.sessions.insert(user_id, Session::new(self.max_history));
        debug!(user_id, "Session reset");
    }

    /// Removes the user's session. Returns true if one existed.
    pub fn clear(&self, user_id: UserId) -> bool {
        let removed = self.sessions.remove(&user_id).is_some();
        if removed {
            debug!(user_id, "Session cleared");
        }
        removed
    }

    /// Appends a message to the user's session, creating it if absent, and evicts the oldest
    /// messages beyond the bound. Returns the session length after the append.
    pub fn append(&self, user_id: UserId, role: MessageRole, content: impl Into<String>) -> usize {
        let mut session = self
            .sessions
            .entry(user_id)
            .or_insert_with(|| Session::new(self.max_history));
        let evicted = session.push(ChatMessage::new(role, content));
        let len = session.len();
        drop(session);
        debug!(user_id, role = %role, len, evicted, "Appended message to session");
        len
    }

    /// Copy of the user's history, oldest first. Empty if the user has no session.
    pub fn snapshot(&self, user_id: UserId) -> Vec<ChatMessage> {
        self.sessions
            .get(&user_id)
            .map(|s| s.to_vec())
            .unwrap_or_default()
    }

    /// Whether a session (possibly empty) exists for the user.
    pub fn exists(&self, user_id: UserId) -> bool {
        self.sessions.contains_key(&user_id)
    }

    /// Number of messages in the user's session; 0 if absent.
    pub fn size(&self, user_id: UserId) -> usize {
        self.sessions.get(&user_id).map(|s| s.len()).unwrap_or(0)
    }

    /// Whether the user has at least one message.
    pub fn has_history(&self, user_id: UserId) -> bool {
        self.size(user_id) > 0
    }

    /// Number of users with a session.
    pub fn user_count(&self) -> usize {
        self.sessions.len()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY)
    }
}

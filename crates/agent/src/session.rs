//! In-memory session store
//!
//! Check-out/commit semantics: the host takes a session's memory, runs a
//! turn, and commits it back. At-most-one-active-writer per session id is
//! the host's contract; the store only guards its own map.

use std::collections::HashMap;

use chatbot_config::SessionConfig;
use chatbot_core::{Error as CoreError, Result as CoreResult};
use chrono::Utc;
use parking_lot::RwLock;
use uuid::Uuid;

use crate::memory::ConversationMemory;

/// Thread-safe map of live sessions with expiry
pub struct SessionStore {
    config: SessionConfig,
    sessions: RwLock<HashMap<Uuid, ConversationMemory>>,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a fresh session and return its id
    pub fn create(&self) -> Uuid {
        let memory = ConversationMemory::with_config(self.config);
        let id = memory.session_id;
        self.sessions.write().insert(id, memory);
        tracing::debug!(%id, "session created");
        id
    }

    /// Check out a session's memory by id. An expired session is removed
    /// and reported as such.
    pub fn checkout(&self, id: Uuid) -> CoreResult<ConversationMemory> {
        let now = Utc::now();
        let mut sessions = self.sessions.write();

        match sessions.get(&id) {
            None => Err(CoreError::SessionNotFound(id.to_string())),
            Some(memory) if memory.is_expired(now) => {
                sessions.remove(&id);
                tracing::debug!(%id, "session expired");
                Err(CoreError::SessionExpired(id.to_string()))
            }
            Some(memory) => Ok(memory.clone()),
        }
    }

    /// Commit a session's memory back after a turn
    pub fn commit(&self, memory: ConversationMemory) {
        self.sessions.write().insert(memory.session_id, memory);
    }

    /// Reset a session in place, keeping its id slot free for a new start
    pub fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().remove(&id).is_some()
    }

    /// Drop every expired session and return how many were removed
    pub fn sweep_expired(&self) -> usize {
        let now = Utc::now();
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, memory| !memory.is_expired(now));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::debug!(removed, "swept expired sessions");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }

    pub fn ids(&self) -> Vec<Uuid> {
        self.sessions.read().keys().copied().collect()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_create_checkout_commit() {
        let store = SessionStore::default();
        let id = store.create();
        assert_eq!(store.len(), 1);

        let mut memory = store.checkout(id).unwrap();
        memory.message_count = 3;
        store.commit(memory);

        let reloaded = store.checkout(id).unwrap();
        assert_eq!(reloaded.message_count, 3);
    }

    #[test]
    fn test_unknown_session() {
        let store = SessionStore::default();
        let err = store.checkout(Uuid::new_v4()).unwrap_err();
        assert!(matches!(err, CoreError::SessionNotFound(_)));
    }

    #[test]
    fn test_expired_session_is_removed_on_checkout() {
        let store = SessionStore::default();
        let id = store.create();

        let mut memory = store.checkout(id).unwrap();
        memory.started_at = Utc::now() - Duration::hours(25);
        store.commit(memory);

        let err = store.checkout(id).unwrap_err();
        assert!(matches!(err, CoreError::SessionExpired(_)));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_sweep_expired() {
        let store = SessionStore::default();
        let keep = store.create();
        let expire = store.create();

        let mut memory = store.checkout(expire).unwrap();
        memory.started_at = Utc::now() - Duration::hours(30);
        store.commit(memory);

        assert_eq!(store.sweep_expired(), 1);
        assert!(store.checkout(keep).is_ok());
    }

    #[test]
    fn test_remove() {
        let store = SessionStore::default();
        let id = store.create();
        assert!(store.remove(id));
        assert!(!store.remove(id));
    }
}

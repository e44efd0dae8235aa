//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a process-local map. Each session sits behind its
//! own async mutex, so operations on one key are serialized while
//! distinct keys proceed independently.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::session::{Role, Session, SessionKey, UserKey};
use crate::ports::{SessionSnapshot, SessionStore, SessionStoreError};

/// In-memory session storage keyed by session key.
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<SessionKey, Arc<Mutex<Session>>>>>,
}

impl InMemorySessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the mutex for `key`, inserting an empty session on first
    /// reference. The map lock is released before the caller locks the
    /// session itself.
    async fn entry(&self, key: &SessionKey) -> Arc<Mutex<Session>> {
        if let Some(existing) = self.sessions.read().await.get(key) {
            return Arc::clone(existing);
        }

        let mut sessions = self.sessions.write().await;
        Arc::clone(
            sessions
                .entry(key.clone())
                .or_insert_with(|| Arc::new(Mutex::new(Session::new(key.clone())))),
        )
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

fn snapshot(session: &Session) -> SessionSnapshot {
    SessionSnapshot {
        session_key: session.key().clone(),
        user_key: session.user_key().cloned(),
        messages: session.messages().to_vec(),
        created_at: session.created_at(),
        last_active_at: session.last_active_at(),
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_or_create(
        &self,
        key: &SessionKey,
        user_key: Option<&UserKey>,
    ) -> SessionSnapshot {
        let entry = self.entry(key).await;
        let mut session = entry.lock().await;

        if let Some(user_key) = user_key {
            session.set_user_key_if_unset(user_key.clone());
        }

        snapshot(&session)
    }

    async fn append_message_if_new(
        &self,
        key: &SessionKey,
        role: Role,
        content: &str,
    ) -> Result<bool, SessionStoreError> {
        // A cleared session is recreated rather than rejected, so a
        // clear racing an append leaves a session with one message.
        let entry = self.entry(key).await;
        let mut session = entry.lock().await;
        Ok(session.append_if_new(role, content)?)
    }

    async fn get(&self, key: &SessionKey) -> Option<SessionSnapshot> {
        let entry = {
            let sessions = self.sessions.read().await;
            sessions.get(key).map(Arc::clone)?
        };
        let session = entry.lock().await;
        Some(snapshot(&session))
    }

    async fn clear(&self, key: &SessionKey) -> bool {
        self.sessions.write().await.remove(key).is_some()
    }

    async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

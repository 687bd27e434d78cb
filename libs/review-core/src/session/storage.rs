//! Storage port for sessions and statistics.
//!
//! The engine owns no persistence; hosts implement [`SessionStore`] over
//! their database. Write failures must surface as storage errors, never be
//! swallowed; read misses may return `None`.

use super::{ReviewSession, SessionStatistics, SessionStatus, SessionSummary};
use crate::error::{ReviewError, Result, StorageOp};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

pub trait SessionStore: Send + Sync {
    fn save_session(&self, session: &ReviewSession) -> Result<()>;
    fn update_session(&self, session: &ReviewSession) -> Result<()>;
    fn load_session(&self, id: Uuid) -> Result<Option<ReviewSession>>;
    fn delete_session(&self, id: Uuid) -> Result<()>;
    fn save_statistics(&self, session_id: Uuid, statistics: &SessionStatistics) -> Result<()>;
    fn load_statistics(&self, session_id: Uuid) -> Result<Option<SessionStatistics>>;
    fn get_user_sessions(&self, user_id: &str) -> Result<Vec<ReviewSession>>;
    fn get_active_session(&self, user_id: &str) -> Result<Option<ReviewSession>>;
    fn get_session_summaries(&self, user_id: &str) -> Result<Vec<SessionSummary>>;
}

/// In-memory store for tests and embedded hosts.
#[derive(Debug, Default)]
pub struct InMemorySessionStore {
    sessions: Mutex<HashMap<Uuid, ReviewSession>>,
    statistics: Mutex<HashMap<Uuid, SessionStatistics>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn save_session(&self, session: &ReviewSession) -> Result<()> {
        self.sessions
            .lock()
            .expect("session store lock")
            .insert(session.id, session.clone());
        Ok(())
    }

    fn update_session(&self, session: &ReviewSession) -> Result<()> {
        let mut sessions = self.sessions.lock().expect("session store lock");
        if !sessions.contains_key(&session.id) {
            return Err(ReviewError::storage(
                StorageOp::Update,
                format!("session {} does not exist", session.id),
            ));
        }
        sessions.insert(session.id, session.clone());
        Ok(())
    }

    fn load_session(&self, id: Uuid) -> Result<Option<ReviewSession>> {
        Ok(self
            .sessions
            .lock()
            .expect("session store lock")
            .get(&id)
            .cloned())
    }

    fn delete_session(&self, id: Uuid) -> Result<()> {
        self.sessions.lock().expect("session store lock").remove(&id);
        self.statistics
            .lock()
            .expect("statistics store lock")
            .remove(&id);
        Ok(())
    }

    fn save_statistics(&self, session_id: Uuid, statistics: &SessionStatistics) -> Result<()> {
        self.statistics
            .lock()
            .expect("statistics store lock")
            .insert(session_id, statistics.clone());
        Ok(())
    }

    fn load_statistics(&self, session_id: Uuid) -> Result<Option<SessionStatistics>> {
        Ok(self
            .statistics
            .lock()
            .expect("statistics store lock")
            .get(&session_id)
            .cloned())
    }

    fn get_user_sessions(&self, user_id: &str) -> Result<Vec<ReviewSession>> {
        let sessions = self.sessions.lock().expect("session store lock");
        let mut result: Vec<ReviewSession> = sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        result.sort_by_key(|s| std::cmp::Reverse(s.started_at));
        Ok(result)
    }

    fn get_active_session(&self, user_id: &str) -> Result<Option<ReviewSession>> {
        let sessions = self.sessions.lock().expect("session store lock");
        Ok(sessions
            .values()
            .find(|s| s.user_id == user_id && s.status == SessionStatus::Active)
            .cloned())
    }

    fn get_session_summaries(&self, user_id: &str) -> Result<Vec<SessionSummary>> {
        Ok(self
            .get_user_sessions(user_id)?
            .iter()
            .map(SessionSummary::from)
            .collect())
    }
}

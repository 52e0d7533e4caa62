//! In-memory store of running typing tests
//!
//! Sessions live only as long as the process. A session left idle longer
//! than the idle timeout is dropped, so abandoned tests do not hold slots
//! forever. Every operation locks the store briefly and never across an await.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use typing_test_core::TestSession;
use uuid::Uuid;

use crate::error::{ApiError, Result};

/// Session with the time it was last used
struct SessionEntry {
    session: TestSession,
    last_access: DateTime<Utc>,
}

impl SessionEntry {
    fn is_expired(&self, now: DateTime<Utc>, idle_timeout: Duration) -> bool {
        now - self.last_access > idle_timeout
    }
}

pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, SessionEntry>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl SessionStore {
    pub fn new(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            max_sessions,
            idle_timeout,
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<Uuid, SessionEntry>>> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store lock poisoned".to_string()))
    }

    fn purge(&self, sessions: &mut HashMap<Uuid, SessionEntry>) -> usize {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, entry| !entry.is_expired(now, self.idle_timeout));
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, "Expired idle typing tests");
        }
        removed
    }

    /// Drop sessions idle past the timeout, returning how many went
    pub fn purge_expired(&self) -> Result<usize> {
        let mut sessions = self.lock()?;
        Ok(self.purge(&mut sessions))
    }

    /// Store a new session and return its id
    pub fn insert(&self, session: TestSession) -> Result<Uuid> {
        let mut sessions = self.lock()?;
        if sessions.len() >= self.max_sessions {
            self.purge(&mut sessions);
        }
        if sessions.len() >= self.max_sessions {
            return Err(ApiError::SessionLimit(self.max_sessions));
        }
        let id = Uuid::new_v4();
        sessions.insert(
            id,
            SessionEntry {
                session,
                last_access: Utc::now(),
            },
        );
        Ok(id)
    }

    /// Run `f` against a stored session, marking it as used
    pub fn with_session<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut TestSession) -> typing_test_core::Result<T>,
    ) -> Result<T> {
        let mut sessions = self.lock()?;
        let now = Utc::now();
        let expired = match sessions.get(&id) {
            Some(entry) => entry.is_expired(now, self.idle_timeout),
            None => return Err(ApiError::NotFound(format!("Session {}", id))),
        };
        if expired {
            sessions.remove(&id);
            tracing::info!(session_id = %id, "Expired idle typing test");
            return Err(ApiError::NotFound(format!("Session {}", id)));
        }

        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| ApiError::NotFound(format!("Session {}", id)))?;
        entry.last_access = now;
        f(&mut entry.session).map_err(ApiError::from)
    }

    /// Drop a session, returning whether it existed
    pub fn remove(&self, id: Uuid) -> Result<bool> {
        Ok(self.lock()?.remove(&id).is_some())
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }
}

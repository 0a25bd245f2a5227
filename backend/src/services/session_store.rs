//! In-memory registry of dashboard sessions.
//!
//! Sessions share the read-only dataset. The registry lock is only held to look
//! a session up; each session has its own lock, so a slow render or export in
//! one session never stalls another.

use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::controller::{DashboardSession, SessionSettings};
use crate::models::Dataset;

struct SessionEntry {
    session: DashboardSession,
    created_at: DateTime<Utc>,
    last_used_at: DateTime<Utc>,
}

/// Bookkeeping about a stored session.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub last_used_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct SessionStore {
    dataset: Arc<Dataset>,
    settings: SessionSettings,
    sessions: Arc<RwLock<HashMap<String, Arc<Mutex<SessionEntry>>>>>,
}

impl SessionStore {
    pub fn new(dataset: Arc<Dataset>, settings: SessionSettings) -> Self {
        Self {
            dataset,
            settings,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Create a session with the default selection staged and return its ID.
    pub fn create_session(&self) -> String {
        let session_id = Uuid::new_v4().to_string();
        let now = Utc::now();
        let entry = SessionEntry {
            session: DashboardSession::new(Arc::clone(&self.dataset), self.settings.clone()),
            created_at: now,
            last_used_at: now,
        };
        self.sessions
            .write()
            .insert(session_id.clone(), Arc::new(Mutex::new(entry)));
        session_id
    }

    fn entry(&self, session_id: &str) -> Option<Arc<Mutex<SessionEntry>>> {
        self.sessions.read().get(session_id).cloned()
    }

    /// Run `f` against a session. Returns `None` for an unknown ID.
    ///
    /// Only that session is locked while `f` runs.
    pub fn with_session<R>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut DashboardSession) -> R,
    ) -> Option<R> {
        let entry = self.entry(session_id)?;
        let mut entry = entry.lock();
        entry.last_used_at = Utc::now();
        Some(f(&mut entry.session))
    }

    pub fn info(&self, session_id: &str) -> Option<SessionInfo> {
        let entry = self.entry(session_id)?;
        let entry = entry.lock();
        Some(SessionInfo {
            session_id: session_id.to_string(),
            created_at: entry.created_at,
            last_used_at: entry.last_used_at,
        })
    }

    pub fn remove_session(&self, session_id: &str) -> bool {
        self.sessions.write().remove(session_id).is_some()
    }

    /// Drop sessions idle since before `cutoff`. Returns how many were removed.
    ///
    /// A session busy with an operation is in use, so it is kept.
    pub fn evict_idle(&self, cutoff: DateTime<Utc>) -> usize {
        let mut sessions = self.sessions.write();
        let before = sessions.len();
        sessions.retain(|_, entry| {
            entry
                .try_lock()
                .map_or(true, |entry| entry.last_used_at >= cutoff)
        });
        before - sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}

//! In-memory UI sessions
//!
//! A session owns its history, its saved items and the result slot of its
//! discovery searches. Nothing is persisted.

pub mod lists;

pub use lists::SessionLists;

use moka::notification::RemovalCause;
use moka::sync::Cache;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

use crate::discovery::{ContentItem, ResultSlot, SlotSnapshot};

/// Session retention limits
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Seconds without any request before a session is dropped
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,

    /// Upper bound on live sessions; the least recently used go first
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

fn default_idle_timeout_secs() -> u64 {
    30 * 60
}

fn default_max_sessions() -> u64 {
    10_000
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            idle_timeout_secs: default_idle_timeout_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Session errors
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(Uuid),
}

/// State of one UI session
#[derive(Debug)]
pub struct SessionState {
    pub slot: ResultSlot,
    lists: Mutex<SessionLists>,
}

impl SessionState {
    fn new(history_limit: usize) -> Self {
        Self {
            slot: ResultSlot::new(),
            lists: Mutex::new(SessionLists::new(history_limit)),
        }
    }

    pub fn record_view(&self, item: ContentItem) {
        self.lists.lock().unwrap().record_view(item);
    }

    pub fn toggle_saved(&self, item: ContentItem) -> bool {
        self.lists.lock().unwrap().toggle_saved(item)
    }

    pub fn lists(&self) -> SessionLists {
        self.lists.lock().unwrap().clone()
    }

    pub fn results(&self) -> SlotSnapshot {
        self.slot.snapshot()
    }
}

/// All live sessions, bounded by idle time and count
pub struct SessionStore {
    sessions: Cache<Uuid, Arc<SessionState>>,
    history_limit: usize,
}

impl SessionStore {
    pub fn new(history_limit: usize, config: &SessionConfig) -> Self {
        Self::with_idle_timeout(history_limit, config.max_sessions, config.idle_timeout())
    }

    fn with_idle_timeout(history_limit: usize, max_sessions: u64, idle: Duration) -> Self {
        let sessions = Cache::builder()
            .max_capacity(max_sessions)
            .time_to_idle(idle)
            .eviction_listener(|id: Arc<Uuid>, _: Arc<SessionState>, cause: RemovalCause| {
                debug!(session = %id, ?cause, "Session dropped");
            })
            .build();

        Self {
            sessions,
            history_limit,
        }
    }

    pub fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .insert(id, Arc::new(SessionState::new(self.history_limit)));
        info!(session = %id, "Session created");
        id
    }

    /// Look up a session; a hit counts as activity
    pub fn get(&self, id: Uuid) -> Result<Arc<SessionState>, SessionError> {
        self.sessions.get(&id).ok_or(SessionError::NotFound(id))
    }

    pub fn remove(&self, id: Uuid) -> Result<(), SessionError> {
        self.sessions
            .remove(&id)
            .map(|_| info!(session = %id, "Session closed"))
            .ok_or(SessionError::NotFound(id))
    }

    pub fn len(&self) -> usize {
        self.sessions.run_pending_tasks();
        self.sessions.entry_count() as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

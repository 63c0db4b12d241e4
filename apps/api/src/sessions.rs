//! Per-user session state for the interactive tools.
//!
//! Every session owns its own selection queue and writing drafts; nothing is
//! shared between sessions. The store lock is only taken inside `with_session`,
//! which runs a synchronous closure, so it is never held across a network call.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::keywords::models::RankedCandidateList;
use crate::keywords::queue::SelectionQueue;

/// Clustering tool state: the latest ranked list and the queue drawing from it.
#[derive(Debug, Default)]
pub struct ClusteringState {
    pub source: RankedCandidateList,
    pub queue: SelectionQueue,
    pub loaded: bool,
}

impl ClusteringState {
    /// Swaps in a freshly ranked list. The queue keeps its entries and cursor.
    pub fn load(&mut self, source: RankedCandidateList) {
        self.source = source;
        self.loaded = true;
        self.queue.fill(&self.source);
    }
}

#[derive(Debug)]
pub struct SessionContext {
    pub created_at: DateTime<Utc>,
    pub clustering: ClusteringState,
    pub outline: Option<String>,
    pub last_blog: Option<String>,
}

impl SessionContext {
    fn new() -> Self {
        Self {
            created_at: Utc::now(),
            clustering: ClusteringState::default(),
            outline: None,
            last_blog: None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionInfo {
    pub session_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, SessionContext>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self) -> SessionInfo {
        let session_id = Uuid::new_v4();
        let context = SessionContext::new();
        let info = SessionInfo {
            session_id,
            created_at: context.created_at,
        };
        let mut sessions = self.inner.lock().await;
        sessions.insert(session_id, context);
        info!("Session {session_id} started ({} active)", sessions.len());
        info
    }

    /// Discards all state for the session.
    pub async fn end(&self, session_id: Uuid) -> Result<(), AppError> {
        self.inner
            .lock()
            .await
            .remove(&session_id)
            .map(|_| info!("Session {session_id} ended"))
            .ok_or(AppError::SessionNotFound(session_id))
    }

    pub async fn with_session<R>(
        &self,
        session_id: Uuid,
        f: impl FnOnce(&mut SessionContext) -> R,
    ) -> Result<R, AppError> {
        let mut sessions = self.inner.lock().await;
        let context = sessions
            .get_mut(&session_id)
            .ok_or(AppError::SessionNotFound(session_id))?;
        Ok(f(context))
    }
}

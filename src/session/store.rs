//! Selection session store with lazy TTL expiry

use crate::session::config::SessionConfig;
use crate::schema::{ResearchOption, UserSelection, OPTIONS_PER_RESPONSE};
use crate::session::entry::Session;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Maps session identifiers to snapshots of offered options
///
/// Expired sessions are removed when read, and all expired sessions are swept
/// whenever a new one is created.
pub struct SelectionStore {
    config: SessionConfig,
    sessions: Arc<RwLock<HashMap<String, Session>>>,
}

impl SelectionStore {
    /// Create a new store with the given configuration
    pub fn new(config: SessionConfig) -> Self {
        info!("Initializing selection store with config: {:?}", config);

        Self {
            config,
            sessions: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The store configuration
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Open a session over a copy of `options`, returning its identifier
    pub async fn create(&self, options: &[ResearchOption]) -> String {
        let id = Uuid::new_v4().to_string();
        if options.len() != OPTIONS_PER_RESPONSE {
            warn!(
                "Opening session {} over {} options, expected {}",
                id,
                options.len(),
                OPTIONS_PER_RESPONSE
            );
        }
        let session = Session::new(id.clone(), options);

        let mut sessions = self.sessions.write().await;
        sessions.insert(id.clone(), session);
        Self::purge_expired(&mut sessions, &self.config);

        debug!("Created selection session {} with {} options", id, options.len());
        id
    }

    /// Options of a live session
    pub async fn get(&self, session_id: &str) -> Option<Vec<ResearchOption>> {
        self.live_session(session_id)
            .await
            .map(|session| session.options)
    }

    /// Whether `index` is a valid selection in a live session.
    ///
    /// An unknown or expired session and an out-of-range index both yield
    /// `false`.
    pub async fn validate_index(&self, session_id: &str, index: usize) -> bool {
        self.live_session(session_id)
            .await
            .is_some_and(|session| session.contains_index(index))
    }

    /// Record a selection against a live session
    pub async fn select(&self, session_id: &str, index: usize) -> Option<UserSelection> {
        let session = self.live_session(session_id).await?;
        if !session.contains_index(index) {
            debug!("Selection {} out of range for session {}", index, session_id);
            return None;
        }

        Some(UserSelection {
            selection_index: index,
            research_options: session.options,
            timestamp: Utc::now(),
        })
    }

    /// Remove every expired session, returning how many were removed
    pub async fn cleanup_expired(&self) -> usize {
        let mut sessions = self.sessions.write().await;
        Self::purge_expired(&mut sessions, &self.config)
    }

    /// Remove every session
    pub async fn clear_all(&self) {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        sessions.clear();
        info!("Cleared {} selection sessions", count);
    }

    /// Number of sessions held (expired ones included until purged)
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Check if the store holds no sessions
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Internal: copy of a live session, removing it if expired
    async fn live_session(&self, session_id: &str) -> Option<Session> {
        let mut sessions = self.sessions.write().await;

        let session = sessions.get(session_id)?;
        if session.is_expired_at(Utc::now(), self.config.ttl) {
            debug!("Selection session expired: {}", session_id);
            sessions.remove(session_id);
            return None;
        }

        Some(session.clone())
    }

    /// Internal: Remove every session whose TTL elapsed
    fn purge_expired(sessions: &mut HashMap<String, Session>, config: &SessionConfig) -> usize {
        let now = Utc::now();
        let before = sessions.len();
        sessions.retain(|_, session| !session.is_expired_at(now, config.ttl));

        let removed = before - sessions.len();
        if removed > 0 {
            debug!("Cleaned up {} expired selection sessions", removed);
        }
        removed
    }
}

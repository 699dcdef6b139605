//! A short-lived snapshot of options offered for selection

use crate::schema::ResearchOption;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Options offered to a user, kept until the session TTL elapses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    /// Opaque session identifier (UUID v4)
    pub id: String,
    /// Snapshot of the options offered
    pub options: Vec<ResearchOption>,
    /// When the session was created
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a session holding its own copy of `options`
    pub fn new(id: String, options: &[ResearchOption]) -> Self {
        Self {
            id,
            options: options.to_vec(),
            created_at: Utc::now(),
        }
    }

    /// Check whether `ttl` has elapsed since creation, as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        chrono::Duration::from_std(ttl)
            .map(|ttl| now - self.created_at >= ttl)
            .unwrap_or(false)
    }

    /// Whether `index` addresses one of the offered options
    pub fn contains_index(&self, index: usize) -> bool {
        index < self.options.len()
    }
}

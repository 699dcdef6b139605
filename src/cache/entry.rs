//! Cache entry management with TTL support

use crate::cache::types::CacheKey;
use crate::schema::{ResearchOption, ResearchRequest};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// A cached set of enriched research options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry {
    /// The cache key
    pub key: CacheKey,

    /// The normalized request the options were generated for
    pub request: ResearchRequest,

    /// Snapshot of the enriched options
    pub options: Vec<ResearchOption>,

    /// Entry metadata
    pub metadata: CacheMetadata,
}

impl CacheEntry {
    /// Create a new entry holding its own copy of `options`
    pub fn new(key: CacheKey, request: ResearchRequest, options: &[ResearchOption]) -> Self {
        let now = Utc::now();

        let mut entry = Self {
            key,
            request,
            options: options.to_vec(),
            metadata: CacheMetadata {
                created_at: now,
                accessed_at: now,
                access_count: 0,
                size_bytes: 0,
            },
        };
        entry.metadata.size_bytes = entry.calculate_size();
        entry
    }

    /// Check whether `ttl` has elapsed since creation, as of `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match chrono::Duration::from_std(ttl) {
            Ok(ttl) => now - self.metadata.created_at >= ttl,
            // a TTL too large for chrono never elapses
            Err(_) => false,
        }
    }

    /// Check whether `ttl` has elapsed since creation
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.is_expired_at(Utc::now(), ttl)
    }

    /// Mark the entry as accessed (updates access time and count)
    pub fn mark_accessed(&mut self) {
        self.metadata.accessed_at = Utc::now();
        self.metadata.access_count += 1;
    }

    /// Get the age of the entry
    pub fn age(&self) -> Duration {
        (Utc::now() - self.metadata.created_at)
            .to_std()
            .unwrap_or(Duration::from_secs(0))
    }

    /// Approximate size of this entry: the length of its JSON serialization
    pub fn calculate_size(&self) -> usize {
        serde_json::to_vec(self).map(|bytes| bytes.len()).unwrap_or(0)
    }
}

/// Metadata associated with a cache entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheMetadata {
    /// When the entry was created
    pub created_at: DateTime<Utc>,

    /// Last access time
    pub accessed_at: DateTime<Utc>,

    /// Number of cache hits served from this entry (eviction ranking only)
    pub access_count: u64,

    /// Approximate serialized size of the entry in bytes
    pub size_bytes: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn entry() -> CacheEntry {
        let options = vec![ResearchOption::new(
            "人工智能伦理",
            88,
            "summary",
            vec!["趋势分析: x".to_string()],
            vec![],
        )];
        CacheEntry::new(
            "key".to_string(),
            ResearchRequest::new("MIT", "CS", "", ""),
            &options,
        )
    }

    #[test]
    fn test_cache_entry_creation() {
        let entry = entry();

        assert_eq!(entry.key, "key");
        assert_eq!(entry.options.len(), 1);
        assert_eq!(entry.metadata.access_count, 0);
        assert!(!entry.is_expired(Duration::from_secs(3600)));
    }

    #[test]
    fn test_entry_expiration() {
        let entry = entry();
        let created = entry.metadata.created_at;
        let ttl = Duration::from_secs(60);

        assert!(!entry.is_expired_at(created + chrono::Duration::seconds(59), ttl));
        assert!(entry.is_expired_at(created + chrono::Duration::seconds(60), ttl));
        assert!(entry.is_expired_at(created + chrono::Duration::seconds(61), ttl));
    }

    #[test]
    fn test_mark_accessed() {
        let mut entry = entry();
        let initial_time = entry.metadata.accessed_at;

        sleep(Duration::from_millis(10));
        entry.mark_accessed();
        entry.mark_accessed();

        assert_eq!(entry.metadata.access_count, 2);
        assert!(entry.metadata.accessed_at > initial_time);
    }

    #[test]
    fn test_calculate_size() {
        let entry = entry();
        assert!(entry.metadata.size_bytes > 0);
        assert!(entry.metadata.size_bytes >= "人工智能伦理".len());
    }

    #[test]
    fn test_age() {
        let entry = entry();
        sleep(Duration::from_millis(10));
        assert!(entry.age() >= Duration::from_millis(10));
    }
}

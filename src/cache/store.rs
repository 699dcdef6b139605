//! Research result cache with lazy TTL expiry and least-used eviction

use crate::cache::{
    config::CacheConfig,
    entry::CacheEntry,
    key::derive_cache_key,
    types::{CacheKey, CacheStats},
};
use crate::schema::{ResearchOption, ResearchRequest, OPTIONS_PER_RESPONSE};
use chrono::{DateTime, Utc};
use std::collections::{HashMap, VecDeque};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Content-addressed cache of enriched research options
///
/// This implementation provides:
/// - Thread-safe async access via RwLock; every read-modify-write runs under
///   the write lock
/// - Lazy TTL expiry on lookup, plus a sweep on store
/// - Least-used eviction (lowest access count, oldest first on ties) when the
///   entry limit would be exceeded
/// - Deep-copied snapshots on both store and lookup
pub struct ResearchCache {
    /// Cache configuration
    config: CacheConfig,

    /// Internal storage
    store: Arc<RwLock<CacheStore>>,
}

/// Internal cache storage
struct CacheStore {
    /// Main storage: key -> entry
    entries: HashMap<CacheKey, CacheEntry>,

    /// Insertion order, oldest first; breaks access-count ties on eviction
    insertion_order: VecDeque<CacheKey>,

    /// Running counters
    stats: CacheStats,
}

impl ResearchCache {
    /// Create a new cache with the given configuration
    pub fn new(config: CacheConfig) -> Self {
        info!("Initializing research cache with config: {:?}", config);

        let store = CacheStore {
            entries: HashMap::new(),
            insertion_order: VecDeque::new(),
            stats: CacheStats::default(),
        };

        Self {
            config,
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// The cache configuration
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Key under which `request` is cached
    pub fn key_for(request: &ResearchRequest) -> CacheKey {
        derive_cache_key(&request.normalized())
    }

    /// Look up the options cached for `request`.
    ///
    /// An expired entry is removed and reported as absent. A hit increments
    /// the entry's access count.
    pub async fn lookup(&self, request: &ResearchRequest) -> Option<Vec<ResearchOption>> {
        let key = Self::key_for(request);
        let mut store = self.store.write().await;

        let Some(expired) = store
            .entries
            .get(&key)
            .map(|entry| entry.is_expired(self.config.ttl))
        else {
            debug!("Cache miss: {}", key);
            store.stats.misses += 1;
            return None;
        };

        if expired {
            debug!("Cache entry expired: {}", key);
            store.stats.misses += 1;
            store.stats.evictions_ttl += 1;
            Self::remove_entry(&mut store, &key);
            return None;
        }

        let entry = store.entries.get_mut(&key)?;
        entry.mark_accessed();
        let options = entry.options.clone();
        store.stats.hits += 1;

        debug!("Cache hit: {}", key);
        Some(options)
    }

    /// Store a snapshot of `options` for `request`, returning the cache key.
    ///
    /// Storing the same request again replaces its entry. Expired entries are
    /// swept first; if the cache is still full, the least-used entry is
    /// evicted before the new one is inserted.
    pub async fn store(&self, request: &ResearchRequest, options: &[ResearchOption]) -> CacheKey {
        let request = request.normalized();
        let key = derive_cache_key(&request);
        if options.len() != OPTIONS_PER_RESPONSE {
            warn!(
                "Caching {} options for {}, expected {}",
                options.len(),
                key,
                OPTIONS_PER_RESPONSE
            );
        }
        let entry = CacheEntry::new(key.clone(), request, options);

        let mut store = self.store.write().await;

        if self.config.cleanup_on_store {
            Self::purge_expired(&mut store, Utc::now(), &self.config);
        }

        if store.entries.contains_key(&key) {
            debug!("Replacing cache entry: {}", key);
            Self::remove_entry(&mut store, &key);
        } else {
            while store.entries.len() >= self.config.max_entries {
                if !Self::evict_least_used(&mut store) {
                    break;
                }
            }
            debug!("Inserting cache entry: {}", key);
        }

        store.entries.insert(key.clone(), entry);
        store.insertion_order.push_back(key.clone());

        key
    }

    /// Check if a live entry exists for `request` (without counting an access)
    pub async fn contains(&self, request: &ResearchRequest) -> bool {
        let key = Self::key_for(request);
        let store = self.store.read().await;
        store
            .entries
            .get(&key)
            .is_some_and(|entry| !entry.is_expired(self.config.ttl))
    }

    /// Remove the entry for `request`, returning whether one existed
    pub async fn remove(&self, request: &ResearchRequest) -> bool {
        let key = Self::key_for(request);
        let mut store = self.store.write().await;
        Self::remove_entry(&mut store, &key).is_some()
    }

    /// Clear all entries from the cache
    pub async fn clear(&self) {
        let mut store = self.store.write().await;

        let count = store.entries.len();
        store.entries.clear();
        store.insertion_order.clear();

        info!("Cleared {} entries from research cache", count);
    }

    /// Remove all expired entries, returning how many were removed
    pub async fn cleanup_expired(&self) -> usize {
        let mut store = self.store.write().await;
        Self::purge_expired(&mut store, Utc::now(), &self.config)
    }

    /// Get cache statistics; expired and size figures are computed on demand
    pub async fn stats(&self) -> CacheStats {
        let store = self.store.read().await;
        let now = Utc::now();

        CacheStats {
            entries: store.entries.len(),
            expired_entries: store
                .entries
                .values()
                .filter(|entry| entry.is_expired_at(now, self.config.ttl))
                .count(),
            max_entries: self.config.max_entries,
            ttl_seconds: self.config.ttl.as_secs(),
            size_bytes: store
                .entries
                .values()
                .map(|entry| entry.metadata.size_bytes)
                .sum(),
            ..store.stats.clone()
        }
    }

    /// Access count of the entry for `request`, if present
    pub async fn access_count(&self, request: &ResearchRequest) -> Option<u64> {
        let key = Self::key_for(request);
        let store = self.store.read().await;
        store.entries.get(&key).map(|entry| entry.metadata.access_count)
    }

    /// Get number of entries in cache (expired ones included until purged)
    pub async fn len(&self) -> usize {
        let store = self.store.read().await;
        store.entries.len()
    }

    /// Check if cache is empty
    pub async fn is_empty(&self) -> bool {
        let store = self.store.read().await;
        store.entries.is_empty()
    }

    /// Internal: Remove an entry from the store
    fn remove_entry(store: &mut CacheStore, key: &str) -> Option<CacheEntry> {
        let entry = store.entries.remove(key)?;
        store.insertion_order.retain(|k| k != key);
        Some(entry)
    }

    /// Internal: Evict the entry with the lowest access count, oldest first on ties
    fn evict_least_used(store: &mut CacheStore) -> bool {
        let victim = store
            .insertion_order
            .iter()
            .filter_map(|key| store.entries.get(key))
            .min_by_key(|entry| entry.metadata.access_count)
            .map(|entry| entry.key.clone());

        match victim {
            Some(key) => {
                debug!("Evicting entry due to max_entries limit: {}", key);
                Self::remove_entry(store, &key);
                store.stats.evictions_capacity += 1;
                true
            }
            None => false,
        }
    }

    /// Internal: Remove every entry whose TTL elapsed as of `now`
    fn purge_expired(store: &mut CacheStore, now: DateTime<Utc>, config: &CacheConfig) -> usize {
        let expired_keys: Vec<CacheKey> = store
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired_at(now, config.ttl))
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired_keys {
            Self::remove_entry(store, key);
        }

        if !expired_keys.is_empty() {
            store.stats.evictions_ttl += expired_keys.len() as u64;
            debug!("Cleaned up {} expired entries", expired_keys.len());
        }

        expired_keys.len()
    }
}

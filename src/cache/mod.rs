//! # Research Result Cache
//!
//! Caches the enriched options of a research generation, keyed by a digest
//! of the four normalized request fields, so a repeated request skips the
//! expensive upstream generation.
//!
//! ## Features
//!
//! - **Content addressing**: SHA-256 over a canonical JSON form of the request
//! - **Lazy TTL expiry**: entries are checked at lookup and swept on store
//! - **Least-used eviction**: the entry with the fewest hits goes first when full
//! - **Snapshots**: stored and returned options are deep copies
//!
//! ## Example
//!
//! ```rust
//! use research_options::cache::{CacheConfig, ResearchCache};
//! use research_options::schema::ResearchRequest;
//! use std::time::Duration;
//!
//! # async fn example() {
//! let config = CacheConfig::builder()
//!     .ttl(Duration::from_secs(3600))
//!     .max_entries(500)
//!     .build();
//!
//! let cache = ResearchCache::new(config);
//! let request = ResearchRequest::new("MIT", "Computer Science", "Algorithms", "Robotics club");
//!
//! if cache.lookup(&request).await.is_none() {
//!     // generate, parse and enrich, then:
//!     cache.store(&request, &[]).await;
//! }
//! # }
//! ```

pub mod config;
pub mod entry;
pub mod key;
pub mod store;
pub mod types;

pub use config::{CacheConfig, CacheConfigBuilder};
pub use entry::{CacheEntry, CacheMetadata};
pub use key::{derive_cache_key, CACHE_KEY_LEN};
pub use store::ResearchCache;
pub use types::{CacheKey, CacheStats};

//! Configuration for the result cache

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the research result cache
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Time-to-live of a cache entry, measured from its creation
    pub ttl: Duration,

    /// Maximum number of entries in the cache
    /// Prevents unbounded memory growth
    pub max_entries: usize,

    /// Sweep every expired entry whenever a new entry is stored
    pub cleanup_on_store: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            // Generations are expensive and inputs rarely change within a day
            ttl: Duration::from_secs(24 * 3600),
            max_entries: 1_000,
            cleanup_on_store: true,
        }
    }
}

impl CacheConfig {
    /// Create a new builder for cache configuration
    pub fn builder() -> CacheConfigBuilder {
        CacheConfigBuilder::default()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.max_entries == 0 {
            return Err("max_entries must be greater than 0".to_string());
        }

        if self.ttl.is_zero() {
            return Err("ttl must be greater than 0".to_string());
        }

        Ok(())
    }
}

/// Builder for cache configuration
#[derive(Debug, Default)]
pub struct CacheConfigBuilder {
    ttl: Option<Duration>,
    max_entries: Option<usize>,
    cleanup_on_store: Option<bool>,
}

impl CacheConfigBuilder {
    /// Set entry time-to-live
    pub fn ttl(mut self, ttl: Duration) -> Self {
        self.ttl = Some(ttl);
        self
    }

    /// Set maximum number of cache entries
    pub fn max_entries(mut self, max: usize) -> Self {
        self.max_entries = Some(max);
        self
    }

    /// Enable or disable the expired-entry sweep on store
    pub fn cleanup_on_store(mut self, enable: bool) -> Self {
        self.cleanup_on_store = Some(enable);
        self
    }

    /// Build the cache configuration
    pub fn build(self) -> CacheConfig {
        let defaults = CacheConfig::default();

        CacheConfig {
            ttl: self.ttl.unwrap_or(defaults.ttl),
            max_entries: self.max_entries.unwrap_or(defaults.max_entries),
            cleanup_on_store: self.cleanup_on_store.unwrap_or(defaults.cleanup_on_store),
        }
    }
}

/// Preset configurations
impl CacheConfig {
    /// One hour of retention, for inputs that are edited often
    pub fn short_lived() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            ..Default::default()
        }
    }

    /// Configuration for memory-constrained environments
    pub fn small() -> Self {
        Self {
            ttl: Duration::from_secs(6 * 3600),
            max_entries: 100,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CacheConfig::default();
        assert_eq!(config.ttl, Duration::from_secs(24 * 3600));
        assert_eq!(config.max_entries, 1_000);
        assert!(config.cleanup_on_store);
    }

    #[test]
    fn test_config_validation() {
        assert!(CacheConfig::default().validate().is_ok());

        let mut invalid_config = CacheConfig::default();
        invalid_config.max_entries = 0;
        assert!(invalid_config.validate().is_err());

        let mut invalid_config = CacheConfig::default();
        invalid_config.ttl = Duration::ZERO;
        assert!(invalid_config.validate().is_err());
    }

    #[test]
    fn test_config_builder() {
        let config = CacheConfig::builder()
            .ttl(Duration::from_secs(600))
            .max_entries(50)
            .cleanup_on_store(false)
            .build();

        assert_eq!(config.ttl, Duration::from_secs(600));
        assert_eq!(config.max_entries, 50);
        assert!(!config.cleanup_on_store);
    }

    #[test]
    fn test_preset_configs() {
        assert_eq!(CacheConfig::short_lived().ttl, Duration::from_secs(3600));
        assert_eq!(CacheConfig::small().max_entries, 100);
    }
}

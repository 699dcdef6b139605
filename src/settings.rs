//! Environment-driven settings
//!
//! Values come from the process environment, after loading a `.env` file if
//! one exists. Every setting has a default; a present but malformed value is a
//! configuration error rather than a silent fallback.

use crate::cache::CacheConfig;
use crate::error::{ResearchError, Result};
use crate::generation::RetryPolicy;
use crate::session::SessionConfig;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

pub const ENV_DEBUG: &str = "RESEARCH_DEBUG";
pub const ENV_SESSION_TTL_MINUTES: &str = "RESEARCH_SESSION_TTL_MINUTES";
pub const ENV_CACHE_TTL_HOURS: &str = "RESEARCH_CACHE_TTL_HOURS";
pub const ENV_CACHE_MAX_ENTRIES: &str = "RESEARCH_CACHE_MAX_ENTRIES";
pub const ENV_MAX_RETRY_ATTEMPTS: &str = "RESEARCH_MAX_RETRY_ATTEMPTS";
pub const ENV_RETRY_DELAY_MS: &str = "RESEARCH_RETRY_DELAY_MS";

/// Runtime settings of the research pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub debug: bool,
    pub session_ttl_minutes: u64,
    pub cache_ttl_hours: u64,
    pub cache_max_entries: usize,
    pub max_retry_attempts: u32,
    pub retry_delay_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: false,
            session_ttl_minutes: 30,
            cache_ttl_hours: 24,
            cache_max_entries: 1000,
            max_retry_attempts: 3,
            retry_delay_ms: 1000,
        }
    }
}

impl Settings {
    /// Load settings from `.env` and the process environment
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            debug!("Loaded environment from {:?}", path);
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let settings = Self {
            debug: match lookup(ENV_DEBUG) {
                Some(raw) => parse_bool(ENV_DEBUG, &raw)?,
                None => defaults.debug,
            },
            session_ttl_minutes: read(&lookup, ENV_SESSION_TTL_MINUTES, defaults.session_ttl_minutes)?,
            cache_ttl_hours: read(&lookup, ENV_CACHE_TTL_HOURS, defaults.cache_ttl_hours)?,
            cache_max_entries: read(&lookup, ENV_CACHE_MAX_ENTRIES, defaults.cache_max_entries)?,
            max_retry_attempts: read(&lookup, ENV_MAX_RETRY_ATTEMPTS, defaults.max_retry_attempts)?,
            retry_delay_ms: read(&lookup, ENV_RETRY_DELAY_MS, defaults.retry_delay_ms)?,
        };

        settings.validate()?;
        Ok(settings)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        self.cache_config()
            .validate()
            .and_then(|_| self.session_config().validate())
            .map_err(ResearchError::ConfigError)
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig::builder()
            .ttl(Duration::from_secs(self.cache_ttl_hours.saturating_mul(3600)))
            .max_entries(self.cache_max_entries)
            .build()
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig::with_ttl(Duration::from_secs(self.session_ttl_minutes.saturating_mul(60)))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_retries: self.max_retry_attempts,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
        }
    }
}

fn read<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ResearchError::ConfigError(format!("{}='{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ResearchError::ConfigError(format!(
            "{}='{}': expected a boolean",
            key, raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = Settings::from_lookup(lookup(&[])).unwrap();
        assert_eq!(settings, Settings::default());

        assert_eq!(settings.cache_config().ttl, Duration::from_secs(24 * 3600));
        assert_eq!(settings.cache_config().max_entries, 1000);
        assert_eq!(settings.session_config().ttl, Duration::from_secs(30 * 60));
        assert_eq!(settings.retry_policy(), RetryPolicy::default());
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::from_lookup(lookup(&[
            (ENV_DEBUG, "true"),
            (ENV_SESSION_TTL_MINUTES, "5"),
            (ENV_CACHE_TTL_HOURS, "1"),
            (ENV_CACHE_MAX_ENTRIES, " 50 "),
            (ENV_MAX_RETRY_ATTEMPTS, "0"),
            (ENV_RETRY_DELAY_MS, "250"),
        ]))
        .unwrap();

        assert!(settings.debug);
        assert_eq!(settings.session_config().ttl, Duration::from_secs(300));
        assert_eq!(settings.cache_config().ttl, Duration::from_secs(3600));
        assert_eq!(settings.cache_config().max_entries, 50);
        assert_eq!(settings.retry_policy().max_retries, 0);
        assert_eq!(settings.retry_policy().retry_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_malformed_value_is_config_error() {
        let err = Settings::from_lookup(lookup(&[(ENV_CACHE_MAX_ENTRIES, "lots")])).unwrap_err();
        assert!(matches!(err, ResearchError::ConfigError(ref msg) if msg.contains(ENV_CACHE_MAX_ENTRIES)));

        let err = Settings::from_lookup(lookup(&[(ENV_DEBUG, "maybe")])).unwrap_err();
        assert!(matches!(err, ResearchError::ConfigError(_)));
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let err = Settings::from_lookup(lookup(&[(ENV_CACHE_MAX_ENTRIES, "0")])).unwrap_err();
        assert!(matches!(err, ResearchError::ConfigError(_)));
    }
}

//! Configuration for the selection session store

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the selection session store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Time-to-live of a session, measured from its creation
    pub ttl: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            // Long enough to read three options and pick one
            ttl: Duration::from_secs(30 * 60),
        }
    }
}

impl SessionConfig {
    /// Session configuration with the given time-to-live
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.ttl.is_zero() {
            return Err("session ttl must be greater than 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        assert_eq!(SessionConfig::default().ttl, Duration::from_secs(1800));
        assert!(SessionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_ttl_rejected() {
        assert!(SessionConfig::with_ttl(Duration::ZERO).validate().is_err());
        assert!(SessionConfig::with_ttl(Duration::from_millis(1)).validate().is_ok());
    }
}

//! Upstream text generation seam with retry
//!
//! The pipeline never talks to a language model directly; it goes through a
//! [`TextGenerator`], which callers implement for their provider. Wrapping a
//! generator in [`RetryingGenerator`] adds bounded retries with linear backoff.

use crate::error::UpstreamError;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};

/// Produces free text for a prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Retry behaviour for upstream generation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt
    pub max_retries: u32,
    /// Base delay, multiplied by the attempt number
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            retry_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// A policy that makes a single attempt
    pub fn no_retry() -> Self {
        Self {
            max_retries: 0,
            retry_delay: Duration::ZERO,
        }
    }

    /// Delay before the retry that follows failed attempt `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.retry_delay.saturating_mul(attempt)
    }
}

/// Wraps a generator with [`RetryPolicy`]
///
/// Credential and rate-limit failures are returned at once; any other failure
/// is retried until the policy is exhausted.
pub struct RetryingGenerator<G> {
    inner: G,
    policy: RetryPolicy,
}

impl<G: TextGenerator> RetryingGenerator<G> {
    pub fn new(inner: G, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for RetryingGenerator<G> {
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError> {
        let max_attempts = self.policy.max_retries.saturating_add(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let error = match self.inner.generate(prompt).await {
                Ok(text) => {
                    debug!("Generation succeeded on attempt {}/{}", attempt, max_attempts);
                    return Ok(text);
                }
                Err(e) if !e.is_retryable() => {
                    warn!("Generation failed without retry: {}", e);
                    return Err(e);
                }
                Err(e) => e,
            };

            if attempt >= max_attempts {
                warn!("Generation failed after {} attempts: {}", attempt, error);
                return Err(UpstreamError::Exhausted {
                    attempts: attempt,
                    last_error: error.to_string(),
                });
            }

            let delay = self.policy.delay_for(attempt);
            warn!(
                "Generation failed (attempt {}/{}), retrying after {:?}: {}",
                attempt, max_attempts, delay, error
            );
            tokio::time::sleep(delay).await;
        }
    }
}

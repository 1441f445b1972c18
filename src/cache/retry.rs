//! Retry policy for query loads.
//!
//! Transient failures (5xx, network) are retried with exponential backoff
//! capped at `max_delay`; everything else fails on the first attempt.

#[cfg(test)]
#[path = "retry_test.rs"]
mod retry_test;

use std::time::Duration;

use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt.
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// No retries at all.
    pub fn never() -> Self {
        Self { max_retries: 0, ..Self::default() }
    }

    /// Whether to retry after `failures` failed attempts ending in `error`.
    pub fn should_retry(&self, failures: u32, error: &ApiError) -> bool {
        error.is_retryable() && failures < self.max_retries
    }

    /// Delay before retry number `attempt` (0-based): `base * 2^attempt`.
    pub fn delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }
}

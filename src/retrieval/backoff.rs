//! Retry and pacing configuration for the retriever.

use std::time::Duration;

use rand::Rng;

/// Retry behaviour for a single date.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum attempts that end in a transport failure or success.
    /// Rate-limited responses do not consume attempts.
    pub max_attempts: u32,
    /// Wait applied to a 429 without a usable Retry-After header.
    pub default_rate_limit_wait: Duration,
    /// 429 responses tolerated for one date.
    pub max_rate_limit_waits: u32,
    /// Unit of the exponential backoff (`2^attempt * backoff_base`).
    pub backoff_base: Duration,
    /// Upper bound (exclusive) of the random jitter added to each backoff.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            default_rate_limit_wait: Duration::from_secs(60),
            max_rate_limit_waits: 10,
            backoff_base: Duration::from_secs(1),
            max_jitter: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Deterministic part of the wait after failed attempt `attempt` (0-based).
    pub fn base_delay(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.min(16));
        self.backoff_base.saturating_mul(factor)
    }

    /// Full backoff wait: `2^attempt * base` plus random jitter.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let jitter = if self.max_jitter.is_zero() {
            Duration::ZERO
        } else {
            self.max_jitter.mul_f64(rand::rng().random_range(0.0..1.0))
        };
        self.base_delay(attempt) + jitter
    }

    /// Wait for a rate-limited response.
    pub fn rate_limit_wait(&self, retry_after: Option<Duration>) -> Duration {
        retry_after.unwrap_or(self.default_rate_limit_wait)
    }
}

/// Pacing of the date-range driver.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Days between requested publication dates.
    pub step_days: u32,
    /// Pause after every request regardless of outcome.
    pub request_interval: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            step_days: 7,
            request_interval: Duration::from_secs(12),
        }
    }
}

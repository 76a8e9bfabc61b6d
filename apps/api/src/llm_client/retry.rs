//! Retry policy for inference calls.
//!
//! Linear backoff: attempt `n` (1-based) that fails with a retryable error is
//! followed by a sleep of `base_delay * n` before attempt `n + 1`.

use std::time::Duration;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);
pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(30);

/// Why a single attempt failed. Only these outcomes are fed to the policy.
#[derive(Debug)]
pub enum AttemptFailure {
    Network(String),
    Timeout,
    Status { status: u16, body: String },
    InvalidBody(String),
}

impl std::fmt::Display for AttemptFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AttemptFailure::Network(msg) => write!(f, "network error: {msg}"),
            AttemptFailure::Timeout => write!(f, "attempt timed out"),
            AttemptFailure::Status { status, body } => write!(f, "status {status}: {body}"),
            AttemptFailure::InvalidBody(msg) => write!(f, "invalid response body: {msg}"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub attempt_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            attempt_timeout: DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

impl RetryPolicy {
    /// Network errors, timeouts, 429 and 5xx are retryable. Everything else is final.
    pub fn is_retryable(&self, failure: &AttemptFailure) -> bool {
        match failure {
            AttemptFailure::Network(_) | AttemptFailure::Timeout => true,
            AttemptFailure::Status { status, .. } => *status == 429 || (500..=599).contains(status),
            AttemptFailure::InvalidBody(_) => false,
        }
    }

    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }

    /// True when another attempt is allowed after `attempt` failed.
    pub fn has_attempts_left(&self, attempt: u32) -> bool {
        attempt < self.max_attempts.max(1)
    }
}

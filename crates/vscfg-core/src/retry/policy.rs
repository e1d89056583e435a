//! Retry policy

use std::time::Duration;

/// How many times to run an operation and how long to wait in between
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Pause after a failed attempt before the next one
    pub delay: Duration,
}

impl RetryPolicy {
    /// Fixed-delay policy with `max_attempts` total attempts
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

//! Retry execution engine

use std::fmt::Display;
use std::future::Future;
use std::time::Instant;

use super::error::RetryError;
use super::observer::{NoOpObserver, RetryObserver};
use super::policy::RetryPolicy;

/// Runs an operation until it succeeds or the policy's attempts run out
pub struct RetryExecutor<O = NoOpObserver> {
    policy: RetryPolicy,
    observer: O,
}

impl RetryExecutor<NoOpObserver> {
    /// Create an executor without an observer
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            observer: NoOpObserver,
        }
    }
}

impl<O> RetryExecutor<O> {
    /// Set the observer
    pub fn with_observer<O2>(self, observer: O2) -> RetryExecutor<O2> {
        RetryExecutor {
            policy: self.policy,
            observer,
        }
    }
}

impl<O: RetryObserver> RetryExecutor<O> {
    /// Execute an operation with retry logic, returning the attempt count on success
    pub async fn execute_counted<F, Fut, T, E>(&self, mut op: F) -> Result<(T, u32), RetryError<E>>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        let start = Instant::now();
        let max_attempts = self.policy.max_attempts;

        for attempt in 1..=max_attempts {
            self.observer.on_attempt_start(attempt, max_attempts);

            match op().await {
                Ok(result) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok((result, attempt));
                }
                Err(err) => {
                    if attempt >= max_attempts {
                        self.observer.on_exhausted(attempt, &err);
                        return Err(RetryError::exhausted(attempt, err, start.elapsed()));
                    }

                    let delay = self.policy.delay;
                    self.observer.on_attempt_failed(attempt, &err, delay);

                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(RetryError::NoAttempts)
    }
}

//! Retry policy and loop
//!
//! Retries are an injected [`RetryPolicy`] value, never a hidden global.
//! The controller holds one policy for create (transient errors only) and
//! one for delete (every error), both bounded by a time window.
//!
//! ## Timing
//!
//! The loop sleeps with exponential backoff between attempts and gives up
//! as soon as the next sleep would end past the policy's timeout. Time is
//! measured with `tokio::time`, so tests run it on a paused clock.

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::{Error, Result};

/// Which errors a policy retries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryOn {
    /// Only errors for which [`Error::is_transient`] holds
    TransientErrors,
    /// Every error
    AllErrors,
}

/// Bounded retry policy with exponential backoff
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total time budget, measured from the first attempt
    pub timeout: Duration,
    /// Delay before the second attempt
    pub initial_backoff: Duration,
    /// Upper bound for any single delay
    pub max_backoff: Duration,
    pub retry_on: RetryOn,
}

impl RetryPolicy {
    /// Retry transient errors for up to `timeout`
    pub fn transient(timeout: Duration) -> Self {
        Self {
            timeout,
            initial_backoff: Duration::from_millis(500),
            max_backoff: Duration::from_secs(10),
            retry_on: RetryOn::TransientErrors,
        }
    }

    /// Retry every error for up to `timeout`
    pub fn always(timeout: Duration) -> Self {
        Self {
            retry_on: RetryOn::AllErrors,
            ..Self::transient(timeout)
        }
    }

    /// A policy that makes exactly one attempt
    pub fn none() -> Self {
        Self::transient(Duration::ZERO)
    }

    /// Override the backoff bounds
    pub fn with_backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.initial_backoff = initial;
        self.max_backoff = max;
        self
    }

    /// Whether `error` may be retried under this policy
    pub fn is_retryable(&self, error: &Error) -> bool {
        match self.retry_on {
            RetryOn::AllErrors => true,
            RetryOn::TransientErrors => error.is_transient(),
        }
    }

    /// Delay after the given (1-based) failed attempt
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt.saturating_sub(1)).unwrap_or(u32::MAX);
        self.initial_backoff
            .checked_mul(factor)
            .unwrap_or(self.max_backoff)
            .min(self.max_backoff)
    }
}

/// Run `op` until it succeeds, fails with a non-retryable error, or the
/// policy's window closes
///
/// A non-retryable error is returned unchanged. When the window closes the
/// last error is wrapped in [`Error::RetryExhausted`].
pub async fn retry<T, F, Fut>(policy: &RetryPolicy, operation: &str, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let start = Instant::now();
    let mut attempt: u32 = 0;

    loop {
        attempt += 1;
        let error = match op().await {
            Ok(value) => {
                if attempt > 1 {
                    debug!("{} succeeded on attempt {}", operation, attempt);
                }
                return Ok(value);
            }
            Err(e) => e,
        };

        if !policy.is_retryable(&error) {
            debug!("{} failed with non-retryable error: {}", operation, error);
            return Err(error);
        }

        let delay = policy.backoff(attempt);
        if start.elapsed() + delay > policy.timeout {
            warn!(
                "{} giving up after {} attempt(s) in {:?}: {}",
                operation,
                attempt,
                start.elapsed(),
                error
            );
            return Err(Error::RetryExhausted {
                operation: operation.to_string(),
                attempts: attempt,
                source: Box::new(error),
            });
        }

        warn!(
            "{} attempt {} failed: {}. Retrying in {:?}",
            operation, attempt, error, delay
        );
        tokio::time::sleep(delay).await;
    }
}

//! Retry policy with exponential backoff
//!
//! - Attempts: `retries + 1`
//! - Delay before retry `n` (0-based): `backoff * 2^n`, no jitter, no cap
//! - Only errors with [`DatagenError::is_retryable`] are retried

use crate::errors::{DatagenError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry policy with exponential backoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Extra attempts after the first
    retries: u32,

    /// Delay before the first retry
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl RetryPolicy {
    /// Single attempt, no retries
    pub fn none() -> Self {
        Self {
            retries: 0,
            backoff: Duration::ZERO,
        }
    }

    /// Create policy with custom settings
    pub fn new(retries: u32, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    /// Run `operation` until it succeeds, fails permanently, or the attempt
    /// budget is spent. The last error is returned on exhaustion.
    pub async fn execute_with_retry<F, Fut, T>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_error: Option<DatagenError> = None;

        for attempt in 0..=self.retries {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if !e.is_retryable() => return Err(e),
                Err(e) => {
                    if attempt < self.retries {
                        let delay = self.delay_for(attempt);
                        warn!(
                            attempt = attempt + 1,
                            max_attempts = self.max_attempts(),
                            delay_ms = delay.as_millis() as u64,
                            error = %e,
                            "Retrying after transient failure"
                        );
                        sleep(delay).await;
                    }
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DatagenError::Unknown("Unknown error during tool execution".to_string())
        }))
    }

    /// Delay inserted after failed attempt `attempt` (0-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
        self.backoff.saturating_mul(factor)
    }

    /// Upper bound on time spent sleeping across all retries
    pub fn max_total_wait_time(&self) -> Duration {
        (0..self.retries).fold(Duration::ZERO, |total, attempt| {
            total.saturating_add(self.delay_for(attempt))
        })
    }

    pub fn retries(&self) -> u32 {
        self.retries
    }

    pub fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quickcheck_macros::quickcheck;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn transient() -> DatagenError {
        DatagenError::Status {
            status: 500,
            body: "Server Error".to_string(),
        }
    }

    #[tokio::test]
    async fn test_retry_success_first_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let attempts = Arc::new(AtomicU32::new(0));

        let counter = attempts.clone();
        let result = policy
            .execute_with_retry(move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok::<i32, DatagenError>(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_success_after_failures() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1));
        let attempts = Arc::new(AtomicU32::new(0));

        let counter = attempts.clone();
        let result = policy
            .execute_with_retry(move |_| {
                let counter = counter.clone();
                async move {
                    let current = counter.fetch_add(1, Ordering::SeqCst) + 1;
                    if current < 3 {
                        Err(transient())
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retries_exhausted_returns_last_error() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let attempts = Arc::new(AtomicU32::new(0));

        let counter = attempts.clone();
        let result = policy
            .execute_with_retry(move |attempt| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(DatagenError::Status {
                        status: 500 + attempt as u16,
                        body: String::new(),
                    })
                }
            })
            .await;

        assert_eq!(attempts.load(Ordering::SeqCst), 4);
        assert_eq!(result.unwrap_err().status(), Some(503));
    }

    #[tokio::test]
    async fn test_non_retryable_error() {
        let policy = RetryPolicy::new(5, Duration::from_millis(1));
        let attempts = Arc::new(AtomicU32::new(0));

        let counter = attempts.clone();
        let result = policy
            .execute_with_retry(move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<i32, _>(DatagenError::Tool("nope".to_string()))
                }
            })
            .await;

        assert!(matches!(result, Err(DatagenError::Tool(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let attempts = Arc::new(AtomicU32::new(0));

        let counter = attempts.clone();
        let result = RetryPolicy::default()
            .execute_with_retry(move |_| {
                let counter = counter.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Err::<(), _>(transient())
                }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_sleeps_between_attempts() {
        let policy = RetryPolicy::new(2, Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        let _ = policy
            .execute_with_retry(|_| async { Err::<(), _>(transient()) })
            .await;

        // 1s + 2s, nothing after the final attempt
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(3), "slept {:?}", elapsed);
        assert!(elapsed < Duration::from_secs(4), "slept {:?}", elapsed);
    }

    #[test]
    fn test_delay_for() {
        let policy = RetryPolicy::new(5, Duration::from_millis(500));

        assert_eq!(policy.delay_for(0), Duration::from_millis(500));
        assert_eq!(policy.delay_for(1), Duration::from_millis(1000));
        assert_eq!(policy.delay_for(2), Duration::from_millis(2000));
        assert_eq!(policy.delay_for(3), Duration::from_millis(4000));
    }

    #[test]
    fn test_max_total_wait_time() {
        let policy = RetryPolicy::new(5, Duration::from_secs(1));
        assert_eq!(policy.max_total_wait_time(), Duration::from_secs(31));
        assert_eq!(RetryPolicy::none().max_total_wait_time(), Duration::ZERO);
    }

    #[test]
    fn test_huge_attempt_does_not_overflow() {
        let policy = RetryPolicy::new(u32::MAX, Duration::from_secs(1));
        assert!(policy.delay_for(200) >= policy.delay_for(31));
        assert_eq!(policy.max_attempts(), u32::MAX);
    }

    #[quickcheck]
    fn prop_delay_doubles(base_ms: u16, attempt: u8) -> bool {
        let attempt = u32::from(attempt % 16);
        let policy = RetryPolicy::new(16, Duration::from_millis(u64::from(base_ms)));
        policy.delay_for(attempt + 1) == policy.delay_for(attempt) * 2
    }
}

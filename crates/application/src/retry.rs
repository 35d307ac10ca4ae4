use std::future::Future;
use std::time::Duration;

use eventsweep_core::AppResult;

/// Base delay multiplied by the attempt number between retries.
pub const DEFAULT_RETRY_BASE_DELAY: Duration = Duration::from_millis(50);

/// Linear backoff retry policy for cluster API calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
}

impl RetryPolicy {
    /// Creates a policy that retries up to `max_retries` times.
    #[must_use]
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            base_delay: DEFAULT_RETRY_BASE_DELAY,
        }
    }

    /// Overrides the base backoff delay.
    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    /// Returns the maximum number of retries after the first attempt.
    #[must_use]
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Runs `operation` until it succeeds or `max_retries + 1` attempts failed.
    ///
    /// After the n-th failed attempt the policy sleeps `n * base_delay`
    /// before trying again. No sleep follows the final attempt. When every
    /// attempt fails the last error is returned.
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt = 0_u64;

        loop {
            attempt = attempt.saturating_add(1);
            match operation().await {
                Ok(value) => return Ok(value),
                Err(error) if attempt > u64::from(self.max_retries) => return Err(error),
                Err(_) => {
                    let multiplier = u32::try_from(attempt).unwrap_or(u32::MAX);
                    tokio::time::sleep(self.base_delay.saturating_mul(multiplier)).await;
                }
            }
        }
    }
}

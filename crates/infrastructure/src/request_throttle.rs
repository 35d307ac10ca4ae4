//! Client-side request throttling for cluster API calls.
//!
//! A token bucket holds up to `burst` tokens and refills at `qps` tokens per
//! second. Every API call takes one token and waits when the bucket is empty,
//! so short bursts go out immediately while the sustained rate stays at `qps`.

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
struct TokenBucket {
    tokens: f64,
    capacity: f64,
    refill_rate: f64,
    last_refill: Instant,
}

impl TokenBucket {
    fn refill(&mut self, now: Instant) {
        let elapsed = now.duration_since(self.last_refill);
        self.tokens = (self.tokens + elapsed.as_secs_f64() * self.refill_rate).min(self.capacity);
        self.last_refill = now;
    }

    fn wait_for_next_token(&self) -> Duration {
        Duration::try_from_secs_f64(((1.0 - self.tokens) / self.refill_rate).max(0.0))
            .unwrap_or(Duration::MAX)
    }
}

/// Token bucket limiter shared by every call of one cluster client.
#[derive(Debug)]
pub struct RequestThrottle {
    bucket: Option<Mutex<TokenBucket>>,
}

impl RequestThrottle {
    /// Creates a throttle allowing `qps` sustained requests with bursts of `burst`.
    ///
    /// A non-positive or non-finite `qps` disables throttling.
    #[must_use]
    pub fn new(qps: f64, burst: u32) -> Self {
        if !qps.is_finite() || qps <= 0.0 {
            return Self::unlimited();
        }

        let capacity = f64::from(burst.max(1));
        Self {
            bucket: Some(Mutex::new(TokenBucket {
                tokens: capacity,
                capacity,
                refill_rate: qps,
                last_refill: Instant::now(),
            })),
        }
    }

    /// Creates a throttle that never waits.
    #[must_use]
    pub fn unlimited() -> Self {
        Self { bucket: None }
    }

    /// Waits until a request may be sent.
    pub async fn acquire(&self) {
        let Some(bucket) = &self.bucket else {
            return;
        };

        // Holding the lock while sleeping queues callers in arrival order.
        let mut bucket = bucket.lock().await;
        bucket.refill(Instant::now());
        if bucket.tokens < 1.0 {
            let wait = bucket.wait_for_next_token();
            tokio::time::sleep(wait).await;
            bucket.refill(Instant::now());
        }
        bucket.tokens -= 1.0;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::Instant;

    use super::{RequestThrottle, TokenBucket};

    #[tokio::test(start_paused = true)]
    async fn burst_passes_immediately_then_waits_for_refill() {
        let throttle = RequestThrottle::new(10.0, 2);
        let started_at = Instant::now();

        throttle.acquire().await;
        throttle.acquire().await;
        assert_eq!(started_at.elapsed(), Duration::ZERO);

        throttle.acquire().await;
        let elapsed = started_at.elapsed();
        assert!(elapsed >= Duration::from_millis(99), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(110), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn sustained_rate_matches_qps() {
        let throttle = RequestThrottle::new(100.0, 1);
        let started_at = Instant::now();

        for _ in 0..11 {
            throttle.acquire().await;
        }

        // One token up front, ten more at 10ms each.
        let elapsed = started_at.elapsed();
        assert!(elapsed >= Duration::from_millis(99), "{elapsed:?}");
        assert!(elapsed < Duration::from_millis(120), "{elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn non_positive_qps_disables_throttling() {
        for throttle in [
            RequestThrottle::new(0.0, 5),
            RequestThrottle::new(-1.0, 5),
            RequestThrottle::new(f64::NAN, 5),
            RequestThrottle::unlimited(),
        ] {
            let started_at = Instant::now();
            for _ in 0..1_000 {
                throttle.acquire().await;
            }
            assert_eq!(started_at.elapsed(), Duration::ZERO);
        }
    }

    #[test]
    fn wait_saturates_when_refill_rate_is_tiny() {
        let bucket = TokenBucket {
            tokens: 0.0,
            capacity: 1.0,
            refill_rate: 1e-300,
            last_refill: Instant::now(),
        };
        assert_eq!(bucket.wait_for_next_token(), Duration::MAX);
    }
}

//! Paced dispatch of outbound API calls
//!
//! CoinMarketCap enforces a per-minute request budget. The limiter runs
//! scheduled tasks one at a time, in scheduling order, with consecutive
//! task starts separated by at least `60000 / requests_per_minute`
//! milliseconds.

use std::future::Future;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct RateLimiter {
    min_interval: Duration,
    last_dispatch: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter from a requests-per-minute budget
    ///
    /// # Panics
    /// Panics if `requests_per_minute` is not positive.
    pub fn per_minute(requests_per_minute: f64) -> Self {
        assert!(
            requests_per_minute > 0.0,
            "requests_per_minute must be positive"
        );

        Self {
            min_interval: Duration::from_secs_f64(60.0 / requests_per_minute),
            last_dispatch: Mutex::new(None),
        }
    }

    /// Minimum spacing between task starts
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Run `task` once the pacing interval since the previous dispatch
    /// has elapsed
    ///
    /// The dispatch lock is held for the duration of the task, so at most
    /// one scheduled task executes at any instant. tokio's mutex wakes
    /// waiters in FIFO order, so tasks start in the order they were
    /// scheduled. An error returned by `task` goes to its own caller; the
    /// next scheduled task still dispatches after the normal interval.
    pub async fn schedule<F: Future>(&self, task: F) -> F::Output {
        let mut last_dispatch = self.last_dispatch.lock().await;

        if let Some(previous) = *last_dispatch {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }

        *last_dispatch = Some(Instant::now());
        task.await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_task_starts_are_spaced() {
        // 3000 req/min = 20ms spacing, same ratio as the production
        // 30 req/min = 2000ms budget
        let limiter = RateLimiter::per_minute(3000.0);
        assert_eq!(limiter.min_interval(), Duration::from_millis(20));

        let mut starts = Vec::new();
        for _ in 0..3 {
            let start = limiter.schedule(async { Instant::now() }).await;
            starts.push(start);
        }

        // Start of task 3 is at least two full intervals after task 1
        assert!(starts[2] - starts[0] >= Duration::from_millis(40));
        assert!(starts[1] - starts[0] >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_failed_task_does_not_stall_queue() {
        let limiter = RateLimiter::per_minute(6000.0);

        let failed: Result<(), String> = limiter
            .schedule(async { Err("boom".to_string()) })
            .await;
        assert!(failed.is_err());

        // Next task still dispatches normally
        let ok: Result<u32, String> = limiter.schedule(async { Ok(42) }).await;
        assert_eq!(ok.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_at_most_one_task_in_flight() {
        let limiter = Arc::new(RateLimiter::per_minute(60_000.0));
        let in_flight = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..4 {
            let limiter = Arc::clone(&limiter);
            let in_flight = Arc::clone(&in_flight);
            let peak = Arc::clone(&peak);

            handles.push(tokio::spawn(async move {
                limiter
                    .schedule(async {
                        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
                        peak.fetch_max(now, Ordering::SeqCst);
                        tokio::time::sleep(Duration::from_millis(5)).await;
                        in_flight.fetch_sub(1, Ordering::SeqCst);
                    })
                    .await;
            }));
        }

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(peak.load(Ordering::SeqCst), 1);
    }
}

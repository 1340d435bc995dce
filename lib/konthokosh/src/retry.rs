//! Caller-level retry with linear backoff.
//!
//! Retrying is opt-in: neither the executor nor the domain wrappers retry on
//! their own. Wrap an operation in [`RetryPolicy::run`] or
//! [`retry_operation`] to retry transport failures and 5xx answers.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::{Error, Result};

/// Retry policy with linear backoff.
///
/// Attempt `n` that fails with a retryable error is followed by a pause of
/// `base_delay * n`, until `max_attempts` attempts have been made.
///
/// Retryable errors:
/// - network failures ([`Error::Connection`], [`Error::Tls`])
/// - [`Error::Timeout`]
/// - [`Error::Http`] and [`Error::ContractViolation`] with a 5xx status
///
/// Everything else, including authentication failures and any 4xx, is
/// returned at once.
///
/// # Example
///
/// ```ignore
/// use konthokosh::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new(3, Duration::from_millis(500));
/// let page = policy.run(|| posts.list_posts(&query)).await?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Create a policy. `max_attempts` counts the first call; zero is
    /// treated as one.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Maximum number of attempts, first call included.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Delay unit of the backoff.
    #[must_use]
    pub const fn base_delay(&self) -> Duration {
        self.base_delay
    }

    /// Pause after failed attempt number `attempt` (1-based).
    #[must_use]
    pub const fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }

    /// Whether `err` is worth another attempt.
    #[must_use]
    pub const fn is_retryable(err: &Error) -> bool {
        match err {
            Error::Connection(_) | Error::Tls(_) | Error::Timeout => true,
            Error::Http { .. } | Error::ContractViolation { .. } => err.is_server_error(),
            _ => false,
        }
    }

    /// Run `operation` until it succeeds, fails for good or runs out of
    /// attempts.
    ///
    /// # Errors
    ///
    /// The first non-retryable error, or the error of the last attempt.
    pub async fn run<T, F, Fut>(&self, mut operation: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt < self.max_attempts && Self::is_retryable(&err) => {
                    let delay = self.delay_for(attempt);
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        status = err.status(),
                        error = %err,
                        "operation failed, retrying"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

/// Run `operation` with up to `max_attempts` attempts and linear backoff.
///
/// Shorthand for `RetryPolicy::new(max_attempts, base_delay).run(operation)`.
///
/// # Errors
///
/// See [`RetryPolicy::run`].
pub async fn retry_operation<T, F, Fut>(
    operation: F,
    max_attempts: u32,
    base_delay: Duration,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    RetryPolicy::new(max_attempts, base_delay)
        .run(operation)
        .await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    use tokio::time::Instant;

    use super::*;

    /// Fails with the queued errors, then succeeds with the attempt count.
    fn flaky(
        failures: Vec<Error>,
    ) -> (Arc<AtomicU32>, impl FnMut() -> std::future::Ready<Result<u32>>) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let mut failures = failures.into_iter();
        let operation = move || {
            let attempt = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(failures.next().map_or(Ok(attempt), Err))
        };
        (calls, operation)
    }

    #[test]
    fn defaults_and_delays() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts(), 3);
        assert_eq!(policy.base_delay(), Duration::from_secs(1));
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts(), 1);
    }

    #[test]
    fn retryable_classification() {
        assert!(RetryPolicy::is_retryable(&Error::connection("refused")));
        assert!(RetryPolicy::is_retryable(&Error::tls("bad cert")));
        assert!(RetryPolicy::is_retryable(&Error::Timeout));
        assert!(RetryPolicy::is_retryable(&Error::http(503, "unavailable")));
        assert!(RetryPolicy::is_retryable(&Error::contract_violation(500, "x")));

        assert!(!RetryPolicy::is_retryable(&Error::http(400, "bad")));
        assert!(!RetryPolicy::is_retryable(&Error::http(429, "slow down")));
        assert!(!RetryPolicy::is_retryable(&Error::authentication("no token")));
        assert!(!RetryPolicy::is_retryable(&Error::contract_violation(200, "x")));
        assert!(!RetryPolicy::is_retryable(&Error::invalid_request("x")));
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_after_two_server_errors() {
        let (calls, operation) = flaky(vec![
            Error::http(500, "boom"),
            Error::http(500, "boom"),
        ]);
        let start = Instant::now();

        let value = retry_operation(operation, 3, Duration::from_secs(1))
            .await
            .expect("third attempt succeeds");

        assert_eq!(value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // 1s after the first failure, 2s after the second.
        assert_eq!(start.elapsed(), Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn client_error_is_not_retried() {
        let (calls, operation) = flaky(vec![Error::http(400, "bad")]);
        let start = Instant::now();

        let err = RetryPolicy::default()
            .run(operation)
            .await
            .expect_err("400 is final");

        assert_eq!(err.status(), 400);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let (calls, operation) = flaky(vec![
            Error::Timeout,
            Error::connection("reset"),
            Error::http(502, "bad gateway"),
            Error::http(502, "never reached"),
        ]);

        let err = retry_operation(operation, 3, Duration::from_millis(100))
            .await
            .expect_err("exhausted");

        assert_eq!(err.message(), "bad gateway");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }
}

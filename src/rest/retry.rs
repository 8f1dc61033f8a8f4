//! Retry policy and backoff computation for API calls.

use std::time::Duration;

/// Configuration for exponential backoff with jitter.
///
/// Controls how many times a call is attempted, which statuses count as
/// transient, and how long to wait between attempts. The delay before retry
/// `n` (0-indexed) is `min(max_delay, base_delay * 2^n)` plus a jitter term
/// drawn uniformly from `[0, 30%)` of that value, so no wait ever exceeds
/// `1.3 * max_delay`.
///
/// # Defaults
///
/// - `max_attempts`: 3
/// - `base_delay`: 300 milliseconds
/// - `max_delay`: 10 seconds
/// - `retryable_statuses`: 408, 425, 429, 500, 502, 503, 504
/// - `retry_non_idempotent`: false
///
/// # Example
///
/// ```
/// use abacatepay::rest::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_attempts(5)
///     .with_base_delay(Duration::from_millis(100))
///     .with_max_delay(Duration::from_secs(2));
///
/// assert_eq!(policy.delay_with_jitter(0, 0.0), Duration::from_millis(100));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of sends (including the first one).
    ///
    /// A value of 1 disables retries.
    pub max_attempts: u32,

    /// Delay before the first retry.
    pub base_delay: Duration,

    /// Cap applied to the exponential term (before jitter).
    pub max_delay: Duration,

    /// HTTP statuses treated as transient.
    pub retryable_statuses: Vec<u16>,

    /// Whether POST/PATCH calls may be retried after an ambiguous failure.
    ///
    /// When false, non-idempotent calls are only retried on statuses that
    /// guarantee the request was not processed (425, 429).
    pub retry_non_idempotent: bool,
}

impl RetryPolicy {
    /// Default maximum attempts.
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Default base delay (300 milliseconds).
    pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(300);

    /// Default maximum delay (10 seconds).
    pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);

    /// Default transient statuses.
    pub const DEFAULT_RETRYABLE_STATUSES: [u16; 7] = [408, 425, 429, 500, 502, 503, 504];

    /// Upper bound (exclusive) of the jitter term, in percent of the capped delay.
    pub const JITTER_PERCENT: u32 = 30;

    /// Minimum value for `max_attempts`.
    pub const MIN_MAX_ATTEMPTS: u32 = 1;

    /// Statuses meaning the server refused the request without processing it.
    const UNPROCESSED_STATUSES: [u16; 2] = [425, 429];

    /// Exponent cap; `2^32` times any realistic base already exceeds any cap.
    const MAX_EXPONENT: u32 = 32;

    /// Creates a retry policy with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            max_attempts: Self::DEFAULT_MAX_ATTEMPTS,
            base_delay: Self::DEFAULT_BASE_DELAY,
            max_delay: Self::DEFAULT_MAX_DELAY,
            retryable_statuses: Self::DEFAULT_RETRYABLE_STATUSES.to_vec(),
            retry_non_idempotent: false,
        }
    }

    /// Creates a policy that sends exactly once.
    #[must_use]
    pub fn no_retry() -> Self {
        Self::new().with_max_attempts(1)
    }

    /// Sets the maximum number of attempts.
    ///
    /// # Panics
    ///
    /// Panics if `max_attempts` is less than 1.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        assert!(
            max_attempts >= Self::MIN_MAX_ATTEMPTS,
            "max_attempts must be at least 1"
        );
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the delay before the first retry.
    ///
    /// Zero is allowed (useful in tests) but creates a tight retry loop.
    #[must_use]
    pub const fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Sets the cap on the exponential term.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = delay;
        self
    }

    /// Replaces the set of transient statuses.
    #[must_use]
    pub fn with_retryable_statuses(mut self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.retryable_statuses = statuses.into_iter().collect();
        self
    }

    /// Allows retrying non-idempotent calls after ambiguous failures.
    #[must_use]
    pub const fn with_non_idempotent_retries(mut self, enabled: bool) -> Self {
        self.retry_non_idempotent = enabled;
        self
    }

    /// Returns true if `status` is in the transient set.
    #[must_use]
    pub fn is_retryable_status(&self, status: http::StatusCode) -> bool {
        self.retryable_statuses.contains(&status.as_u16())
    }

    /// Returns true if another send may follow attempt `attempt` (0-indexed).
    #[must_use]
    pub const fn should_retry(&self, attempt: u32) -> bool {
        attempt.saturating_add(1) < self.max_attempts
    }

    /// Returns true if a call with `method` may be re-sent after a failure.
    ///
    /// `status` is the response status of the failed attempt, or `None`
    /// when no response was received.
    #[must_use]
    pub fn permits_retry(&self, method: &http::Method, status: Option<http::StatusCode>) -> bool {
        if self.retry_non_idempotent || method.is_idempotent() {
            return true;
        }

        status.is_some_and(|s| Self::UNPROCESSED_STATUSES.contains(&s.as_u16()))
    }

    /// Computes the delay before retry `retry` using a given jitter fraction.
    ///
    /// `jitter` is clamped to `[0, 1)` and scaled by [`Self::JITTER_PERCENT`].
    /// The jitter term is computed in whole milliseconds and always stays
    /// strictly below `JITTER_PERCENT` of the capped delay.
    #[must_use]
    pub fn delay_with_jitter(&self, retry: u32, jitter: f64) -> Duration {
        let exponent = retry.min(Self::MAX_EXPONENT);
        let capped = self
            .base_delay
            .as_millis()
            .saturating_mul(1u128 << exponent)
            .min(self.max_delay.as_millis());

        let fraction = jitter_fraction(jitter);
        let jitter_ms = capped
            .saturating_mul(u128::from(Self::JITTER_PERCENT))
            .saturating_mul(u128::from(fraction))
            / (100 * FRACTION_ONE);

        let total = u64::try_from(capped.saturating_add(jitter_ms)).unwrap_or(u64::MAX);
        Duration::from_millis(total)
    }

    /// Computes the delay before retry `retry` (0 = before the second send).
    ///
    /// Jitter is drawn from the thread-local RNG.
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        self.delay_with_jitter(retry, rand::random::<f64>())
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixed-point denominator for jitter fractions (53 bits, the `f64` mantissa).
const FRACTION_ONE: u128 = 1 << 53;

/// Maps `jitter` onto `[0, FRACTION_ONE)`; non-finite values count as zero.
fn jitter_fraction(jitter: f64) -> u64 {
    if !jitter.is_finite() || jitter <= 0.0 {
        return 0;
    }
    let max = (1u64 << 53) - 1;

    // Safe cast: the product is in (0, 2^53] before the min
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let scaled = (jitter.min(1.0) * FRACTION_ONE as f64) as u64;
    scaled.min(max)
}

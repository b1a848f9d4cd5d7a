use std::time::Duration;

/// Specifies the backoff strategy between page-fetch attempts.
#[derive(Clone, Debug, PartialEq)]
pub enum Backoff {
    /// Uses a fixed delay between attempts.
    Fixed(Duration),
    /// Uses an exponential delay between attempts.
    /// The delay is calculated as `base * (factor ^ retry)`, capped at `max`.
    Exponential {
        /// The delay before the first retry.
        base: Duration,
        /// The multiplicative factor for each subsequent retry.
        factor: f64,
        /// The maximum duration to wait between attempts.
        max: Duration,
    },
}

impl Backoff {
    /// Delay before retry number `retry` (0 for the first retry).
    #[must_use]
    pub fn delay(&self, retry: u32) -> Duration {
        match self {
            Backoff::Fixed(d) => *d,
            Backoff::Exponential { base, factor, max } => {
                let exp = i32::try_from(retry).unwrap_or(i32::MAX);
                let secs = base.as_secs_f64() * factor.powi(exp);
                if secs.is_finite() && secs < max.as_secs_f64() {
                    Duration::from_secs_f64(secs)
                } else {
                    *max
                }
            }
        }
    }
}

/// Retry policy for paginated collection.
///
/// Only page fetches are retried; single calls through the executor surface their
/// errors immediately.
#[derive(Clone, Debug, PartialEq)]
pub struct RetryConfig {
    /// Total attempts per page, the first one included.
    pub max_attempts: u32,
    /// The backoff strategy to use between attempts.
    pub backoff: Backoff,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: super::network::constants::PAGE_ATTEMPTS,
            backoff: Backoff::Fixed(super::network::constants::PAGE_BACKOFF),
        }
    }
}

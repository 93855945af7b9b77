/*!
 * Retry with backoff for transient provider failures.
 *
 * Two wait schedules are used:
 * - overload and connection errors back off exponentially per record:
 *   `base_delay * 2^attempt`
 * - rate-limit errors use an escalating wait shared by the whole run:
 *   `initial + increment * n` for the n-th rate limit, never shorter than the
 *   service's `retry-after` and always longer than the previous rate-limit wait
 *
 * Both kinds count towards the same per-record retry budget. Non-transient
 * errors are returned immediately.
 */

use log::warn;
use std::future::Future;
use std::time::Duration;

use crate::errors::{ProviderError, TranslationError};

/// Upper bound for the exponent so the delay computation cannot overflow
const MAX_BACKOFF_EXPONENT: u32 = 20;

/// Value produced by a retried operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retried<T> {
    /// The successful result
    pub value: T,
    /// Number of retries needed to get it
    pub retries: u32,
}

/// Retry schedule and rate-limit state for one run
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    rate_limit_initial_wait: Duration,
    rate_limit_increment: Duration,
    rate_limit_hits: u32,
    last_rate_limit_wait: Option<Duration>,
}

impl RetryPolicy {
    /// Create a policy
    pub fn new(
        max_retries: u32,
        base_delay: Duration,
        rate_limit_initial_wait: Duration,
        rate_limit_increment: Duration,
    ) -> Self {
        Self {
            max_retries,
            base_delay,
            rate_limit_initial_wait,
            rate_limit_increment,
            rate_limit_hits: 0,
            last_rate_limit_wait: None,
        }
    }

    /// Maximum retries per operation
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Number of rate-limit errors seen so far in this run
    pub fn rate_limit_hits(&self) -> u32 {
        self.rate_limit_hits
    }

    /// Exponential delay before retry number `attempt` (0-based)
    pub fn exponential_delay(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.min(MAX_BACKOFF_EXPONENT);
        self.base_delay.saturating_mul(factor)
    }

    /// Wait for the next rate-limit error of this run
    pub fn rate_limit_delay(&mut self, retry_after: Option<Duration>) -> Duration {
        let escalated = self
            .rate_limit_initial_wait
            .saturating_add(self.rate_limit_increment.saturating_mul(self.rate_limit_hits));
        let mut wait = retry_after.map_or(escalated, |after| escalated.max(after));

        if let Some(last) = self.last_rate_limit_wait {
            if wait <= last {
                wait = last.saturating_add(self.rate_limit_increment.max(Duration::from_millis(1)));
            }
        }

        self.rate_limit_hits += 1;
        self.last_rate_limit_wait = Some(wait);
        wait
    }

    /// Delay before retrying after `error` on retry number `attempt`
    pub fn next_delay(&mut self, error: &ProviderError, attempt: u32) -> Duration {
        match error {
            ProviderError::RateLimitExceeded { retry_after_secs, .. } => {
                self.rate_limit_delay(retry_after_secs.map(Duration::from_secs))
            }
            _ => self.exponential_delay(attempt),
        }
    }

    /// Run `operation`, retrying transient failures.
    ///
    /// `label` identifies the work in log messages and errors.
    pub async fn run<F, Fut, T>(&mut self, label: &str, mut operation: F) -> Result<Retried<T>, TranslationError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ProviderError>>,
    {
        let mut attempt = 0;

        loop {
            match operation().await {
                Ok(value) => return Ok(Retried { value, retries: attempt }),
                Err(error) if error.is_transient() => {
                    if attempt >= self.max_retries {
                        return Err(TranslationError::RetriesExhausted {
                            source_text: label.to_string(),
                            attempts: attempt + 1,
                            last_error: error,
                        });
                    }

                    let delay = self.next_delay(&error, attempt);
                    warn!(
                        "{}. Retrying in {}ms ({}/{})",
                        error,
                        delay.as_millis(),
                        attempt + 1,
                        self.max_retries
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(TranslationError::Provider(error)),
            }
        }
    }
}

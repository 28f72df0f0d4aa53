use std::future::Future;
use std::time::Duration;

use tracing::debug;

use crate::utils::constants::{MAX_ATTEMPTS, RETRY_DELAY_MS};

/// Suspending wait between attempts.
pub trait Sleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await
    }
}

/// Returned when every attempt failed. `last` is `None` only for a
/// policy with zero attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last: Option<E>,
}

/// Fixed number of attempts with a fixed delay between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed()
    }
}

impl RetryPolicy {
    pub fn fixed() -> Self {
        Self {
            attempts: MAX_ATTEMPTS,
            delay: Duration::from_millis(RETRY_DELAY_MS),
        }
    }

    /// Calls `operation(attempt)` until it succeeds or attempts run out.
    ///
    /// `on_failure(attempt, &err, next_delay)` sees every failed attempt;
    /// `next_delay` is `None` for the last one, which is never followed by a
    /// sleep.
    pub async fn run_with_retry<S, F, Fut, T, E, H>(
        &self,
        sleeper: &S,
        mut operation: F,
        mut on_failure: H,
    ) -> Result<T, RetryExhausted<E>>
    where
        S: Sleeper,
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
        H: FnMut(u32, &E, Option<Duration>),
    {
        let mut last = None;

        for attempt in 1..=self.attempts {
            match operation(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => {
                    let next_delay = (attempt < self.attempts).then_some(self.delay);
                    on_failure(attempt, &e, next_delay);
                    last = Some(e);
                    if let Some(delay) = next_delay {
                        debug!("sleeping {:?} before attempt {}", delay, attempt + 1);
                        sleeper.sleep(delay).await;
                    }
                }
            }
        }

        match &last {
            Some(e) => debug!("all {} attempts failed: {e}", self.attempts),
            None => debug!("retry policy allows no attempts"),
        }
        Err(RetryExhausted {
            attempts: self.attempts,
            last,
        })
    }
}

use std::future::Future;
use std::time::Duration;
use tracing::{error, warn};

use crate::config::ClientConfig;
use crate::error::ClientError;

/// How a single attempt ended
#[derive(Debug)]
pub enum AttemptOutcome<T> {
    Success(T),
    /// `pause` is set when the next attempt has to wait out the retry delay
    RetryableFailure { error: ClientError, pause: bool },
    TerminalFailure(ClientError),
}

impl<T> AttemptOutcome<T> {
    /// A 503 is always retryable, with a pause unless no attempt follows.
    /// Anything else is retried at once until the final attempt, where it
    /// becomes terminal.
    pub fn classify(result: Result<T, ClientError>, attempt: u32, max_attempts: u32) -> Self {
        let last = attempt >= max_attempts;
        match result {
            Ok(value) => AttemptOutcome::Success(value),
            Err(error) if error.is_transient() => AttemptOutcome::RetryableFailure {
                error,
                pause: !last,
            },
            Err(error) if last => AttemptOutcome::TerminalFailure(error),
            Err(error) => AttemptOutcome::RetryableFailure {
                error,
                pause: false,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    /// Wait after a 503 before trying again; other failures retry at once
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.join_attempts, config.retry_delay)
    }

    /// Run `op` (called with the 1-based attempt number) until it succeeds,
    /// fails terminally, or runs out of attempts.
    ///
    /// Running out of attempts on 503s yields `Ok(None)`.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<Option<T>, ClientError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, ClientError>>,
    {
        for attempt in 1..=self.max_attempts {
            match AttemptOutcome::classify(op(attempt).await, attempt, self.max_attempts) {
                AttemptOutcome::Success(value) => return Ok(Some(value)),
                AttemptOutcome::TerminalFailure(e) => {
                    error!("Attempt {}/{} failed: {}", attempt, self.max_attempts, e);
                    return Err(e);
                }
                AttemptOutcome::RetryableFailure { error, pause } => {
                    warn!("Attempt {}/{} failed: {}", attempt, self.max_attempts, error);
                    if pause {
                        tokio::time::sleep(self.delay).await;
                    }
                }
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        let ok: Result<u8, ClientError> = Ok(1);
        assert!(matches!(AttemptOutcome::classify(ok, 3, 3), AttemptOutcome::Success(1)));

        let busy = || Err::<u8, _>(ClientError::ServiceUnavailable);
        assert!(matches!(
            AttemptOutcome::classify(busy(), 2, 3),
            AttemptOutcome::RetryableFailure { error: ClientError::ServiceUnavailable, pause: true }
        ));
        assert!(matches!(
            AttemptOutcome::classify(busy(), 3, 3),
            AttemptOutcome::RetryableFailure { error: ClientError::ServiceUnavailable, pause: false }
        ));

        let broken = || Err::<u8, _>(ClientError::Transport("refused".to_string()));
        assert!(matches!(
            AttemptOutcome::classify(broken(), 2, 3),
            AttemptOutcome::RetryableFailure { pause: false, .. }
        ));
        assert!(matches!(
            AttemptOutcome::classify(broken(), 3, 3),
            AttemptOutcome::TerminalFailure(_)
        ));
    }

    #[test]
    fn test_policy_needs_one_attempt() {
        assert_eq!(RetryPolicy::new(0, Duration::ZERO).max_attempts, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_pause_after_final_attempt() {
        let policy = RetryPolicy::new(2, Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        let result: Result<Option<()>, _> = policy
            .run(|_| async { Err(ClientError::ServiceUnavailable) })
            .await;
        assert!(matches!(result, Ok(None)));
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2) && elapsed < Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_non_transient_failures_retry_without_pause() {
        let policy = RetryPolicy::new(3, Duration::from_secs(2));
        let start = tokio::time::Instant::now();
        let mut calls = 0;
        let result = policy
            .run(|attempt| {
                calls += 1;
                async move {
                    if attempt < 3 {
                        Err(ClientError::Transport("reset".to_string()))
                    } else {
                        Ok(attempt)
                    }
                }
            })
            .await;
        assert_eq!(result.unwrap(), Some(3));
        assert_eq!(calls, 3);
        assert!(start.elapsed() < Duration::from_secs(2));
    }
}

//! Bounded retry with exponential backoff for idempotent requests.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tokio::time::sleep;

use crate::errors::Error;

/// Retry behavior for idempotent (GET) requests.
///
/// The client never retries POSTs: comment and submission-key creation have
/// no idempotency guarantee, so a retried write can create a duplicate
/// server-side resource.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Additional attempts after the first. 0 disables retries.
    pub max_retries: u32,
    /// Backoff before the first retry; doubles each attempt.
    pub base_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_backoff: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// A policy that issues every request exactly once.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_backoff: Duration::ZERO,
        }
    }
}

/// Runs `operation`, retrying retryable failures per `policy`.
///
/// - Waits `base_backoff * 2^attempt` plus 0-500 ms of jitter between
///   attempts, or the server's `Retry-After` hint when it is larger.
/// - Terminal errors (auth, validation, unexpected status) return
///   immediately.
pub async fn with_backoff<F, Fut, T>(policy: &RetryPolicy, operation: F) -> Result<T, Error>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, Error>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                let backoff = policy.base_backoff * (1u32 << attempt.min(16));
                let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..500u64));
                let mut wait = backoff + jitter;
                if let Some(hint) = e.retry_after() {
                    wait = wait.max(hint);
                }
                tracing::warn!("attempt {} failed, retrying in {:?}: {}", attempt + 1, wait, e);
                sleep(wait).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use super::*;
    use crate::errors::Verb;

    fn server_error() -> Error {
        Error::Server {
            verb: Verb::Get,
            url: "https://example.com/documents".into(),
            status: 500,
            body: String::new(),
        }
    }

    fn auth_error() -> Error {
        Error::Auth {
            verb: Verb::Get,
            url: "https://example.com/documents".into(),
            status: 403,
            body: String::new(),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_makes_one_call() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = Arc::clone(&calls);

        let result = with_backoff(&RetryPolicy::default(), move || {
            let calls = Arc::clone(&calls_clone);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<_, Error>(42)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn terminal_error_short_circuits() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = Arc::clone(&calls);

        let result = with_backoff(&RetryPolicy::default(), move || {
            let calls = Arc::clone(&calls_clone);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(auth_error())
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Auth { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn retryable_error_exhausts_bounded_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = Arc::clone(&calls);

        let policy = RetryPolicy {
            max_retries: 2,
            base_backoff: Duration::from_millis(100),
        };
        let result = with_backoff(&policy, move || {
            let calls = Arc::clone(&calls_clone);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(server_error())
            }
        })
        .await;

        assert!(matches!(result, Err(Error::Server { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failures() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = Arc::clone(&calls);

        let policy = RetryPolicy {
            max_retries: 3,
            base_backoff: Duration::from_millis(100),
        };
        let result = with_backoff(&policy, move || {
            let calls = Arc::clone(&calls_clone);
            async move {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(server_error())
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn none_policy_never_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let calls_clone = Arc::clone(&calls);

        let result = with_backoff(&RetryPolicy::none(), move || {
            let calls = Arc::clone(&calls_clone);
            async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Err::<i32, _>(server_error())
            }
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}

//! Retry-with-backoff helper for flaky network calls.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tracing::warn;

/// Maximum number of retries after the initial attempt.
/// 3 retries with exponential backoff usually succeeds without excessive delay.
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds.
/// 1 second is polite to the server while not making callers wait too long.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Run `operation`, retrying on failure with doubling delays until it
/// succeeds or the retries are exhausted. The last error is returned
/// unchanged.
pub async fn with_exponential_retry<T, E, F, Fut>(mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let mut attempt = 0;
    let mut backoff_ms = INITIAL_BACKOFF_MS;

    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(e) if attempt < MAX_RETRIES => {
                attempt += 1;
                warn!(attempt, backoff_ms, error = %e, "operation failed, backing off");
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                backoff_ms *= 2;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test(start_paused = true)]
    async fn test_success_on_first_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = with_exponential_retry(|| {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Ok(42) }
        })
        .await;
        assert_eq!(result, Ok(42));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = with_exponential_retry(|| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err("transient".to_string())
                } else {
                    Ok(7)
                }
            }
        })
        .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_surfaces_last_error() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, String> = with_exponential_retry(|| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { Err(format!("failure {}", n)) }
        })
        .await;
        // Initial attempt plus MAX_RETRIES retries.
        assert_eq!(calls.load(Ordering::SeqCst), 1 + MAX_RETRIES);
        assert_eq!(result, Err(format!("failure {}", MAX_RETRIES)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_backoff_doubles_between_attempts() {
        let start = tokio::time::Instant::now();
        let _: Result<(), String> =
            with_exponential_retry(|| async { Err("nope".to_string()) }).await;
        // 1s + 2s + 4s of backoff across the three retries.
        assert_eq!(start.elapsed(), Duration::from_secs(7));
    }
}

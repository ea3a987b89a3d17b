//! Sequential retry with capped exponential backoff and a remote fallback

use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::backend::Origin;
use crate::error::Result;

/// Delay before the second attempt
pub const BASE_DELAY: Duration = Duration::from_millis(1000);

/// Upper bound on any single backoff delay
pub const MAX_DELAY: Duration = Duration::from_millis(5000);

/// Delay after failed attempt number `attempt` (zero-based)
///
/// `min(1000 * 2^attempt, 5000)` milliseconds.
#[must_use]
pub fn backoff_delay(attempt: u32) -> Duration {
    let factor = 2u32.checked_pow(attempt).unwrap_or(u32::MAX);
    BASE_DELAY.saturating_mul(factor).min(MAX_DELAY)
}

/// Run `attempt_fn` against the local origin up to `retries + 1` times, then
/// once against the remote origin
///
/// Returns the first success. Errors that are not retryable end the sequence
/// immediately. Otherwise the error of the last attempt made (the fallback)
/// is returned.
pub async fn with_fallback<T, F, Fut>(retries: u32, mut attempt_fn: F) -> Result<T>
where
    F: FnMut(Origin, u32) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut attempt = 0;
    loop {
        debug!(attempt, retries, "attempting local request");
        let error = match attempt_fn(Origin::Local, attempt).await {
            Ok(value) => return Ok(value),
            Err(e) if !e.is_retryable() => return Err(e),
            Err(e) => e,
        };

        if attempt >= retries {
            warn!(attempt, error = %error, "local attempts exhausted, falling back to remote origin");
            let fallback = attempt_fn(Origin::Remote, attempt + 1).await;
            match &fallback {
                Ok(_) => info!("remote fallback succeeded"),
                Err(e) => warn!(error = %e, "remote fallback failed"),
            }
            return fallback;
        }

        let delay = backoff_delay(attempt);
        warn!(attempt, error = %error, delay = ?delay, "attempt failed, retrying");
        sleep(delay).await;
        attempt += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClientError;
    use std::sync::Mutex;

    #[test]
    fn test_backoff_sequence() {
        let delays: Vec<u128> = (0..6).map(|a| backoff_delay(a).as_millis()).collect();
        assert_eq!(delays, vec![1000, 2000, 4000, 5000, 5000, 5000]);
    }

    #[test]
    fn test_backoff_never_overflows() {
        assert_eq!(backoff_delay(31), MAX_DELAY);
        assert_eq!(backoff_delay(u32::MAX), MAX_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn test_success_after_retry() {
        let calls = Mutex::new(Vec::new());
        let result = with_fallback(3, |origin, attempt| {
            calls.lock().unwrap().push((origin, attempt));
            async move {
                if attempt < 2 {
                    Err(ClientError::Unsuccessful("not yet".into()))
                } else {
                    Ok(attempt)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(
            *calls.lock().unwrap(),
            vec![(Origin::Local, 0), (Origin::Local, 1), (Origin::Local, 2)]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_falls_back_once() {
        let calls = Mutex::new(Vec::new());
        let result: Result<()> = with_fallback(2, |origin, _| {
            calls.lock().unwrap().push(origin);
            async move { Err(ClientError::Unsuccessful(format!("{origin} failed"))) }
        })
        .await;

        assert_eq!(result.unwrap_err().to_string(), "remote failed");
        assert_eq!(
            *calls.lock().unwrap(),
            vec![Origin::Local, Origin::Local, Origin::Local, Origin::Remote]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_definitive_error_stops_immediately() {
        let calls = Mutex::new(0);
        let result: Result<()> = with_fallback(3, |_, _| {
            *calls.lock().unwrap() += 1;
            async { Err(ClientError::NotFound) }
        })
        .await;

        assert!(matches!(result, Err(ClientError::NotFound)));
        assert_eq!(*calls.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_retries_goes_straight_to_fallback() {
        let start = tokio::time::Instant::now();
        let result = with_fallback(0, |origin, _| async move {
            match origin {
                Origin::Local => Err(ClientError::Unsuccessful("down".into())),
                Origin::Remote => Ok("remote"),
            }
        })
        .await;

        assert_eq!(result.unwrap(), "remote");
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}

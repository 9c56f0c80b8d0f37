//! First-settle-wins race between a provider call and a timer.

use std::future::Future;
use std::time::Duration;

use crate::provider::ProviderError;

/// Await `operation`, or fail with [`ProviderError::Timeout`] once `duration` elapses.
///
/// When the timer wins, the operation future is dropped, which cancels any
/// in-flight request it owns.
pub async fn with_timeout<T, F>(duration: Duration, operation: F) -> Result<T, ProviderError>
where
    F: Future<Output = Result<T, ProviderError>>,
{
    match tokio::time::timeout(duration, operation).await {
        Ok(result) => result,
        Err(_) => Err(ProviderError::Timeout(duration)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[tokio::test]
    async fn test_operation_wins() {
        let result = with_timeout(Duration::from_secs(1), async { Ok::<_, ProviderError>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_operation_error_passes_through() {
        let result: Result<(), _> = with_timeout(Duration::from_secs(1), async {
            Err(ProviderError::Malformed("empty".into()))
        })
        .await;
        assert!(matches!(result, Err(ProviderError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_timer_wins() {
        let started = Instant::now();
        let result: Result<(), _> =
            with_timeout(Duration::from_millis(50), std::future::pending()).await;

        assert!(matches!(result, Err(ProviderError::Timeout(d)) if d == Duration::from_millis(50)));
        assert!(started.elapsed() < Duration::from_secs(2));
    }
}

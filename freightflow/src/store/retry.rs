//! Timeouts and jittered backoff around Warehouse reads.

use crate::config::{BackoffStrategy, FetchConfig, JitterStrategy, RetryConfig};
use crate::core::Warehouse;
use crate::locator::WarehouseGetter;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;
use tracing::{debug, warn};

/// State tracking for retry operations.
#[derive(Debug, Default)]
pub struct RetryState {
    /// Current attempt number (0-indexed).
    pub attempt: usize,
}

impl RetryState {
    /// Creates a new retry state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if retries are exhausted.
    #[must_use]
    pub fn is_exhausted(&self, config: &RetryConfig) -> bool {
        self.attempt + 1 >= config.max_attempts
    }

    /// Calculates the delay before the next attempt.
    #[must_use]
    pub fn calculate_delay(&self, config: &RetryConfig) -> Duration {
        let base = config.base_delay_ms;
        let max = config.max_delay_ms;
        let attempt = u32::try_from(self.attempt).unwrap_or(u32::MAX);

        let delay = match config.backoff {
            BackoffStrategy::Exponential => base.saturating_mul(2u64.saturating_pow(attempt)),
            BackoffStrategy::Linear => base.saturating_mul(u64::from(attempt) + 1),
            BackoffStrategy::Constant => base,
        }
        .min(max);

        let jittered = match config.jitter {
            JitterStrategy::None => delay,
            JitterStrategy::Full => {
                if delay == 0 {
                    0
                } else {
                    rand::thread_rng().gen_range(0..=delay)
                }
            }
            JitterStrategy::Equal => {
                let half = delay / 2;
                if half == 0 {
                    delay
                } else {
                    half + rand::thread_rng().gen_range(0..=half)
                }
            }
        };

        Duration::from_millis(jittered)
    }
}

/// Executes an operation, retrying failures according to `config`.
pub async fn with_retry<T, E, F, Fut>(config: &RetryConfig, key: &str, mut operation: F) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut state = RetryState::new();

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) if state.is_exhausted(config) => {
                warn!(key, attempts = state.attempt + 1, error = %e, "Giving up after retries");
                return Err(e);
            }
            Err(e) => {
                let delay = state.calculate_delay(config);
                state.attempt += 1;
                debug!(
                    key,
                    attempt = state.attempt,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %e,
                    "Retrying after error"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// A [`WarehouseGetter`] that bounds each read with a timeout and retries
/// failed reads with backoff.
///
/// A missing Warehouse is an answer, not a failure, and is never retried. A
/// read that times out on its final attempt is reported as an error.
#[derive(Debug)]
pub struct RetryingWarehouseGetter<G> {
    inner: G,
    config: FetchConfig,
}

impl<G: WarehouseGetter> RetryingWarehouseGetter<G> {
    /// Wraps `inner` with the given configuration.
    #[must_use]
    pub fn new(inner: G, config: FetchConfig) -> Self {
        Self { inner, config }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Returns the wrapped getter.
    #[must_use]
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: WarehouseGetter> WarehouseGetter for RetryingWarehouseGetter<G> {
    async fn get_warehouse(
        &self,
        namespace: &str,
        name: &str,
    ) -> anyhow::Result<Option<Warehouse>> {
        let timeout = self.config.timeout();
        let key = format!("{namespace}/{name}");
        let inner = &self.inner;
        with_retry(&self.config.retry, &key, move || async move {
            match tokio::time::timeout(timeout, inner.get_warehouse(namespace, name)).await {
                Ok(result) => result,
                Err(_) => Err(anyhow::anyhow!(
                    "timed out after {}ms reading Warehouse {name} in namespace {namespace}",
                    timeout.as_millis()
                )),
            }
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FailingWarehouseGetter, RecordingWarehouseGetter};
    use crate::store::InMemoryWarehouseStore;

    fn fast_retry(attempts: usize) -> FetchConfig {
        FetchConfig::new().with_timeout_ms(50).with_retry(
            RetryConfig::new()
                .with_max_attempts(attempts)
                .with_base_delay_ms(1)
                .with_max_delay_ms(2)
                .with_jitter(JitterStrategy::None),
        )
    }

    #[test]
    fn test_exponential_delay_is_capped() {
        let config = RetryConfig::new()
            .with_base_delay_ms(100)
            .with_max_delay_ms(250)
            .with_jitter(JitterStrategy::None);
        let mut state = RetryState::new();

        assert_eq!(state.calculate_delay(&config), Duration::from_millis(100));
        state.attempt = 1;
        assert_eq!(state.calculate_delay(&config), Duration::from_millis(200));
        state.attempt = 2;
        assert_eq!(state.calculate_delay(&config), Duration::from_millis(250));
    }

    #[test]
    fn test_full_jitter_stays_in_range() {
        let config = RetryConfig::new().with_base_delay_ms(100).with_max_delay_ms(100);
        let state = RetryState::new();
        for _ in 0..20 {
            assert!(state.calculate_delay(&config) <= Duration::from_millis(100));
        }
    }

    #[tokio::test]
    async fn test_with_retry_succeeds_after_failures() {
        let config = fast_retry(3).retry;
        let mut calls = 0;
        let result: Result<u32, String> = with_retry(&config, "op", || {
            calls += 1;
            let outcome = if calls < 3 { Err("boom".to_string()) } else { Ok(7) };
            async move { outcome }
        })
        .await;

        assert_eq!(result, Ok(7));
        assert_eq!(calls, 3);
    }

    #[tokio::test]
    async fn test_failures_are_retried_then_surface() {
        let failing = RecordingWarehouseGetter::new(FailingWarehouseGetter::new("connection refused"));
        let getter = RetryingWarehouseGetter::new(failing, fast_retry(3));

        let err = getter.get_warehouse("ns", "w").await.unwrap_err();
        assert!(err.to_string().contains("connection refused"));
        assert_eq!(getter.inner().call_count(), 3);
    }

    #[tokio::test]
    async fn test_missing_warehouse_is_not_retried() {
        let recording = RecordingWarehouseGetter::new(InMemoryWarehouseStore::new());
        let getter = RetryingWarehouseGetter::new(recording, fast_retry(3));

        assert!(getter.get_warehouse("ns", "w").await.unwrap().is_none());
        assert_eq!(getter.inner().call_count(), 1);
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_error() {
        let slow = FailingWarehouseGetter::new("unused").with_delay(Duration::from_millis(500));
        let getter = RetryingWarehouseGetter::new(slow, fast_retry(1));

        let err = getter.get_warehouse("ns", "w").await.unwrap_err();
        assert!(err.to_string().contains("timed out"));
    }
}

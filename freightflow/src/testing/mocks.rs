//! Warehouse getters for testing.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::time::Duration;

use crate::core::Warehouse;
use crate::locator::WarehouseGetter;

/// Wraps a getter and records every read made through it.
#[derive(Debug)]
pub struct RecordingWarehouseGetter<G> {
    inner: G,
    calls: Mutex<Vec<(String, String)>>,
}

impl<G> RecordingWarehouseGetter<G> {
    /// Wraps `inner`.
    #[must_use]
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Returns the number of reads made.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Returns the `(namespace, name)` of each read, in order.
    #[must_use]
    pub fn recorded_calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }

    /// Resets call tracking.
    pub fn reset(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl<G: WarehouseGetter> WarehouseGetter for RecordingWarehouseGetter<G> {
    async fn get_warehouse(
        &self,
        namespace: &str,
        name: &str,
    ) -> anyhow::Result<Option<Warehouse>> {
        self.calls
            .lock()
            .push((namespace.to_string(), name.to_string()));
        self.inner.get_warehouse(namespace, name).await
    }
}

/// A getter whose reads always fail.
#[derive(Debug)]
pub struct FailingWarehouseGetter {
    error: String,
    delay: Option<Duration>,
}

impl FailingWarehouseGetter {
    /// Creates a getter failing with `error`.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            delay: None,
        }
    }

    /// Makes every read wait before failing.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl WarehouseGetter for FailingWarehouseGetter {
    async fn get_warehouse(
        &self,
        _namespace: &str,
        _name: &str,
    ) -> anyhow::Result<Option<Warehouse>> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Err(anyhow::anyhow!("{}", self.error))
    }
}

//! Read access to Warehouses.

use crate::core::Warehouse;
use async_trait::async_trait;
use std::sync::Arc;

/// Reads a single Warehouse by namespaced name.
///
/// `Ok(None)` signals that the Warehouse does not exist. `Err` is reserved
/// for failures of the read itself. Implementations must be safe to call
/// concurrently.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseGetter: Send + Sync {
    /// Fetches the Warehouse `name` in `namespace`.
    async fn get_warehouse(&self, namespace: &str, name: &str)
        -> anyhow::Result<Option<Warehouse>>;
}

#[async_trait]
impl<G: WarehouseGetter + ?Sized> WarehouseGetter for Arc<G> {
    async fn get_warehouse(
        &self,
        namespace: &str,
        name: &str,
    ) -> anyhow::Result<Option<Warehouse>> {
        (**self).get_warehouse(namespace, name).await
    }
}

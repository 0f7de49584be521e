//! In-memory Warehouse store.

use crate::core::Warehouse;
use crate::errors::FreightflowError;
use crate::locator::WarehouseGetter;
use async_trait::async_trait;
use dashmap::DashMap;
use std::path::Path;

/// A concurrency-safe Warehouse store keyed by namespace and name.
#[derive(Debug, Default, Clone)]
pub struct InMemoryWarehouseStore {
    warehouses: DashMap<(String, String), Warehouse>,
}

impl InMemoryWarehouseStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store holding the given Warehouses.
    #[must_use]
    pub fn with_warehouses(warehouses: impl IntoIterator<Item = Warehouse>) -> Self {
        let store = Self::new();
        for warehouse in warehouses {
            store.insert(warehouse);
        }
        store
    }

    /// Inserts or replaces a Warehouse, returning the previous one.
    pub fn insert(&self, warehouse: Warehouse) -> Option<Warehouse> {
        let key = (warehouse.namespace.clone(), warehouse.name.clone());
        self.warehouses.insert(key, warehouse)
    }

    /// Removes a Warehouse.
    pub fn remove(&self, namespace: &str, name: &str) -> Option<Warehouse> {
        self.warehouses
            .remove(&(namespace.to_string(), name.to_string()))
            .map(|(_, warehouse)| warehouse)
    }

    /// Returns the number of stored Warehouses.
    #[must_use]
    pub fn len(&self) -> usize {
        self.warehouses.len()
    }

    /// Returns true if no Warehouses are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.warehouses.is_empty()
    }

    /// Loads Warehouses from a JSON array, returning how many were loaded.
    pub fn load_json(&self, json: &str) -> Result<usize, FreightflowError> {
        let warehouses: Vec<Warehouse> = serde_json::from_str(json)?;
        let count = warehouses.len();
        for warehouse in warehouses {
            self.insert(warehouse);
        }
        Ok(count)
    }

    /// Loads Warehouses from a file holding a JSON array.
    pub fn load_json_file(&self, path: impl AsRef<Path>) -> Result<usize, FreightflowError> {
        let json = std::fs::read_to_string(path)?;
        self.load_json(&json)
    }
}

#[async_trait]
impl WarehouseGetter for InMemoryWarehouseStore {
    async fn get_warehouse(
        &self,
        namespace: &str,
        name: &str,
    ) -> anyhow::Result<Option<Warehouse>> {
        Ok(self
            .warehouses
            .get(&(namespace.to_string(), name.to_string()))
            .map(|entry| entry.value().clone()))
    }
}

//! Test fixtures for locator and resolver tests.

use crate::core::{
    FreightReference, FreightRequest, Origin, RepoSubscription, Stage, Warehouse,
};
use crate::locator::{ArtifactLocator, WarehouseGetter};
use crate::store::InMemoryWarehouseStore;

/// Namespace used by fixtures unless overridden.
pub const TEST_NAMESPACE: &str = "test-namespace";

/// Builds a Warehouse in [`TEST_NAMESPACE`].
#[must_use]
pub fn warehouse(name: &str, subscriptions: Vec<RepoSubscription>) -> Warehouse {
    Warehouse {
        namespace: TEST_NAMESPACE.to_string(),
        name: name.to_string(),
        subscriptions,
    }
}

/// Builds an empty Freight reference from the named Warehouse.
#[must_use]
pub fn freight_from(warehouse: &str) -> FreightReference {
    FreightReference::new(Origin::warehouse(warehouse))
}

/// A Stage under test together with the Warehouses it can see.
#[derive(Debug)]
pub struct StageFixture {
    /// The Stage.
    pub stage: Stage,
    /// Warehouses visible to the Stage.
    pub store: InMemoryWarehouseStore,
}

impl Default for StageFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl StageFixture {
    /// Creates a fixture with an empty Stage in [`TEST_NAMESPACE`].
    #[must_use]
    pub fn new() -> Self {
        Self {
            stage: Stage::new(TEST_NAMESPACE, "test-stage"),
            store: InMemoryWarehouseStore::new(),
        }
    }

    /// Requests Freight directly from the named Warehouse.
    #[must_use]
    pub fn requesting(mut self, warehouse: &str) -> Self {
        self.stage
            .spec
            .requested_freight
            .push(FreightRequest::direct(Origin::warehouse(warehouse)));
        self
    }

    /// Makes a Warehouse visible to the Stage.
    #[must_use]
    pub fn with_warehouse(self, warehouse: Warehouse) -> Self {
        self.store.insert(warehouse);
        self
    }

    /// Attaches Freight to the Stage.
    #[must_use]
    pub fn with_freight(mut self, freight: FreightReference) -> Self {
        self.stage.status.freight.push(freight);
        self
    }

    /// Returns a locator backed by the fixture's own store.
    #[must_use]
    pub fn locator(&self) -> ArtifactLocator<'_> {
        ArtifactLocator::for_stage(&self.store, &self.stage)
    }

    /// Returns a locator backed by another getter.
    #[must_use]
    pub fn locator_with<'a>(&'a self, getter: &'a dyn WarehouseGetter) -> ArtifactLocator<'a> {
        ArtifactLocator::for_stage(getter, &self.stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_builds_stage() {
        let fixture = StageFixture::new()
            .requesting("w")
            .with_warehouse(warehouse("w", vec![RepoSubscription::image("nginx")]))
            .with_freight(freight_from("w"));

        assert_eq!(fixture.stage.spec.requested_freight.len(), 1);
        assert_eq!(fixture.stage.status.freight.len(), 1);
        assert_eq!(fixture.store.len(), 1);
        assert_eq!(fixture.locator().namespace(), TEST_NAMESPACE);
    }
}

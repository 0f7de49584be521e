//! Testing utilities for code built on freightflow.
//!
//! This module provides:
//! - Stage and Warehouse fixtures
//! - Recording and failing Warehouse getters
//! - Assertions for locator errors

mod assertions;
mod fixtures;
mod mocks;

pub use assertions::{assert_ambiguous, assert_upstream, assert_warehouse_not_found};
pub use fixtures::{freight_from, warehouse, StageFixture, TEST_NAMESPACE};
pub use mocks::{FailingWarehouseGetter, RecordingWarehouseGetter};

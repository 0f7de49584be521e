//! Test assertions for locator results.

use crate::errors::LocatorError;

/// Asserts that the error reports an ambiguous origin.
pub fn assert_ambiguous<T: std::fmt::Debug>(result: &Result<T, LocatorError>) {
    match result {
        Err(err @ LocatorError::Ambiguous { .. }) => assert!(
            err.to_string()
                .contains("multiple requested Freight could potentially provide"),
            "Unexpected ambiguity message: {err}"
        ),
        other => panic!("Expected ambiguity error, got {other:?}"),
    }
}

/// Asserts that the error reports the named Warehouse as missing.
pub fn assert_warehouse_not_found<T: std::fmt::Debug>(
    result: &Result<T, LocatorError>,
    expected_name: &str,
) {
    match result {
        Err(LocatorError::WarehouseNotFound { name, .. }) => assert_eq!(
            name, expected_name,
            "Expected Warehouse '{expected_name}' to be missing, got '{name}'"
        ),
        other => panic!("Expected Warehouse not found error, got {other:?}"),
    }
}

/// Asserts that the error wraps a failed Warehouse read.
pub fn assert_upstream<T: std::fmt::Debug>(result: &Result<T, LocatorError>) {
    assert!(
        matches!(result, Err(LocatorError::Upstream { .. })),
        "Expected upstream error, got {result:?}"
    );
}

//! [`WarehouseGetter`](crate::locator::WarehouseGetter) implementations.

mod memory;
mod retry;

pub use memory::InMemoryWarehouseStore;
pub use retry::{with_retry, RetryState, RetryingWarehouseGetter};

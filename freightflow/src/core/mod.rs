//! Core domain model types for freightflow.
//!
//! This module contains the objects promotion decisions are made over:
//! - Origins and Freight requests
//! - Warehouses and their subscriptions
//! - Freight references and the artifacts they carry
//! - Stages

mod freight;
mod origin;
mod stage;
mod warehouse;

pub use freight::{Chart, FreightReference, GitCommit, Image};
pub use origin::{FreightRequest, FreightSources, Origin, OriginKind};
pub use stage::{Stage, StageSpec, StageStatus};
pub use warehouse::{
    ChartSubscription, GitSubscription, ImageSubscription, RepoSubscription, Warehouse,
};

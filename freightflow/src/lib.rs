//! # Freightflow
//!
//! Decides which upstream artifact a Stage promotes.
//!
//! A Stage requests Freight from one or more origins (Warehouses) and
//! describes its promotion as a tree of mechanisms. Freightflow answers two
//! questions for whoever executes that promotion:
//!
//! - **Which origin applies here?** [`mechanisms::resolve_origin`] walks the
//!   mechanism tree and returns the origin pinned on a node or inherited
//!   from its nearest ancestor.
//! - **Which artifact is that?** [`locator::ArtifactLocator`] finds the
//!   commit, image or chart from a repository in the Stage's Freight,
//!   inferring the origin from Warehouse subscriptions when none is given.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use freightflow::prelude::*;
//!
//! let store = InMemoryWarehouseStore::new();
//! let locator = ArtifactLocator::for_stage(&store, &stage);
//!
//! let mechanisms = stage.spec.promotion_mechanisms.as_ref().unwrap();
//! let update = &mechanisms.git_repo_updates[0].kustomize.as_ref().unwrap().images[0];
//! let origin = stage.desired_origin(update);
//!
//! let image = locator.find_image(origin.as_ref(), &update.image).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod core;
pub mod errors;
pub mod expressions;
pub mod locator;
pub mod mechanisms;
pub mod observability;
pub mod store;
pub mod testing;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{BackoffStrategy, FetchConfig, JitterStrategy, RetryConfig};
    pub use crate::core::{
        Chart, FreightReference, FreightRequest, GitCommit, Image, Origin, OriginKind,
        RepoSubscription, Stage, Warehouse,
    };
    pub use crate::errors::{ExpressionError, FreightflowError, LocatorError, UnreachableNodeError};
    pub use crate::expressions::ExpressionEnv;
    pub use crate::locator::{ArtifactKind, ArtifactLocator, WarehouseGetter};
    pub use crate::mechanisms::{resolve_origin, try_resolve_origin, MechanismNode, PromotionMechanisms};
    pub use crate::store::{InMemoryWarehouseStore, RetryingWarehouseGetter};
}

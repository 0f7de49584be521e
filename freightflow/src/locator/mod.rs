//! Artifact location.
//!
//! This module provides:
//! - [`ArtifactLocator`] for finding commits, images and charts in Freight
//! - the [`WarehouseGetter`] port used to infer origins
//! - git URL canonicalization

mod artifact;
mod getter;
mod locate;
mod url;

pub use artifact::{ArtifactKind, Locatable};
#[cfg(test)]
pub use getter::MockWarehouseGetter;
pub use getter::WarehouseGetter;
pub use locate::ArtifactLocator;
pub use url::{git_urls_match, normalize_git_url};

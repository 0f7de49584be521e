//! Promotion mechanisms and origin inheritance.
//!
//! A Stage describes how it promotes Freight as a tree of mechanisms. Any
//! node may pin the origin its artifacts come from; unpinned nodes inherit
//! from their ancestors. [`resolve_origin`] computes that effective origin.

mod config;
mod node;
mod resolver;

pub use config::{
    ArgoCdAppUpdate, ArgoCdHelm, ArgoCdHelmImageUpdate, ArgoCdKustomize,
    ArgoCdKustomizeImageUpdate, ArgoCdSourceUpdate, GitRepoUpdate, HelmChartDependencyUpdate,
    HelmImageUpdate, HelmPromotionMechanism, KustomizeImageUpdate, KustomizePromotionMechanism,
    PromotionMechanisms, RenderImageUpdate, RenderPromotionMechanism,
};
pub use node::MechanismNode;
pub use resolver::{resolve_origin, try_resolve_origin};

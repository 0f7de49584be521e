//! Uniform view over the heterogeneous nodes of a mechanism tree.

use super::config::{
    ArgoCdAppUpdate, ArgoCdHelm, ArgoCdHelmImageUpdate, ArgoCdKustomize,
    ArgoCdKustomizeImageUpdate, ArgoCdSourceUpdate, GitRepoUpdate, HelmChartDependencyUpdate,
    HelmImageUpdate, HelmPromotionMechanism, KustomizeImageUpdate, KustomizePromotionMechanism,
    PromotionMechanisms, RenderImageUpdate, RenderPromotionMechanism,
};
use crate::core::Origin;
use std::ptr;

/// A borrowed reference to one node of a promotion-mechanism tree.
///
/// Two `MechanismNode`s are the *same node* only when they point at the same
/// value in memory (see [`MechanismNode::is`]). Sibling nodes are frequently
/// configured identically, so value equality cannot be used to find a node.
#[derive(Debug, Clone, Copy)]
pub enum MechanismNode<'a> {
    /// The tree root.
    PromotionMechanisms(&'a PromotionMechanisms),
    /// A git repository update.
    GitRepoUpdate(&'a GitRepoUpdate),
    /// Kustomize updates in a git repository.
    Kustomize(&'a KustomizePromotionMechanism),
    /// One Kustomize image update.
    KustomizeImage(&'a KustomizeImageUpdate),
    /// Helm updates in a git repository.
    Helm(&'a HelmPromotionMechanism),
    /// One Helm image update.
    HelmImage(&'a HelmImageUpdate),
    /// One Helm chart dependency update.
    HelmChart(&'a HelmChartDependencyUpdate),
    /// Manifest rendering in a git repository.
    Render(&'a RenderPromotionMechanism),
    /// One rendered image.
    RenderImage(&'a RenderImageUpdate),
    /// An Argo CD Application update.
    ArgoCdAppUpdate(&'a ArgoCdAppUpdate),
    /// One Argo CD source update.
    ArgoCdSourceUpdate(&'a ArgoCdSourceUpdate),
    /// Kustomize overrides on an Argo CD source.
    ArgoCdKustomize(&'a ArgoCdKustomize),
    /// One Argo CD Kustomize image override.
    ArgoCdKustomizeImage(&'a ArgoCdKustomizeImageUpdate),
    /// Helm overrides on an Argo CD source.
    ArgoCdHelm(&'a ArgoCdHelm),
    /// One Argo CD Helm image override.
    ArgoCdHelmImage(&'a ArgoCdHelmImageUpdate),
}

impl<'a> MechanismNode<'a> {
    /// Returns the origin pinned directly on this node, if any.
    #[must_use]
    pub fn own_origin(&self) -> Option<&'a Origin> {
        match *self {
            Self::PromotionMechanisms(n) => n.origin.as_ref(),
            Self::GitRepoUpdate(n) => n.origin.as_ref(),
            Self::Kustomize(n) => n.origin.as_ref(),
            Self::KustomizeImage(n) => n.origin.as_ref(),
            Self::Helm(n) => n.origin.as_ref(),
            Self::HelmImage(n) => n.origin.as_ref(),
            Self::HelmChart(n) => n.origin.as_ref(),
            Self::Render(n) => n.origin.as_ref(),
            Self::RenderImage(n) => n.origin.as_ref(),
            Self::ArgoCdAppUpdate(n) => n.origin.as_ref(),
            Self::ArgoCdSourceUpdate(n) => n.origin.as_ref(),
            Self::ArgoCdKustomize(n) => n.origin.as_ref(),
            Self::ArgoCdKustomizeImage(n) => n.origin.as_ref(),
            Self::ArgoCdHelm(n) => n.origin.as_ref(),
            Self::ArgoCdHelmImage(n) => n.origin.as_ref(),
        }
    }

    /// Returns this node's children in declaration order.
    ///
    /// Absent optional children are not included.
    #[must_use]
    pub fn children(&self) -> Vec<MechanismNode<'a>> {
        match *self {
            Self::PromotionMechanisms(n) => n
                .git_repo_updates
                .iter()
                .map(Self::GitRepoUpdate)
                .chain(n.argocd_app_updates.iter().map(Self::ArgoCdAppUpdate))
                .collect(),
            Self::GitRepoUpdate(n) => {
                let mut children = Vec::with_capacity(3);
                if let Some(kustomize) = &n.kustomize {
                    children.push(Self::Kustomize(kustomize));
                }
                if let Some(helm) = &n.helm {
                    children.push(Self::Helm(helm));
                }
                if let Some(render) = &n.render {
                    children.push(Self::Render(render));
                }
                children
            }
            Self::Kustomize(n) => n.images.iter().map(Self::KustomizeImage).collect(),
            Self::Helm(n) => n
                .images
                .iter()
                .map(Self::HelmImage)
                .chain(n.charts.iter().map(Self::HelmChart))
                .collect(),
            Self::Render(n) => n.images.iter().map(Self::RenderImage).collect(),
            Self::ArgoCdAppUpdate(n) => {
                n.source_updates.iter().map(Self::ArgoCdSourceUpdate).collect()
            }
            Self::ArgoCdSourceUpdate(n) => {
                let mut children = Vec::with_capacity(2);
                if let Some(kustomize) = &n.kustomize {
                    children.push(Self::ArgoCdKustomize(kustomize));
                }
                if let Some(helm) = &n.helm {
                    children.push(Self::ArgoCdHelm(helm));
                }
                children
            }
            Self::ArgoCdKustomize(n) => {
                n.images.iter().map(Self::ArgoCdKustomizeImage).collect()
            }
            Self::ArgoCdHelm(n) => n.images.iter().map(Self::ArgoCdHelmImage).collect(),
            Self::KustomizeImage(_)
            | Self::HelmImage(_)
            | Self::HelmChart(_)
            | Self::RenderImage(_)
            | Self::ArgoCdKustomizeImage(_)
            | Self::ArgoCdHelmImage(_) => Vec::new(),
        }
    }

    /// Returns true when both handles point at the same node.
    #[must_use]
    pub fn is(&self, other: &MechanismNode<'_>) -> bool {
        match (*self, *other) {
            (Self::PromotionMechanisms(a), MechanismNode::PromotionMechanisms(b)) => ptr::eq(a, b),
            (Self::GitRepoUpdate(a), MechanismNode::GitRepoUpdate(b)) => ptr::eq(a, b),
            (Self::Kustomize(a), MechanismNode::Kustomize(b)) => ptr::eq(a, b),
            (Self::KustomizeImage(a), MechanismNode::KustomizeImage(b)) => ptr::eq(a, b),
            (Self::Helm(a), MechanismNode::Helm(b)) => ptr::eq(a, b),
            (Self::HelmImage(a), MechanismNode::HelmImage(b)) => ptr::eq(a, b),
            (Self::HelmChart(a), MechanismNode::HelmChart(b)) => ptr::eq(a, b),
            (Self::Render(a), MechanismNode::Render(b)) => ptr::eq(a, b),
            (Self::RenderImage(a), MechanismNode::RenderImage(b)) => ptr::eq(a, b),
            (Self::ArgoCdAppUpdate(a), MechanismNode::ArgoCdAppUpdate(b)) => ptr::eq(a, b),
            (Self::ArgoCdSourceUpdate(a), MechanismNode::ArgoCdSourceUpdate(b)) => ptr::eq(a, b),
            (Self::ArgoCdKustomize(a), MechanismNode::ArgoCdKustomize(b)) => ptr::eq(a, b),
            (Self::ArgoCdKustomizeImage(a), MechanismNode::ArgoCdKustomizeImage(b)) => {
                ptr::eq(a, b)
            }
            (Self::ArgoCdHelm(a), MechanismNode::ArgoCdHelm(b)) => ptr::eq(a, b),
            (Self::ArgoCdHelmImage(a), MechanismNode::ArgoCdHelmImage(b)) => ptr::eq(a, b),
            _ => false,
        }
    }

    /// Returns the node kind, as named in the Stage spec.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::PromotionMechanisms(_) => "PromotionMechanisms",
            Self::GitRepoUpdate(_) => "GitRepoUpdate",
            Self::Kustomize(_) => "KustomizePromotionMechanism",
            Self::KustomizeImage(_) => "KustomizeImageUpdate",
            Self::Helm(_) => "HelmPromotionMechanism",
            Self::HelmImage(_) => "HelmImageUpdate",
            Self::HelmChart(_) => "HelmChartDependencyUpdate",
            Self::Render(_) => "KargoRenderPromotionMechanism",
            Self::RenderImage(_) => "KargoRenderImageUpdate",
            Self::ArgoCdAppUpdate(_) => "ArgoCDAppUpdate",
            Self::ArgoCdSourceUpdate(_) => "ArgoCDSourceUpdate",
            Self::ArgoCdKustomize(_) => "ArgoCDKustomize",
            Self::ArgoCdKustomizeImage(_) => "ArgoCDKustomizeImageUpdate",
            Self::ArgoCdHelm(_) => "ArgoCDHelm",
            Self::ArgoCdHelmImage(_) => "ArgoCDHelmImageUpdate",
        }
    }
}

macro_rules! impl_from_node {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl<'a> From<&'a $ty> for MechanismNode<'a> {
                fn from(node: &'a $ty) -> Self {
                    Self::$variant(node)
                }
            }
        )*
    };
}

impl_from_node! {
    PromotionMechanisms => PromotionMechanisms,
    GitRepoUpdate => GitRepoUpdate,
    KustomizePromotionMechanism => Kustomize,
    KustomizeImageUpdate => KustomizeImage,
    HelmPromotionMechanism => Helm,
    HelmImageUpdate => HelmImage,
    HelmChartDependencyUpdate => HelmChart,
    RenderPromotionMechanism => Render,
    RenderImageUpdate => RenderImage,
    ArgoCdAppUpdate => ArgoCdAppUpdate,
    ArgoCdSourceUpdate => ArgoCdSourceUpdate,
    ArgoCdKustomize => ArgoCdKustomize,
    ArgoCdKustomizeImageUpdate => ArgoCdKustomizeImage,
    ArgoCdHelm => ArgoCdHelm,
    ArgoCdHelmImageUpdate => ArgoCdHelmImage,
}

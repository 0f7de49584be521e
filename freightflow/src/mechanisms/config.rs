//! Promotion-mechanism configuration tree.
//!
//! Every node may pin an [`Origin`]. A node without one inherits the origin
//! of its nearest ancestor that has one.

use crate::core::Origin;
use serde::{Deserialize, Serialize};

/// Root of a Stage's promotion-mechanism tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromotionMechanisms {
    /// Origin applied to every mechanism below, unless overridden.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Updates to git repositories.
    #[serde(default)]
    pub git_repo_updates: Vec<GitRepoUpdate>,
    /// Updates to Argo CD Applications.
    #[serde(default, rename = "argoCDAppUpdates")]
    pub argocd_app_updates: Vec<ArgoCdAppUpdate>,
}

/// Writes new artifact versions into a git repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitRepoUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Repository to update.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    /// Branch to read from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_branch: Option<String>,
    /// Branch to write to.
    #[serde(default)]
    pub write_branch: String,
    /// Update images with Kustomize.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kustomize: Option<KustomizePromotionMechanism>,
    /// Update images and chart dependencies with Helm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm: Option<HelmPromotionMechanism>,
    /// Render environment-specific manifests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub render: Option<RenderPromotionMechanism>,
}

/// Kustomize-based image updates within a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KustomizePromotionMechanism {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Images to set.
    #[serde(default)]
    pub images: Vec<KustomizeImageUpdate>,
}

/// A single `kustomize edit set image`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KustomizeImageUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Image repository.
    pub image: String,
    /// Directory containing the kustomization.
    pub path: String,
    /// Reference the image by digest instead of tag.
    #[serde(default)]
    pub use_digest: bool,
}

/// Helm-based updates within a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HelmPromotionMechanism {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Image values to set.
    #[serde(default)]
    pub images: Vec<HelmImageUpdate>,
    /// Chart dependencies to bump.
    #[serde(default)]
    pub charts: Vec<HelmChartDependencyUpdate>,
}

/// Sets an image reference in a Helm values file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmImageUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Image repository.
    pub image: String,
    /// Values file to edit.
    pub values_file_path: String,
    /// Key within the values file.
    pub key: String,
    /// What to write: `Tag`, `Digest`, `ImageAndTag` or `ImageAndDigest`.
    pub value: String,
}

/// Bumps a chart dependency in a `Chart.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmChartDependencyUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Chart repository.
    pub repository: String,
    /// Chart name.
    pub name: String,
    /// Directory of the dependent chart.
    pub chart_path: String,
}

/// Manifest rendering for a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderPromotionMechanism {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Images to substitute while rendering.
    #[serde(default)]
    pub images: Vec<RenderImageUpdate>,
}

/// An image substituted during rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderImageUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Image repository.
    pub image: String,
    /// Reference the image by digest instead of tag.
    #[serde(default)]
    pub use_digest: bool,
}

/// Updates an Argo CD Application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCdAppUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Application name.
    pub app_name: String,
    /// Application namespace.
    #[serde(default)]
    pub app_namespace: String,
    /// Sources of the Application to update.
    #[serde(default)]
    pub source_updates: Vec<ArgoCdSourceUpdate>,
}

/// Updates one source of an Argo CD Application.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCdSourceUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Repository of the source.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    /// Chart name, for chart sources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chart: Option<String>,
    /// Point the source's target revision at the new artifact.
    #[serde(default)]
    pub update_target_revision: bool,
    /// Kustomize image overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kustomize: Option<ArgoCdKustomize>,
    /// Helm parameter overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub helm: Option<ArgoCdHelm>,
}

/// Kustomize overrides on an Argo CD source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgoCdKustomize {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Images to override.
    #[serde(default)]
    pub images: Vec<ArgoCdKustomizeImageUpdate>,
}

/// A Kustomize image override on an Argo CD source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgoCdKustomizeImageUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Image repository.
    pub image: String,
    /// Reference the image by digest instead of tag.
    #[serde(default)]
    pub use_digest: bool,
}

/// Helm overrides on an Argo CD source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgoCdHelm {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Image parameters to override.
    #[serde(default)]
    pub images: Vec<ArgoCdHelmImageUpdate>,
}

/// A Helm image parameter override on an Argo CD source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgoCdHelmImageUpdate {
    /// Pinned origin.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin: Option<Origin>,
    /// Image repository.
    pub image: String,
    /// Parameter key.
    pub key: String,
    /// What to write: `Tag`, `Digest`, `ImageAndTag` or `ImageAndDigest`.
    pub value: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_deserializes_from_stage_spec() {
        let json = serde_json::json!({
            "origin": {"kind": "Warehouse", "name": "w"},
            "gitRepoUpdates": [{
                "repoURL": "https://github.com/example/gitops",
                "writeBranch": "main",
                "kustomize": {
                    "images": [{"image": "nginx", "path": "stages/test"}]
                }
            }],
            "argoCDAppUpdates": [{
                "appName": "app",
                "sourceUpdates": [{
                    "repoURL": "oci://charts",
                    "chart": "podinfo",
                    "updateTargetRevision": true
                }]
            }]
        });

        let tree: PromotionMechanisms = serde_json::from_value(json).unwrap();
        assert_eq!(tree.origin, Some(Origin::warehouse("w")));
        assert_eq!(tree.git_repo_updates.len(), 1);
        let kustomize = tree.git_repo_updates[0].kustomize.as_ref().unwrap();
        assert_eq!(kustomize.images[0].image, "nginx");
        assert!(kustomize.images[0].origin.is_none());
        assert!(tree.argocd_app_updates[0].source_updates[0].update_target_revision);
    }
}

//! Effective-origin resolution over a promotion-mechanism tree.

use super::node::MechanismNode;
use crate::core::Origin;
use crate::errors::UnreachableNodeError;

/// Returns the effective origin of `target` within the tree rooted at `root`.
///
/// The effective origin is the origin pinned on `target` itself or, failing
/// that, on its nearest ancestor. `None` means no node on the path from
/// `root` to `target` pins one.
///
/// # Panics
///
/// Panics if `target` is not a node of the tree rooted at `root`. Callers
/// always derive `target` from `root`, so this is a programming error; use
/// [`try_resolve_origin`] to handle it instead.
pub fn resolve_origin<'a, 'b>(
    root: impl Into<MechanismNode<'a>>,
    target: impl Into<MechanismNode<'b>>,
) -> Option<Origin> {
    match try_resolve_origin(root, target) {
        Ok(origin) => origin,
        Err(err) => panic!("{err}"),
    }
}

/// Like [`resolve_origin`], but reports an unreachable target as an error.
pub fn try_resolve_origin<'a, 'b>(
    root: impl Into<MechanismNode<'a>>,
    target: impl Into<MechanismNode<'b>>,
) -> Result<Option<Origin>, UnreachableNodeError> {
    let root = root.into();
    let target = target.into();
    match walk(root, &target, None) {
        Some(effective) => Ok(effective.cloned()),
        None => Err(UnreachableNodeError::new(root.kind(), target.kind())),
    }
}

/// Pre-order search for `target`.
///
/// The outer `Option` reports whether `target` was found in this subtree,
/// the inner one carries its effective origin.
fn walk<'a>(
    node: MechanismNode<'a>,
    target: &MechanismNode<'_>,
    inherited: Option<&'a Origin>,
) -> Option<Option<&'a Origin>> {
    let effective = node.own_origin().or(inherited);
    if node.is(target) {
        return Some(effective);
    }
    node.children()
        .into_iter()
        .find_map(|child| walk(child, target, effective))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanisms::config::{
        ArgoCdAppUpdate, ArgoCdHelm, ArgoCdHelmImageUpdate, ArgoCdSourceUpdate, GitRepoUpdate,
        HelmChartDependencyUpdate, HelmPromotionMechanism, KustomizeImageUpdate,
        KustomizePromotionMechanism, PromotionMechanisms,
    };
    use pretty_assertions::assert_eq;

    fn kustomize_tree(root_origin: Option<Origin>) -> PromotionMechanisms {
        PromotionMechanisms {
            origin: root_origin,
            git_repo_updates: vec![GitRepoUpdate {
                kustomize: Some(KustomizePromotionMechanism {
                    images: vec![KustomizeImageUpdate::default(), KustomizeImageUpdate::default()],
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_three_levels_of_inheritance() {
        let tree = kustomize_tree(Some(Origin::warehouse("o")));
        let image = &tree.git_repo_updates[0].kustomize.as_ref().unwrap().images[0];

        assert_eq!(resolve_origin(&tree, image), Some(Origin::warehouse("o")));
    }

    #[test]
    fn test_override_at_leaf_wins() {
        let mut tree = kustomize_tree(Some(Origin::warehouse("o")));
        tree.git_repo_updates[0].kustomize.as_mut().unwrap().images[0].origin =
            Some(Origin::warehouse("o2"));
        let images = &tree.git_repo_updates[0].kustomize.as_ref().unwrap().images;

        assert_eq!(resolve_origin(&tree, &images[0]), Some(Origin::warehouse("o2")));
        assert_eq!(resolve_origin(&tree, &images[1]), Some(Origin::warehouse("o")));
    }

    #[test]
    fn test_no_origin_anywhere() {
        let tree = kustomize_tree(None);
        let image = &tree.git_repo_updates[0].kustomize.as_ref().unwrap().images[1];

        assert_eq!(resolve_origin(&tree, image), None);
    }

    #[test]
    fn test_root_is_its_own_target() {
        let tree = kustomize_tree(Some(Origin::warehouse("o")));
        assert_eq!(resolve_origin(&tree, &tree), Some(Origin::warehouse("o")));
    }

    #[test]
    fn test_intermediate_override_applies_to_descendants_only() {
        let tree = PromotionMechanisms {
            origin: Some(Origin::warehouse("root")),
            git_repo_updates: vec![
                GitRepoUpdate {
                    helm: Some(HelmPromotionMechanism {
                        origin: Some(Origin::warehouse("helm")),
                        charts: vec![HelmChartDependencyUpdate::default()],
                        ..Default::default()
                    }),
                    ..Default::default()
                },
                GitRepoUpdate {
                    helm: Some(HelmPromotionMechanism {
                        charts: vec![HelmChartDependencyUpdate::default()],
                        ..Default::default()
                    }),
                    ..Default::default()
                },
            ],
            ..Default::default()
        };
        let pinned = &tree.git_repo_updates[0].helm.as_ref().unwrap().charts[0];
        let unpinned = &tree.git_repo_updates[1].helm.as_ref().unwrap().charts[0];

        assert_eq!(resolve_origin(&tree, pinned), Some(Origin::warehouse("helm")));
        assert_eq!(resolve_origin(&tree, unpinned), Some(Origin::warehouse("root")));
    }

    #[test]
    fn test_argocd_branch() {
        let tree = PromotionMechanisms {
            argocd_app_updates: vec![ArgoCdAppUpdate {
                origin: Some(Origin::warehouse("app")),
                source_updates: vec![ArgoCdSourceUpdate {
                    helm: Some(ArgoCdHelm {
                        images: vec![ArgoCdHelmImageUpdate::default()],
                        ..Default::default()
                    }),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        };
        let image = &tree.argocd_app_updates[0].source_updates[0]
            .helm
            .as_ref()
            .unwrap()
            .images[0];

        assert_eq!(resolve_origin(&tree, image), Some(Origin::warehouse("app")));
    }

    #[test]
    fn test_sibling_contents_do_not_matter() {
        let mut tree = kustomize_tree(Some(Origin::warehouse("o")));
        tree.git_repo_updates.push(GitRepoUpdate {
            origin: Some(Origin::warehouse("sibling")),
            kustomize: Some(KustomizePromotionMechanism::default()),
            ..Default::default()
        });
        let image = &tree.git_repo_updates[0].kustomize.as_ref().unwrap().images[0];

        assert_eq!(resolve_origin(&tree, image), Some(Origin::warehouse("o")));
    }

    #[test]
    fn test_structurally_equal_node_outside_tree_is_unreachable() {
        let tree = kustomize_tree(Some(Origin::warehouse("o")));
        let lookalike = KustomizeImageUpdate::default();

        let err = try_resolve_origin(&tree, &lookalike).unwrap_err();
        assert_eq!(err.target_kind, "KustomizeImageUpdate");
    }

    #[test]
    #[should_panic(expected = "not reachable")]
    fn test_unreachable_target_panics() {
        let tree = kustomize_tree(None);
        let lookalike = KustomizeImageUpdate::default();
        let _ = resolve_origin(&tree, &lookalike);
    }
}

//! Stages: what Freight they request and how they promote it.

use super::{FreightReference, FreightRequest, Origin};
use crate::mechanisms::{self, MechanismNode, PromotionMechanisms};
use serde::{Deserialize, Serialize};

/// Desired state of a Stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageSpec {
    /// Origins the Stage requests Freight from. Order carries no meaning.
    #[serde(default)]
    pub requested_freight: Vec<FreightRequest>,
    /// How Freight is promoted into the Stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promotion_mechanisms: Option<PromotionMechanisms>,
}

/// Observed state of a Stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageStatus {
    /// Freight currently available to the Stage.
    #[serde(default)]
    pub freight: Vec<FreightReference>,
}

/// A deployment stage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    /// Namespace the Stage lives in; Warehouses are looked up here too.
    pub namespace: String,
    /// Name of the Stage.
    pub name: String,
    /// Desired state.
    #[serde(default)]
    pub spec: StageSpec,
    /// Observed state.
    #[serde(default)]
    pub status: StageStatus,
}

impl Stage {
    /// Creates an empty Stage.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Returns the effective origin of a node in this Stage's mechanism tree.
    ///
    /// Returns `None` when nothing on the path to `target` pins an origin.
    ///
    /// # Panics
    ///
    /// Panics if `target` does not belong to this Stage's mechanism tree,
    /// including when the Stage has no mechanisms at all.
    pub fn desired_origin<'b>(&self, target: impl Into<MechanismNode<'b>>) -> Option<Origin> {
        let target = target.into();
        match &self.spec.promotion_mechanisms {
            Some(root) => mechanisms::resolve_origin(root, target),
            None => panic!(
                "{} is not reachable from Stage {}/{}: it has no promotion mechanisms",
                target.kind(),
                self.namespace,
                self.name
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanisms::{GitRepoUpdate, RenderImageUpdate, RenderPromotionMechanism};

    #[test]
    fn test_desired_origin_through_stage() {
        let mut stage = Stage::new("kargo-demo", "test");
        stage.spec.promotion_mechanisms = Some(PromotionMechanisms {
            git_repo_updates: vec![GitRepoUpdate {
                origin: Some(Origin::warehouse("w")),
                render: Some(RenderPromotionMechanism {
                    images: vec![RenderImageUpdate::default()],
                    ..Default::default()
                }),
                ..Default::default()
            }],
            ..Default::default()
        });

        let mechanisms = stage.spec.promotion_mechanisms.as_ref().unwrap();
        let image = &mechanisms.git_repo_updates[0].render.as_ref().unwrap().images[0];
        assert_eq!(stage.desired_origin(image), Some(Origin::warehouse("w")));
    }

    #[test]
    #[should_panic(expected = "has no promotion mechanisms")]
    fn test_desired_origin_without_mechanisms_panics() {
        let stage = Stage::new("kargo-demo", "test");
        let stray = RenderImageUpdate::default();
        let _ = stage.desired_origin(&stray);
    }

    #[test]
    fn test_stage_deserializes() {
        let stage: Stage = serde_json::from_value(serde_json::json!({
            "namespace": "kargo-demo",
            "name": "test",
            "spec": {
                "requestedFreight": [{
                    "origin": {"kind": "Warehouse", "name": "w"},
                    "sources": {"direct": true}
                }]
            }
        }))
        .unwrap();

        assert_eq!(stage.spec.requested_freight[0].origin, Origin::warehouse("w"));
        assert!(stage.status.freight.is_empty());
    }
}

//! Finding the artifact a Stage should promote.

use super::artifact::{ArtifactKind, Locatable};
use super::getter::WarehouseGetter;
use crate::core::{Chart, FreightReference, FreightRequest, GitCommit, Image, Origin, Stage};
use crate::errors::LocatorError;
use tracing::debug;

/// Locates commits, images and charts in the Freight available to a Stage.
///
/// When the caller does not say which origin an artifact should come from,
/// the locator infers it from the Warehouses the Stage requests Freight
/// from. Inference is the only step that reads Warehouses.
#[derive(Clone, Copy)]
pub struct ArtifactLocator<'a> {
    getter: &'a dyn WarehouseGetter,
    namespace: &'a str,
    freight_requests: &'a [FreightRequest],
    freight: &'a [FreightReference],
}

impl std::fmt::Debug for ArtifactLocator<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtifactLocator")
            .field("namespace", &self.namespace)
            .field("freight_requests", &self.freight_requests.len())
            .field("freight", &self.freight.len())
            .finish_non_exhaustive()
    }
}

impl<'a> ArtifactLocator<'a> {
    /// Creates a locator over explicit inputs.
    #[must_use]
    pub fn new(
        getter: &'a dyn WarehouseGetter,
        namespace: &'a str,
        freight_requests: &'a [FreightRequest],
        freight: &'a [FreightReference],
    ) -> Self {
        Self {
            getter,
            namespace,
            freight_requests,
            freight,
        }
    }

    /// Creates a locator over a Stage's requested and available Freight.
    #[must_use]
    pub fn for_stage(getter: &'a dyn WarehouseGetter, stage: &'a Stage) -> Self {
        Self::new(
            getter,
            &stage.namespace,
            &stage.spec.requested_freight,
            &stage.status.freight,
        )
    }

    /// Returns the namespace Warehouses are read from.
    #[must_use]
    pub fn namespace(&self) -> &'a str {
        self.namespace
    }

    /// Finds the commit from `repo_url`.
    pub async fn find_commit(
        &self,
        desired_origin: Option<&Origin>,
        repo_url: &str,
    ) -> Result<Option<GitCommit>, LocatorError> {
        self.find(desired_origin, repo_url, None).await
    }

    /// Finds the image from `repo_url`.
    pub async fn find_image(
        &self,
        desired_origin: Option<&Origin>,
        repo_url: &str,
    ) -> Result<Option<Image>, LocatorError> {
        self.find(desired_origin, repo_url, None).await
    }

    /// Finds the chart `chart_name` from `repo_url`.
    ///
    /// Pass `None` for charts addressed by repository alone, such as OCI
    /// charts.
    pub async fn find_chart(
        &self,
        desired_origin: Option<&Origin>,
        repo_url: &str,
        chart_name: Option<&str>,
    ) -> Result<Option<Chart>, LocatorError> {
        self.find(desired_origin, repo_url, chart_name).await
    }

    /// Finds an artifact of type `T`.
    ///
    /// With an explicit `desired_origin` this is a pure filter over the
    /// Stage's Freight. Without one, the origin is inferred first; if no
    /// requested Warehouse subscribes to the repository the result is
    /// `Ok(None)`.
    pub async fn find<T: Locatable>(
        &self,
        desired_origin: Option<&Origin>,
        repo_url: &str,
        chart_name: Option<&str>,
    ) -> Result<Option<T>, LocatorError> {
        let inferred;
        let origin = match desired_origin {
            Some(origin) => origin,
            None => match self.infer_origin(T::KIND, repo_url, chart_name).await? {
                Some(origin) => {
                    inferred = origin;
                    &inferred
                }
                None => return Ok(None),
            },
        };

        Ok(self
            .freight
            .iter()
            .filter(|freight| freight.origin == *origin)
            .flat_map(T::carried_by)
            .find(|artifact| artifact.matches(repo_url, chart_name))
            .cloned())
    }

    /// Infers which requested origin can provide the artifact.
    ///
    /// Returns `Ok(None)` when no requested Warehouse subscribes to it and
    /// [`LocatorError::Ambiguous`] when more than one distinct origin does.
    pub async fn infer_origin(
        &self,
        kind: ArtifactKind,
        repo_url: &str,
        chart_name: Option<&str>,
    ) -> Result<Option<Origin>, LocatorError> {
        let mut candidates: Vec<&Origin> = Vec::new();

        for request in self.freight_requests {
            let name = &request.origin.name;
            let warehouse = self
                .getter
                .get_warehouse(self.namespace, name)
                .await
                .map_err(|err| LocatorError::upstream(self.namespace, name, err))?
                .ok_or_else(|| LocatorError::warehouse_not_found(self.namespace, name))?;

            let subscribed = warehouse
                .subscriptions
                .iter()
                .any(|sub| kind.subscribed_by(sub, repo_url, chart_name));
            if subscribed && !candidates.contains(&&request.origin) {
                candidates.push(&request.origin);
            }
        }

        match candidates.as_slice() {
            [] => {
                debug!(
                    namespace = self.namespace,
                    repo_url,
                    %kind,
                    "No requested Warehouse subscribes to repository"
                );
                Ok(None)
            }
            [origin] => {
                debug!(
                    namespace = self.namespace,
                    repo_url,
                    %kind,
                    origin = %origin,
                    "Inferred origin"
                );
                Ok(Some((*origin).clone()))
            }
            _ => Err(LocatorError::ambiguous(kind, repo_url, chart_name)),
        }
    }
}

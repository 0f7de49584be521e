//! Artifact kinds and how each is matched.

use super::url::git_urls_match;
use crate::core::{Chart, FreightReference, GitCommit, Image, RepoSubscription};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kinds of artifact Freight can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// A git commit.
    Commit,
    /// A container image.
    Image,
    /// A Helm chart.
    Chart,
}

impl ArtifactKind {
    /// Describes a requested artifact for use in messages.
    #[must_use]
    pub fn describe(&self, repo_url: &str, chart_name: Option<&str>) -> String {
        match (self, chart_name) {
            (Self::Commit, _) => format!("a commit from repo {repo_url}"),
            (Self::Image, _) => format!("an image from repo {repo_url}"),
            (Self::Chart, Some(name)) if !name.is_empty() => {
                format!("chart {name} from repo {repo_url}")
            }
            (Self::Chart, _) => format!("a chart from repo {repo_url}"),
        }
    }

    /// Returns true if two repository URLs identify the same repository.
    ///
    /// Git URLs are compared in canonical form; image and chart URLs must
    /// match exactly.
    #[must_use]
    pub fn repo_urls_match(&self, a: &str, b: &str) -> bool {
        match self {
            Self::Commit => git_urls_match(a, b),
            Self::Image | Self::Chart => a == b,
        }
    }

    /// Returns true if `subscription` would produce the requested artifact.
    ///
    /// A missing chart name matches only subscriptions with an empty name,
    /// as used by OCI chart repositories.
    #[must_use]
    pub fn subscribed_by(
        &self,
        subscription: &RepoSubscription,
        repo_url: &str,
        chart_name: Option<&str>,
    ) -> bool {
        match (self, subscription) {
            (Self::Commit, RepoSubscription::Git(sub)) => self.repo_urls_match(&sub.repo_url, repo_url),
            (Self::Image, RepoSubscription::Image(sub)) => sub.repo_url == repo_url,
            (Self::Chart, RepoSubscription::Chart(sub)) => {
                sub.repo_url == repo_url && sub.name == chart_name.unwrap_or_default()
            }
            _ => false,
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Commit => "commit",
            Self::Image => "image",
            Self::Chart => "chart",
        })
    }
}

/// An artifact type that can be located within Freight.
pub trait Locatable: Clone + Send + Sync {
    /// The kind of this artifact.
    const KIND: ArtifactKind;

    /// Returns the artifacts of this kind carried by `freight`.
    fn carried_by(freight: &FreightReference) -> &[Self];

    /// Returns the artifact's repository URL.
    fn repo_url(&self) -> &str;

    /// Returns the chart name, for kinds that have one.
    fn chart_name(&self) -> Option<&str> {
        None
    }

    /// Returns true if this artifact is the one requested.
    fn matches(&self, repo_url: &str, chart_name: Option<&str>) -> bool {
        if !Self::KIND.repo_urls_match(self.repo_url(), repo_url) {
            return false;
        }
        match Self::KIND {
            ArtifactKind::Chart => self.chart_name() == Some(chart_name.unwrap_or_default()),
            ArtifactKind::Commit | ArtifactKind::Image => true,
        }
    }
}

impl Locatable for GitCommit {
    const KIND: ArtifactKind = ArtifactKind::Commit;

    fn carried_by(freight: &FreightReference) -> &[Self] {
        &freight.commits
    }

    fn repo_url(&self) -> &str {
        &self.repo_url
    }
}

impl Locatable for Image {
    const KIND: ArtifactKind = ArtifactKind::Image;

    fn carried_by(freight: &FreightReference) -> &[Self] {
        &freight.images
    }

    fn repo_url(&self) -> &str {
        &self.repo_url
    }
}

impl Locatable for Chart {
    const KIND: ArtifactKind = ArtifactKind::Chart;

    fn carried_by(freight: &FreightReference) -> &[Self] {
        &freight.charts
    }

    fn repo_url(&self) -> &str {
        &self.repo_url
    }

    fn chart_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_subscription_matches_canonically() {
        let sub = RepoSubscription::git("https://github.com/Example/Repo.git");
        assert!(ArtifactKind::Commit.subscribed_by(&sub, "https://github.com/example/repo", None));
        assert!(!ArtifactKind::Image.subscribed_by(&sub, "https://github.com/example/repo", None));
    }

    #[test]
    fn test_image_subscription_matches_exactly() {
        let sub = RepoSubscription::image("docker.io/library/nginx");
        assert!(ArtifactKind::Image.subscribed_by(&sub, "docker.io/library/nginx", None));
        assert!(!ArtifactKind::Image.subscribed_by(&sub, "docker.io/library/NGINX", None));
    }

    #[test]
    fn test_chart_subscription_requires_name() {
        let sub = RepoSubscription::chart("https://charts.example.com", "podinfo");
        assert!(ArtifactKind::Chart.subscribed_by(&sub, "https://charts.example.com", Some("podinfo")));
        assert!(!ArtifactKind::Chart.subscribed_by(&sub, "https://charts.example.com", Some("other")));
        assert!(!ArtifactKind::Chart.subscribed_by(&sub, "https://charts.example.com", None));

        let oci = RepoSubscription::chart("oci://ghcr.io/example/podinfo", "");
        assert!(ArtifactKind::Chart.subscribed_by(&oci, "oci://ghcr.io/example/podinfo", None));
    }

    #[test]
    fn test_chart_artifact_matching() {
        let chart = Chart::new("fake-repo-url", "fake-chart", "1.0.0");
        assert!(chart.matches("fake-repo-url", Some("fake-chart")));
        assert!(!chart.matches("fake-repo-url", Some("another-chart")));
    }

    #[test]
    fn test_describe() {
        assert_eq!(
            ArtifactKind::Chart.describe("oci://charts", Some("podinfo")),
            "chart podinfo from repo oci://charts"
        );
        assert_eq!(ArtifactKind::Image.describe("nginx", None), "an image from repo nginx");
    }
}

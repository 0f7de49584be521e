//! Warehouses and the repositories they subscribe to.

use serde::{Deserialize, Serialize};

/// Subscription to a git repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitSubscription {
    /// URL of the repository.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    /// Branch to follow, if not the default branch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
}

/// Subscription to a container image repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSubscription {
    /// URL of the image repository.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
}

/// Subscription to a Helm chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSubscription {
    /// URL of the chart repository.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    /// Name of the chart within the repository.
    pub name: String,
}

/// A single subscription held by a Warehouse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepoSubscription {
    /// A git repository.
    Git(GitSubscription),
    /// A container image repository.
    Image(ImageSubscription),
    /// A Helm chart.
    Chart(ChartSubscription),
}

impl RepoSubscription {
    /// Creates a git subscription.
    #[must_use]
    pub fn git(repo_url: impl Into<String>) -> Self {
        Self::Git(GitSubscription {
            repo_url: repo_url.into(),
            branch: None,
        })
    }

    /// Creates an image subscription.
    #[must_use]
    pub fn image(repo_url: impl Into<String>) -> Self {
        Self::Image(ImageSubscription {
            repo_url: repo_url.into(),
        })
    }

    /// Creates a chart subscription.
    #[must_use]
    pub fn chart(repo_url: impl Into<String>, name: impl Into<String>) -> Self {
        Self::Chart(ChartSubscription {
            repo_url: repo_url.into(),
            name: name.into(),
        })
    }

    /// Returns the subscribed repository URL.
    #[must_use]
    pub fn repo_url(&self) -> &str {
        match self {
            Self::Git(sub) => &sub.repo_url,
            Self::Image(sub) => &sub.repo_url,
            Self::Chart(sub) => &sub.repo_url,
        }
    }
}

/// A namespaced object declaring which upstream repositories it watches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    /// Namespace the Warehouse lives in.
    pub namespace: String,
    /// Name of the Warehouse.
    pub name: String,
    /// Ordered subscriptions.
    #[serde(default)]
    pub subscriptions: Vec<RepoSubscription>,
}

impl Warehouse {
    /// Creates a Warehouse with no subscriptions.
    #[must_use]
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
            subscriptions: Vec::new(),
        }
    }

    /// Adds a subscription.
    #[must_use]
    pub fn with_subscription(mut self, subscription: RepoSubscription) -> Self {
        self.subscriptions.push(subscription);
        self
    }
}

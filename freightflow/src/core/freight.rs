//! Freight references and the artifacts they carry.

use super::Origin;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A specific commit in a git repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GitCommit {
    /// URL of the repository.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    /// Commit ID (SHA).
    pub id: String,
    /// Branch the commit was observed on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Tag pointing at the commit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
    /// First line of the commit message.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Commit author.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

impl GitCommit {
    /// Creates a commit reference.
    #[must_use]
    pub fn new(repo_url: impl Into<String>, id: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            id: id.into(),
            branch: None,
            tag: None,
            message: None,
            author: None,
        }
    }

    /// Sets the tag.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Sets the branch.
    #[must_use]
    pub fn with_branch(mut self, branch: impl Into<String>) -> Self {
        self.branch = Some(branch.into());
        self
    }
}

/// A specific container image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// URL of the image repository.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    /// Image tag.
    pub tag: String,
    /// Image digest.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub digest: Option<String>,
}

impl Image {
    /// Creates an image reference.
    #[must_use]
    pub fn new(repo_url: impl Into<String>, tag: impl Into<String>) -> Self {
        Self {
            repo_url: repo_url.into(),
            tag: tag.into(),
            digest: None,
        }
    }

    /// Sets the digest.
    #[must_use]
    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }
}

/// A specific Helm chart version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chart {
    /// URL of the chart repository.
    #[serde(rename = "repoURL")]
    pub repo_url: String,
    /// Chart name.
    pub name: String,
    /// Chart version.
    pub version: String,
}

impl Chart {
    /// Creates a chart reference.
    #[must_use]
    pub fn new(
        repo_url: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            repo_url: repo_url.into(),
            name: name.into(),
            version: version.into(),
        }
    }
}

/// A bundle of artifacts produced by one origin.
///
/// Holds at most one commit per repository, one image per repository, and
/// one chart per repository and chart name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightReference {
    /// Name of the Freight this references.
    #[serde(default)]
    pub name: String,
    /// The origin that produced the Freight.
    pub origin: Origin,
    /// Git commits.
    #[serde(default)]
    pub commits: Vec<GitCommit>,
    /// Container images.
    #[serde(default)]
    pub images: Vec<Image>,
    /// Helm charts.
    #[serde(default)]
    pub charts: Vec<Chart>,
}

impl FreightReference {
    /// Creates an empty reference for the given origin.
    #[must_use]
    pub fn new(origin: Origin) -> Self {
        Self {
            name: String::new(),
            origin,
            commits: Vec::new(),
            images: Vec::new(),
            charts: Vec::new(),
        }
    }

    /// Sets the Freight name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Adds a commit.
    #[must_use]
    pub fn with_commit(mut self, commit: GitCommit) -> Self {
        self.commits.push(commit);
        self
    }

    /// Adds an image.
    #[must_use]
    pub fn with_image(mut self, image: Image) -> Self {
        self.images.push(image);
        self
    }

    /// Adds a chart.
    #[must_use]
    pub fn with_chart(mut self, chart: Chart) -> Self {
        self.charts.push(chart);
        self
    }

    /// Returns a content digest of the artifacts, independent of their order.
    ///
    /// Two references carrying the same artifacts from the same origin
    /// always produce the same fingerprint.
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(
            self.commits.len() + self.images.len() + self.charts.len(),
        );
        parts.extend(
            self.commits
                .iter()
                .map(|c| format!("{}:{}", c.repo_url, c.id)),
        );
        parts.extend(self.images.iter().map(|i| match &i.digest {
            Some(digest) => format!("{}@{}", i.repo_url, digest),
            None => format!("{}:{}", i.repo_url, i.tag),
        }));
        parts.extend(
            self.charts
                .iter()
                .map(|c| format!("{}/{}:{}", c.repo_url, c.name, c.version)),
        );
        parts.sort();

        let mut hasher = Sha256::new();
        hasher.update(self.origin.to_string().as_bytes());
        for part in &parts {
            hasher.update(b"|");
            hasher.update(part.as_bytes());
        }
        hex::encode(hasher.finalize())
    }
}

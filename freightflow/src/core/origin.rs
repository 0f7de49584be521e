//! Freight origins and the requests a Stage makes against them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of object that produces Freight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum OriginKind {
    /// Freight discovered by a Warehouse.
    #[default]
    Warehouse,
}

impl OriginKind {
    /// Returns the kind as it appears in API objects.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Warehouse => "Warehouse",
        }
    }
}

impl fmt::Display for OriginKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of the producer of a piece of Freight.
///
/// Two origins are the same origin when both kind and name match. Origins
/// are always compared by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    /// The kind of producer.
    pub kind: OriginKind,
    /// The producer's name within the Stage's namespace.
    pub name: String,
}

impl Origin {
    /// Creates a Warehouse origin.
    #[must_use]
    pub fn warehouse(name: impl Into<String>) -> Self {
        Self {
            kind: OriginKind::Warehouse,
            name: name.into(),
        }
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.kind, self.name)
    }
}

/// Where a Stage is willing to accept Freight from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FreightSources {
    /// Freight may come straight from the origin.
    #[serde(default)]
    pub direct: bool,
    /// Upstream Stages the Freight may be verified in first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub stages: Vec<String>,
}

/// A Stage's declaration that it wants Freight from an origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreightRequest {
    /// The origin Freight is requested from.
    pub origin: Origin,
    /// Accepted sources for that Freight.
    #[serde(default)]
    pub sources: FreightSources,
}

impl FreightRequest {
    /// Creates a request accepting Freight directly from the origin.
    #[must_use]
    pub fn direct(origin: Origin) -> Self {
        Self {
            origin,
            sources: FreightSources {
                direct: true,
                stages: Vec::new(),
            },
        }
    }

    /// Adds an upstream Stage as an accepted source.
    #[must_use]
    pub fn with_upstream_stage(mut self, stage: impl Into<String>) -> Self {
        self.sources.stages.push(stage.into());
        self
    }
}

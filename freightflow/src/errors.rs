//! Error types for freightflow.
//!
//! Resolution either succeeds with a result (possibly "nothing found"), or
//! fails with one of the errors below. Not finding an artifact is never an
//! error.

use crate::locator::ArtifactKind;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// The crate-level error type.
#[derive(Debug, Error)]
pub enum FreightflowError {
    /// Artifact lookup failed.
    #[error("{0}")]
    Locator(#[from] LocatorError),

    /// An expression function was called incorrectly or its lookup failed.
    #[error("{0}")]
    Expression(#[from] ExpressionError),

    /// A mechanism node was resolved against a tree it does not belong to.
    #[error("{0}")]
    UnreachableNode(#[from] UnreachableNodeError),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Diagnostic details attached to an error.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ErrorInfo {
    /// Stable error code (e.g., "FREIGHT-002-AMBIGUOUS").
    pub code: String,
    /// Short summary of the error.
    pub summary: String,
    /// Hint for fixing the error.
    pub fix_hint: Option<String>,
    /// Additional context key-value pairs.
    #[serde(default)]
    pub context: HashMap<String, String>,
}

impl ErrorInfo {
    /// Creates new error info.
    #[must_use]
    pub fn new(code: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            summary: summary.into(),
            fix_hint: None,
            context: HashMap::new(),
        }
    }

    /// Sets the fix hint.
    #[must_use]
    pub fn with_fix_hint(mut self, hint: impl Into<String>) -> Self {
        self.fix_hint = Some(hint.into());
        self
    }

    /// Adds a single context entry.
    #[must_use]
    pub fn with_context_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Converts to a dictionary representation.
    #[must_use]
    pub fn to_dict(&self) -> HashMap<String, serde_json::Value> {
        let mut map = HashMap::new();
        map.insert("code".to_string(), serde_json::json!(self.code));
        map.insert("summary".to_string(), serde_json::json!(self.summary));
        if let Some(ref hint) = self.fix_hint {
            map.insert("fix_hint".to_string(), serde_json::json!(hint));
        }
        if !self.context.is_empty() {
            map.insert("context".to_string(), serde_json::json!(self.context));
        }
        map
    }
}

/// Errors from artifact lookup.
#[derive(Debug, Error)]
pub enum LocatorError {
    /// A Warehouse named in a Freight request does not exist.
    #[error("Warehouse {name} not found in namespace {namespace}")]
    WarehouseNotFound {
        /// Namespace searched.
        namespace: String,
        /// Warehouse name.
        name: String,
    },

    /// More than one requested origin could supply the artifact.
    #[error(
        "multiple requested Freight could potentially provide {}; please provide an origin to disambiguate",
        .kind.describe(.repo_url, .chart_name.as_deref())
    )]
    Ambiguous {
        /// Kind of artifact requested.
        kind: ArtifactKind,
        /// Repository requested.
        repo_url: String,
        /// Chart name requested, for charts.
        chart_name: Option<String>,
    },

    /// Reading a Warehouse failed.
    #[error("error getting Warehouse {name} in namespace {namespace}: {source}")]
    Upstream {
        /// Namespace of the Warehouse.
        namespace: String,
        /// Warehouse name.
        name: String,
        /// The underlying failure.
        #[source]
        source: anyhow::Error,
    },
}

impl LocatorError {
    /// Creates a Warehouse not found error.
    #[must_use]
    pub fn warehouse_not_found(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::WarehouseNotFound {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Creates an ambiguity error.
    #[must_use]
    pub fn ambiguous(
        kind: ArtifactKind,
        repo_url: impl Into<String>,
        chart_name: Option<&str>,
    ) -> Self {
        Self::Ambiguous {
            kind,
            repo_url: repo_url.into(),
            chart_name: chart_name.map(str::to_string),
        }
    }

    /// Creates an upstream read error.
    #[must_use]
    pub fn upstream(
        namespace: impl Into<String>,
        name: impl Into<String>,
        source: anyhow::Error,
    ) -> Self {
        Self::Upstream {
            namespace: namespace.into(),
            name: name.into(),
            source,
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::WarehouseNotFound { .. } => "FREIGHT-001-WAREHOUSE_NOT_FOUND",
            Self::Ambiguous { .. } => "FREIGHT-002-AMBIGUOUS",
            Self::Upstream { .. } => "FREIGHT-003-UPSTREAM",
        }
    }

    /// Returns true if retrying the same call may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }

    /// Builds diagnostic details for this error.
    #[must_use]
    pub fn error_info(&self) -> ErrorInfo {
        let info = ErrorInfo::new(self.code(), self.to_string());
        match self {
            Self::WarehouseNotFound { namespace, name } => info
                .with_fix_hint("Create the Warehouse or remove it from the Stage's requested Freight.")
                .with_context_entry("namespace", namespace)
                .with_context_entry("warehouse", name),
            Self::Ambiguous {
                repo_url,
                chart_name,
                ..
            } => {
                let info = info
                    .with_fix_hint("Pin an explicit origin on the promotion mechanism or pass one to the lookup.")
                    .with_context_entry("repo_url", repo_url);
                match chart_name {
                    Some(chart) => info.with_context_entry("chart", chart),
                    None => info,
                }
            }
            Self::Upstream { namespace, name, .. } => info
                .with_context_entry("namespace", namespace)
                .with_context_entry("warehouse", name),
        }
    }
}

/// Raised when a mechanism node is not part of the tree it was resolved in.
#[derive(Debug, Clone, Error)]
#[error("{target_kind} is not reachable from {root_kind}; the target must be a node of the same mechanism tree")]
pub struct UnreachableNodeError {
    /// Kind of the tree root.
    pub root_kind: &'static str,
    /// Kind of the target node.
    pub target_kind: &'static str,
}

impl UnreachableNodeError {
    /// Creates a new unreachable node error.
    #[must_use]
    pub fn new(root_kind: &'static str, target_kind: &'static str) -> Self {
        Self {
            root_kind,
            target_kind,
        }
    }
}

/// Errors from expression functions.
#[derive(Debug, Error)]
pub enum ExpressionError {
    /// Wrong number of arguments.
    #[error("{function}: expected {expected} argument(s), got {got}")]
    Arity {
        /// Function name.
        function: String,
        /// Accepted argument counts.
        expected: String,
        /// Arguments supplied.
        got: usize,
    },

    /// An argument had the wrong type.
    #[error("{function}: argument {position} must be {expected}, got {got}")]
    ArgumentType {
        /// Function name.
        function: String,
        /// One-based argument position.
        position: usize,
        /// Expected type.
        expected: String,
        /// Type supplied.
        got: String,
    },

    /// No function with this name exists.
    #[error("unknown function: {0}")]
    UnknownFunction(String),

    /// The underlying lookup failed.
    #[error("{0}")]
    Locator(#[from] LocatorError),

    /// A function result could not be converted to JSON.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExpressionError {
    /// Creates an arity error.
    #[must_use]
    pub fn arity(function: impl Into<String>, expected: impl Into<String>, got: usize) -> Self {
        Self::Arity {
            function: function.into(),
            expected: expected.into(),
            got,
        }
    }

    /// Creates an argument type error.
    #[must_use]
    pub fn argument_type(
        function: impl Into<String>,
        position: usize,
        expected: impl Into<String>,
        got: impl Into<String>,
    ) -> Self {
        Self::ArgumentType {
            function: function.into(),
            position,
            expected: expected.into(),
            got: got.into(),
        }
    }

    /// Returns the stable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Arity { .. } => "EXPR-001-ARITY",
            Self::ArgumentType { .. } => "EXPR-002-ARGUMENT_TYPE",
            Self::UnknownFunction(_) => "EXPR-003-UNKNOWN_FUNCTION",
            Self::Serialization(_) => "EXPR-004-SERIALIZATION",
            Self::Locator(err) => err.code(),
        }
    }
}

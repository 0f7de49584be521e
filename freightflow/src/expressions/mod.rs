//! Functions exposed to user-authored promotion expressions.
//!
//! Arguments arrive as JSON values. Each function checks its arguments
//! before doing any lookup, so a malformed call never reads a Warehouse.
//!
//! | Function | Arguments |
//! |---|---|
//! | `warehouse` | `name` |
//! | `commitFrom` | `repoURL`, `origin?` |
//! | `imageFrom` | `repoURL`, `origin?` |
//! | `chartFrom` | `repoURL`, `chartName?`, `origin?` |

mod args;

use crate::core::{Chart, GitCommit, Image, Origin};
use crate::errors::ExpressionError;
use crate::locator::ArtifactLocator;
use args::{expect_arity, origin_arg, string_arg, type_name};
use serde_json::Value;

/// Name of the `warehouse` function.
pub const WAREHOUSE: &str = "warehouse";
/// Name of the `commitFrom` function.
pub const COMMIT_FROM: &str = "commitFrom";
/// Name of the `imageFrom` function.
pub const IMAGE_FROM: &str = "imageFrom";
/// Name of the `chartFrom` function.
pub const CHART_FROM: &str = "chartFrom";

/// Builds an [`Origin`] naming a Warehouse.
pub fn warehouse(args: &[Value]) -> Result<Origin, ExpressionError> {
    expect_arity(WAREHOUSE, args, 1..=1)?;
    let name = string_arg(WAREHOUSE, args, 0)?;
    if name.is_empty() {
        return Err(ExpressionError::argument_type(
            WAREHOUSE,
            1,
            "a non-empty string",
            "an empty string",
        ));
    }
    Ok(Origin::warehouse(name))
}

/// Evaluates artifact functions against a Stage's Freight.
#[derive(Debug, Clone, Copy)]
pub struct ExpressionEnv<'a> {
    locator: ArtifactLocator<'a>,
}

impl<'a> ExpressionEnv<'a> {
    /// Creates an environment backed by `locator`.
    #[must_use]
    pub fn new(locator: ArtifactLocator<'a>) -> Self {
        Self { locator }
    }

    /// `commitFrom(repoURL, origin?)`
    pub async fn commit_from(&self, args: &[Value]) -> Result<Option<GitCommit>, ExpressionError> {
        expect_arity(COMMIT_FROM, args, 1..=2)?;
        let repo_url = string_arg(COMMIT_FROM, args, 0)?;
        let origin = args
            .get(1)
            .map(|_| origin_arg(COMMIT_FROM, args, 1))
            .transpose()?;
        Ok(self.locator.find_commit(origin.as_ref(), repo_url).await?)
    }

    /// `imageFrom(repoURL, origin?)`
    pub async fn image_from(&self, args: &[Value]) -> Result<Option<Image>, ExpressionError> {
        expect_arity(IMAGE_FROM, args, 1..=2)?;
        let repo_url = string_arg(IMAGE_FROM, args, 0)?;
        let origin = args
            .get(1)
            .map(|_| origin_arg(IMAGE_FROM, args, 1))
            .transpose()?;
        Ok(self.locator.find_image(origin.as_ref(), repo_url).await?)
    }

    /// `chartFrom(repoURL, chartName?, origin?)`
    ///
    /// With two arguments, the second is a chart name if it is a string and
    /// an origin if it is an object.
    pub async fn chart_from(&self, args: &[Value]) -> Result<Option<Chart>, ExpressionError> {
        expect_arity(CHART_FROM, args, 1..=3)?;
        let repo_url = string_arg(CHART_FROM, args, 0)?;
        let (chart_name, origin) = match args.get(1) {
            None => (None, None),
            Some(Value::String(name)) => {
                let origin = args
                    .get(2)
                    .map(|_| origin_arg(CHART_FROM, args, 2))
                    .transpose()?;
                (Some(name.as_str()), origin)
            }
            Some(Value::Object(_)) if args.len() == 2 => {
                (None, Some(origin_arg(CHART_FROM, args, 1)?))
            }
            Some(other) => {
                let expected = if args.len() == 2 {
                    "a string or an origin"
                } else {
                    "a string"
                };
                return Err(ExpressionError::argument_type(
                    CHART_FROM,
                    2,
                    expected,
                    type_name(other),
                ));
            }
        };
        Ok(self
            .locator
            .find_chart(origin.as_ref(), repo_url, chart_name)
            .await?)
    }

    /// Calls the named function, returning its result as JSON.
    ///
    /// A lookup that finds nothing yields `null`. A result that cannot be
    /// converted to JSON is reported as [`ExpressionError::Serialization`].
    pub async fn call(&self, function: &str, args: &[Value]) -> Result<Value, ExpressionError> {
        let value = match function {
            WAREHOUSE => serde_json::to_value(warehouse(args)?),
            COMMIT_FROM => serde_json::to_value(self.commit_from(args).await?),
            IMAGE_FROM => serde_json::to_value(self.image_from(args).await?),
            CHART_FROM => serde_json::to_value(self.chart_from(args).await?),
            other => return Err(ExpressionError::UnknownFunction(other.to_string())),
        };
        Ok(value?)
    }
}

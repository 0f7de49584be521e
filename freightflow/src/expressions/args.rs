//! Argument checking for expression functions.

use crate::core::Origin;
use crate::errors::ExpressionError;
use serde_json::Value;
use std::ops::RangeInclusive;

pub(super) fn expect_arity(
    function: &str,
    args: &[Value],
    accepted: RangeInclusive<usize>,
) -> Result<(), ExpressionError> {
    if accepted.contains(&args.len()) {
        return Ok(());
    }
    let expected = if accepted.start() == accepted.end() {
        accepted.start().to_string()
    } else {
        format!("{} to {}", accepted.start(), accepted.end())
    };
    Err(ExpressionError::arity(function, expected, args.len()))
}

/// Returns argument `index` as a string. Callers check arity first.
pub(super) fn string_arg<'v>(
    function: &str,
    args: &'v [Value],
    index: usize,
) -> Result<&'v str, ExpressionError> {
    match args.get(index) {
        Some(Value::String(s)) => Ok(s.as_str()),
        other => Err(ExpressionError::argument_type(
            function,
            index + 1,
            "a string",
            other.map_or("nothing", type_name),
        )),
    }
}

/// Returns argument `index` as an origin object `{kind, name}`.
pub(super) fn origin_arg(
    function: &str,
    args: &[Value],
    index: usize,
) -> Result<Origin, ExpressionError> {
    let mismatch = |got: &str| {
        ExpressionError::argument_type(function, index + 1, "an origin", got.to_string())
    };
    match args.get(index) {
        Some(value @ Value::Object(_)) => serde_json::from_value(value.clone())
            .map_err(|err| mismatch(&format!("a malformed origin ({err})"))),
        Some(other) => Err(mismatch(type_name(other))),
        None => Err(mismatch("nothing")),
    }
}

pub(super) fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

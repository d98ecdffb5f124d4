//! Locating the JSON document in captured output and reading loosely-typed fields.
//!
//! Field readers follow "absent means default, present-but-mistyped means
//! malformed": a missing `name` is an empty name, a numeric `name` fails the
//! decode.

use crate::error::ReportError;
use serde_json::Value;

/// Slice out the JSON document embedded in surrounding log text.
///
/// Starts at the first `{` that opens a line (or the first `{` anywhere) and
/// ends at the last `}` in the text.
pub fn extract_json(content: &str) -> Option<&str> {
    let start = content
        .find("\n{")
        .map(|pos| pos + 1)
        .or_else(|| content.find('{'))?;
    let end = content.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&content[start..=end])
}

pub(crate) fn str_field<'a>(obj: &'a Value, field: &'static str) -> Result<&'a str, ReportError> {
    match obj.get(field) {
        None => Ok(""),
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(ReportError::WrongType {
            field,
            expected: "string",
        }),
    }
}

pub(crate) fn int_field(obj: &Value, field: &'static str) -> Result<i64, ReportError> {
    match obj.get(field) {
        None => Ok(0),
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f as i64))
            .ok_or(ReportError::WrongType {
                field,
                expected: "number",
            }),
        Some(_) => Err(ReportError::WrongType {
            field,
            expected: "number",
        }),
    }
}

pub(crate) fn bool_field(
    obj: &Value,
    field: &'static str,
    default: bool,
) -> Result<bool, ReportError> {
    match obj.get(field) {
        None => Ok(default),
        Some(Value::Bool(b)) => Ok(*b),
        Some(_) => Err(ReportError::WrongType {
            field,
            expected: "boolean",
        }),
    }
}

/// Nested value, only if it is a JSON object
pub(crate) fn object_field<'a>(obj: &'a Value, field: &str) -> Option<&'a Value> {
    obj.get(field).filter(|v| v.is_object())
}

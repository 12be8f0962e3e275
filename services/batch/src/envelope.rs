use batchctl_core::{Error, Result};
use serde_json::Value;

/// Take the list stored under `field` out of a response envelope.
///
/// A missing or `null` field is an empty list.
pub(crate) fn take_list(mut resp: Value, field: &str) -> Result<Vec<Value>> {
    match resp.get_mut(field).map(Value::take) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items),
        Some(other) => Err(Error::unexpected(format!(
            "expected `{field}` to be a list, got: {other}"
        ))),
    }
}

/// Return the first item of a lookup, or `NotFound` naming what was missing.
pub(crate) fn first_or_not_found(items: Vec<Value>, what: &str) -> Result<Value> {
    items
        .into_iter()
        .next()
        .ok_or_else(|| Error::not_found(format!("{what} not found")))
}

//! Request validation: raw JSON body in, [`ReformulationRequest`] out.

use serde_json::Value;

use crate::{error::ReformulateError, types::ReformulationRequest};

/// Validates the raw request body.
///
/// Accepts any JSON value and requires an object with a `query` field holding
/// a string that is non-empty after trimming. The stored query keeps the
/// original whitespace and casing. Pure; no outbound call happens on failure.
///
/// # Errors
/// [`ReformulateError::Validation`] when the field is absent, not a string,
/// or trims to an empty string.
pub fn validate(raw: &Value) -> Result<ReformulationRequest, ReformulateError> {
    let query = raw
        .get("query")
        .and_then(Value::as_str)
        .ok_or(ReformulateError::Validation("`query` must be a string"))?;

    if query.trim().is_empty() {
        return Err(ReformulateError::Validation("`query` must not be empty"));
    }

    Ok(ReformulationRequest {
        query: query.to_string(),
    })
}

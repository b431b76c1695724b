//! Shape checks applied to create/update bodies before they are trusted as
//! typed [`CarFields`].

use serde_json::{Map, Value};
use validator::Validate;

use crate::constants::REQUIRED_FIELDS;
use crate::error::AppError;
use crate::models::{ApiRequest, CarFields};

/// Parses the request body as a JSON object. An absent body is an empty object.
pub fn parse_body(request: &ApiRequest) -> Result<Map<String, Value>, AppError> {
    let Some(raw) = request.body.as_deref() else {
        return Ok(Map::new());
    };

    match serde_json::from_str::<Value>(raw)? {
        Value::Object(map) => Ok(map),
        other => Err(AppError::Validation(format!(
            "Request body must be a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Required fields that are absent or null, in declaration order.
pub fn missing_fields(body: &Map<String, Value>) -> Vec<&'static str> {
    REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| body.get(*field).map_or(true, Value::is_null))
        .collect()
}

/// Decodes a presence-checked body into typed fields.
pub fn decode_fields(body: Map<String, Value>) -> Result<CarFields, AppError> {
    let fields: CarFields = serde_json::from_value(Value::Object(body))
        .map_err(|e| AppError::Validation(e.to_string()))?;

    if let Err(errors) = fields.validate() {
        let reported: Vec<String> = errors
            .field_errors()
            .keys()
            .map(|field| field.to_string())
            .collect();
        let invalid: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| reported.iter().any(|r| r.as_str() == *field))
            .collect();
        return Err(AppError::Validation(format!(
            "Fields must not be empty: {}",
            invalid.join(", ")
        )));
    }

    Ok(fields)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

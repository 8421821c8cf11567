//! Helpers for schema-flexible documents: typed fields plus free-form extras.

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

use crate::errors::ServiceError;

/// Fields a client sent that have no typed column.
pub type Fields = Map<String, Value>;

/// Keys that only the server may set.
const RESERVED: &[&str] = &["_id", "id"];

/// Drop server-owned keys (plus `extra_keys`) from client supplied fields.
pub fn sanitize(mut fields: Fields, extra_keys: &[&str]) -> Fields {
    for key in RESERVED.iter().chain(extra_keys) {
        fields.remove(*key);
    }
    fields
}

pub fn fields_from_json(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

/// Trimmed email or a validation error.
pub fn require_email(email: &str) -> Result<String, ServiceError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(ServiceError::Validation("email is required".into()));
    }
    if !email.contains('@') {
        return Err(ServiceError::Validation("invalid email".into()));
    }
    Ok(email.to_string())
}

/// `None` for missing or blank values, mirroring how empty query strings are ignored.
pub fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Accept `30`, `30.5` or `"30"`; null and missing become zero. The result is always finite.
pub fn number_or_string<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    let n = match Value::deserialize(de)? {
        Value::Null => return Ok(0.0),
        Value::Number(n) => n.as_f64().ok_or_else(|| D::Error::custom("number out of range"))?,
        Value::String(s) if s.trim().is_empty() => return Ok(0.0),
        Value::String(s) => s.trim().parse::<f64>().map_err(|_| D::Error::custom(format!("not a number: {s}")))?,
        other => return Err(D::Error::custom(format!("expected a number, got {other}"))),
    };
    if !n.is_finite() {
        return Err(D::Error::custom("number must be finite"));
    }
    Ok(n)
}

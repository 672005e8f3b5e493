//! serde_json-backed JSON provider
//!
//! Maps flat JSON objects of scalars onto [`ClaimMap`]. Nested arrays and
//! objects are outside the claim model and are rejected at the parse
//! boundary.

use serde_json::Value;

use crate::claims::{ClaimMap, ClaimValue, HeaderMap};
use crate::error::{Error, ErrorKind, Result};
use crate::provider::JsonProvider;

/// JSON codec over `serde_json`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SerdeJsonProvider;

impl SerdeJsonProvider {
    /// Provider instance; stateless.
    pub fn new() -> Self {
        Self
    }
}

fn value_to_claim(value: &Value) -> Result<ClaimValue> {
    match value {
        Value::Null => Ok(ClaimValue::Null),
        Value::Bool(flag) => Ok(ClaimValue::Bool(*flag)),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                Ok(ClaimValue::Int(int))
            } else if let Some(float) = number.as_f64() {
                Ok(ClaimValue::Float(float))
            } else {
                Err(Error::new(
                    ErrorKind::InvalidJson,
                    format!("number out of range: {number}"),
                ))
            }
        }
        Value::String(text) => Ok(ClaimValue::String(text.clone())),
        Value::Array(_) | Value::Object(_) => Err(Error::new(
            ErrorKind::InvalidJson,
            "nested arrays and objects are not supported",
        )),
    }
}

fn claim_to_value(value: &ClaimValue) -> Result<Value> {
    match value {
        ClaimValue::Null => Ok(Value::Null),
        ClaimValue::Bool(flag) => Ok(Value::Bool(*flag)),
        ClaimValue::Int(int) => Ok(Value::from(*int)),
        ClaimValue::Float(float) => serde_json::Number::from_f64(*float)
            .map(Value::Number)
            .ok_or_else(|| {
                Error::new(
                    ErrorKind::JsonError,
                    "non-finite float cannot be serialized",
                )
            }),
        ClaimValue::String(text) => Ok(Value::from(text.as_str())),
    }
}

fn parse_map(text: &str) -> Result<ClaimMap> {
    let value: Value = serde_json::from_str(text)
        .map_err(|err| Error::new(ErrorKind::InvalidJson, format!("json parse failed: {err}")))?;

    let Value::Object(object) = value else {
        return Err(Error::new(ErrorKind::InvalidJson, "expected a JSON object"));
    };

    object
        .iter()
        .map(|(name, entry)| Ok((name.clone(), value_to_claim(entry)?)))
        .collect()
}

impl JsonProvider for SerdeJsonProvider {
    fn parse_header(&self, text: &str) -> Result<HeaderMap> {
        parse_map(text)
    }

    fn parse_claims(&self, text: &str) -> Result<ClaimMap> {
        parse_map(text)
    }

    fn to_json(&self, values: &ClaimMap) -> Result<String> {
        let mut object = serde_json::Map::with_capacity(values.len());
        for (name, value) in values {
            object.insert(name.clone(), claim_to_value(value)?);
        }
        Ok(Value::Object(object).to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scalar_objects() {
        let provider = SerdeJsonProvider::new();
        let map = provider
            .parse_claims(r#"{"iss":"auth0","exp":100,"ratio":0.5,"ok":true,"gone":null}"#)
            .unwrap();

        assert_eq!(map.get("iss"), Some(&ClaimValue::String("auth0".into())));
        assert_eq!(map.get("exp"), Some(&ClaimValue::Int(100)));
        assert_eq!(map.get("ratio"), Some(&ClaimValue::Float(0.5)));
        assert_eq!(map.get("ok"), Some(&ClaimValue::Bool(true)));
        assert_eq!(map.get("gone"), Some(&ClaimValue::Null));
    }

    #[test]
    fn rejects_non_objects_and_nesting() {
        let provider = SerdeJsonProvider::new();
        assert_eq!(
            provider.parse_claims("[1,2]").unwrap_err().kind,
            ErrorKind::InvalidJson
        );
        assert_eq!(
            provider.parse_claims(r#"{"aud":["a","b"]}"#).unwrap_err().kind,
            ErrorKind::InvalidJson
        );
        assert_eq!(
            provider.parse_claims("not json").unwrap_err().kind,
            ErrorKind::InvalidJson
        );
    }

    #[test]
    fn serializes_back_to_parseable_json() {
        let provider = SerdeJsonProvider::new();
        let mut map = ClaimMap::new();
        map.insert("sub".into(), ClaimValue::from("user-1"));
        map.insert("exp".into(), ClaimValue::Int(42));

        let text = provider.to_json(&map).unwrap();
        let reparsed = provider.parse_claims(&text).unwrap();
        assert_eq!(reparsed, map);
    }

    #[test]
    fn non_finite_floats_are_a_serialization_error() {
        let provider = SerdeJsonProvider::new();
        let mut map = ClaimMap::new();
        map.insert("bad".into(), ClaimValue::Float(f64::NAN));
        assert_eq!(
            provider.to_json(&map).unwrap_err().kind,
            ErrorKind::JsonError
        );
    }
}

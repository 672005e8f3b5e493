//! Claim and header values
//!
//! Token payloads and headers are maps from claim name to a small scalar
//! union. Arrays and objects are deliberately absent; providers that need
//! them must extend the seam on their side.

use std::collections::HashMap;

/// A JSON-scalar claim value.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    /// JSON null
    Null,
    /// JSON boolean
    Bool(bool),
    /// Signed 64-bit integer
    Int(i64),
    /// 64-bit float
    Float(f64),
    /// UTF-8 string
    String(String),
}

impl ClaimValue {
    /// Borrow the string payload, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ClaimValue::String(value) => Some(value),
            _ => None,
        }
    }

    /// Read the boolean payload, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ClaimValue::Bool(value) => Some(*value),
            _ => None,
        }
    }

    /// Read the value as an integer.
    ///
    /// A float with a zero fractional part is accepted as an integer; any
    /// other variant reports absent.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ClaimValue::Int(value) => Some(*value),
            ClaimValue::Float(value) if value.fract() == 0.0 => Some(*value as i64),
            _ => None,
        }
    }

    /// Read the value as a float; integers widen.
    pub fn as_float(&self) -> Option<f64> {
        match self {
            ClaimValue::Float(value) => Some(*value),
            ClaimValue::Int(value) => Some(*value as f64),
            _ => None,
        }
    }
}

impl From<bool> for ClaimValue {
    fn from(value: bool) -> Self {
        ClaimValue::Bool(value)
    }
}

impl From<i64> for ClaimValue {
    fn from(value: i64) -> Self {
        ClaimValue::Int(value)
    }
}

impl From<f64> for ClaimValue {
    fn from(value: f64) -> Self {
        ClaimValue::Float(value)
    }
}

impl From<&str> for ClaimValue {
    fn from(value: &str) -> Self {
        ClaimValue::String(value.to_owned())
    }
}

impl From<String> for ClaimValue {
    fn from(value: String) -> Self {
        ClaimValue::String(value)
    }
}

/// Claim name → value map. Insertion order is not preserved across
/// serialization.
pub type ClaimMap = HashMap<String, ClaimValue>;

/// Header name → value map; structurally identical to [`ClaimMap`].
pub type HeaderMap = ClaimMap;

/// Look up a string-valued entry.
pub(crate) fn get_string<'a>(map: &'a ClaimMap, key: &str) -> Option<&'a str> {
    map.get(key).and_then(ClaimValue::as_str)
}

/// Look up an integer-valued entry, applying the float coercion rule.
pub(crate) fn get_int(map: &ClaimMap, key: &str) -> Option<i64> {
    map.get(key).and_then(ClaimValue::as_int)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_accessor_coerces_whole_floats() {
        assert_eq!(ClaimValue::Int(42).as_int(), Some(42));
        assert_eq!(ClaimValue::Float(42.0).as_int(), Some(42));
        assert_eq!(ClaimValue::Float(42.5).as_int(), None);
        assert_eq!(ClaimValue::String("42".into()).as_int(), None);
        assert_eq!(ClaimValue::Null.as_int(), None);
    }

    #[test]
    fn float_accessor_widens_ints() {
        assert_eq!(ClaimValue::Float(1.5).as_float(), Some(1.5));
        assert_eq!(ClaimValue::Int(7).as_float(), Some(7.0));
        assert_eq!(ClaimValue::Bool(true).as_float(), None);
    }

    #[test]
    fn string_and_bool_accessors_reject_other_variants() {
        assert_eq!(ClaimValue::String("x".into()).as_str(), Some("x"));
        assert_eq!(ClaimValue::Int(1).as_str(), None);
        assert_eq!(ClaimValue::Bool(false).as_bool(), Some(false));
        assert_eq!(ClaimValue::Null.as_bool(), None);
    }

    #[test]
    fn map_helpers_read_typed_entries() {
        let mut map = ClaimMap::new();
        map.insert("iss".into(), ClaimValue::from("auth0"));
        map.insert("exp".into(), ClaimValue::Float(100.0));
        assert_eq!(get_string(&map, "iss"), Some("auth0"));
        assert_eq!(get_int(&map, "exp"), Some(100));
        assert_eq!(get_string(&map, "exp"), None);
        assert_eq!(get_int(&map, "missing"), None);
    }
}

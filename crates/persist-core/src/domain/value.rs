//! The value model shared by the config and state documents.
//!
//! Documents are JSON objects whose values are JSON-native.  Callers ask for
//! a value by [`ValueKind`]; a stored value either matches the requested kind,
//! is widened (integer to float, for path lookups only), or is reported as a
//! type mismatch.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::{Map, Number, Value};

use crate::error::StoreResult;

/// A whole configuration or state document: a JSON object.
pub type Document = Map<String, Value>;

/// The runtime type a caller expects a stored value to have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueKind {
    /// Matches every value.
    #[default]
    Any,
    Null,
    Bool,
    /// A JSON number without a fractional representation.
    Integer,
    /// A JSON number stored as a floating-point value.
    Float,
    String,
    Array,
    Object,
}

impl ValueKind {
    /// Returns the kind of a concrete value.  Never returns [`ValueKind::Any`].
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => ValueKind::Null,
            Value::Bool(_) => ValueKind::Bool,
            Value::Number(n) if n.is_f64() => ValueKind::Float,
            Value::Number(_) => ValueKind::Integer,
            Value::String(_) => ValueKind::String,
            Value::Array(_) => ValueKind::Array,
            Value::Object(_) => ValueKind::Object,
        }
    }

    /// Returns `true` when `value` satisfies this kind exactly.
    ///
    /// Booleans never satisfy the numeric kinds, and integers do not satisfy
    /// [`ValueKind::Float`] here; see [`ValueKind::widen`].
    pub fn accepts(self, value: &Value) -> bool {
        self == ValueKind::Any || self == ValueKind::of(value)
    }

    /// Returns the widened form of `value` when this kind permits numeric
    /// promotion: an integer requested as a float becomes a float.
    pub fn widen(self, value: &Value) -> Option<Value> {
        match (self, value) {
            (ValueKind::Float, Value::Number(n)) if !n.is_f64() => {
                let as_float = n.as_i64().map(|i| i as f64).or_else(|| n.as_u64().map(|u| u as f64))?;
                Number::from_f64(as_float).map(Value::Number)
            }
            _ => None,
        }
    }

    /// Lower-case name used in error messages and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ValueKind::Any => "any",
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Integer => "integer",
            ValueKind::Float => "float",
            ValueKind::String => "string",
            ValueKind::Array => "array",
            ValueKind::Object => "object",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ValueKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(ValueKind::Any),
            "null" => Ok(ValueKind::Null),
            "bool" | "boolean" => Ok(ValueKind::Bool),
            "int" | "integer" => Ok(ValueKind::Integer),
            "float" | "number" => Ok(ValueKind::Float),
            "str" | "string" => Ok(ValueKind::String),
            "array" | "list" => Ok(ValueKind::Array),
            "object" | "map" => Ok(ValueKind::Object),
            other => Err(format!("unknown value kind: {other}")),
        }
    }
}

/// Coerces a value into something a document may hold.
///
/// Numbers, booleans, strings, arrays and objects are kept as they are.
/// Anything else (only `null` in JSON's value space) is replaced by its
/// string representation.
pub fn coerce(value: Value) -> Value {
    match value {
        Value::Null => Value::String("null".to_string()),
        other => other,
    }
}

/// Serializes `value` and coerces it for storage.
pub fn to_stored<V: Serialize + ?Sized>(value: &V) -> StoreResult<Value> {
    Ok(coerce(serde_json::to_value(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_of_distinguishes_integer_and_float() {
        assert_eq!(ValueKind::of(&json!(5)), ValueKind::Integer);
        assert_eq!(ValueKind::of(&json!(5.0)), ValueKind::Float);
        assert_eq!(ValueKind::of(&json!(u64::MAX)), ValueKind::Integer);
    }

    #[test]
    fn test_any_accepts_everything() {
        for v in [json!(null), json!(true), json!(1), json!("x"), json!([1]), json!({})] {
            assert!(ValueKind::Any.accepts(&v), "Any must accept {v}");
        }
    }

    #[test]
    fn test_bool_is_not_an_integer() {
        assert!(!ValueKind::Integer.accepts(&json!(true)));
        assert!(ValueKind::Bool.accepts(&json!(false)));
    }

    #[test]
    fn test_integer_is_not_accepted_as_float_without_widening() {
        assert!(!ValueKind::Float.accepts(&json!(5)));
    }

    #[test]
    fn test_widen_promotes_integer_to_float() {
        // Act
        let widened = ValueKind::Float.widen(&json!(5));

        // Assert
        assert_eq!(widened, Some(json!(5.0)));
        assert_eq!(ValueKind::of(&widened.unwrap()), ValueKind::Float);
    }

    #[test]
    fn test_widen_only_applies_to_float() {
        assert_eq!(ValueKind::Integer.widen(&json!(5)), None);
        assert_eq!(ValueKind::Float.widen(&json!("5")), None);
        assert_eq!(ValueKind::Float.widen(&json!(5.5)), None);
    }

    #[test]
    fn test_coerce_replaces_null_with_its_string_form() {
        assert_eq!(coerce(json!(null)), json!("null"));
        assert_eq!(coerce(json!([1, 2])), json!([1, 2]));
        assert_eq!(coerce(json!({"a": 1})), json!({"a": 1}));
    }

    #[test]
    fn test_to_stored_serializes_rust_values() {
        assert_eq!(to_stored(&3u8).unwrap(), json!(3));
        assert_eq!(to_stored("text").unwrap(), json!("text"));
        assert_eq!(to_stored(&vec!["a", "b"]).unwrap(), json!(["a", "b"]));
        assert_eq!(to_stored(&None::<i32>).unwrap(), json!("null"));
    }

    #[test]
    fn test_kind_parses_from_cli_names() {
        assert_eq!("integer".parse::<ValueKind>(), Ok(ValueKind::Integer));
        assert_eq!("Float".parse::<ValueKind>(), Ok(ValueKind::Float));
        assert!("tuple".parse::<ValueKind>().is_err());
    }
}

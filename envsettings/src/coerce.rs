//! Built-in coercions from raw environment strings to [`Value`]
//!
//! A coercion is a plain function registered on a field when the schema is
//! defined. When it fails the binder keeps the raw string instead.

use crate::error::CoerceError;
use crate::value::Value;

/// Converts a raw environment string into a setting value.
pub type Coercion = fn(&str) -> Result<Value, CoerceError>;

/// The empty string, `0`, `false`, `no` and `off` are false, any other text is
/// true.
///
/// Matching is case-insensitive and ignores surrounding whitespace. Never
/// fails.
pub fn boolean(raw: &str) -> Result<Value, CoerceError> {
    let falsy = matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "" | "0" | "false" | "no" | "off"
    );
    Ok(Value::Bool(!falsy))
}

pub fn integer(raw: &str) -> Result<Value, CoerceError> {
    raw.trim()
        .parse::<i64>()
        .map(Value::Int)
        .map_err(|e| CoerceError::new("integer", e))
}

pub fn float(raw: &str) -> Result<Value, CoerceError> {
    raw.trim()
        .parse::<f64>()
        .map(Value::Float)
        .map_err(|e| CoerceError::new("float", e))
}

/// Identity coercion, never fails.
pub fn string(raw: &str) -> Result<Value, CoerceError> {
    Ok(Value::Str(raw.to_string()))
}

/// Parses a JSON array, e.g. `["a","b"]` or `[1, 2, 3]`.
///
/// Nested arrays are kept, objects are rejected.
pub fn list(raw: &str) -> Result<Value, CoerceError> {
    let parsed: serde_json::Value =
        serde_json::from_str(raw).map_err(|e| CoerceError::new("list", e))?;
    if !parsed.is_array() {
        return Err(CoerceError::new(
            "list",
            format!("expected a JSON array, found {}", json_kind(&parsed)),
        ));
    }
    from_json(parsed)
}

fn from_json(json: serde_json::Value) -> Result<Value, CoerceError> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Bool(b)),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Ok(Value::Int(i)),
            None => n
                .as_f64()
                .map(Value::Float)
                .ok_or_else(|| CoerceError::new("list", format!("unsupported number {n}"))),
        },
        serde_json::Value::String(s) => Ok(Value::Str(s)),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(from_json)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::List),
        serde_json::Value::Object(_) => Err(CoerceError::new(
            "list",
            "nested objects are not supported",
        )),
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boolean_truthy() {
        for raw in ["1", "true", "TRUE", "yes", "On", " true "] {
            assert_eq!(boolean(raw).unwrap(), Value::Bool(true), "{raw:?}");
        }
    }

    #[test]
    fn test_boolean_falsy() {
        for raw in ["0", "false", "False", "no", "off", ""] {
            assert_eq!(boolean(raw).unwrap(), Value::Bool(false), "{raw:?}");
        }
    }

    #[test]
    fn test_boolean_other_text_is_true() {
        for raw in ["enabled", "maybe", "2", "-1", "should be skipped"] {
            assert_eq!(boolean(raw).unwrap(), Value::Bool(true), "{raw:?}");
        }
    }

    #[test]
    fn test_integer() {
        assert_eq!(integer("32").unwrap(), Value::Int(32));
        assert_eq!(integer(" -7 ").unwrap(), Value::Int(-7));
        assert!(integer("").is_err());
        assert!(integer("3.5").is_err());
    }

    #[test]
    fn test_float() {
        assert_eq!(float("0.25").unwrap(), Value::Float(0.25));
        assert!(float("fast").is_err());
    }

    #[test]
    fn test_string_is_identity() {
        assert_eq!(string("a test").unwrap(), Value::Str("a test".into()));
        assert_eq!(string("").unwrap(), Value::Str(String::new()));
    }

    #[test]
    fn test_list_from_json_array() {
        assert_eq!(
            list(r#"["production", 2, true, 0.5]"#).unwrap(),
            Value::List(vec![
                Value::Str("production".into()),
                Value::Int(2),
                Value::Bool(true),
                Value::Float(0.5),
            ])
        );
    }

    #[test]
    fn test_list_rejects_plain_text_and_objects() {
        assert!(list("should be skipped").is_err());
        assert!(list("42").is_err());
        assert!(list(r#"[{"a": 1}]"#).is_err());
    }
}

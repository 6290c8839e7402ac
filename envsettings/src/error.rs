//! Error types for settings binding and typed extraction

use std::fmt::Display;

/// Errors surfaced when settings are not ready to be used.
///
/// Binding itself never fails. These errors come from the readiness check and
/// from converting bound values into typed fields:
/// - Required settings still holding the empty value
/// - Bound values that do not fit the field's Rust type
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    /// One or more required settings are unset.
    ///
    /// Settings listed as optional and private settings (leading underscore)
    /// never appear here.
    #[error("Required settings are not set: {}", names.join(", "))]
    Missing {
        /// Names of the unset settings, in definition order
        names: Vec<String>,
    },

    /// A bound value cannot be converted into the field's type.
    ///
    /// Usually the environment value failed coercion and was kept as a raw
    /// string.
    #[error("Failed to read setting '{name}' as {type_name}: {message}")]
    Parse {
        /// Name of the setting being converted
        name: String,
        /// Fully qualified type name that conversion was attempted for
        type_name: String,
        /// Why the conversion failed
        message: String,
    },
}

impl SettingsError {
    /// Create a parse error (used by macro-generated code)
    #[doc(hidden)]
    pub fn parse_error<T>(name: impl Into<String>, message: impl Display) -> Self {
        Self::Parse {
            name: name.into(),
            type_name: std::any::type_name::<T>().to_string(),
            message: message.to_string(),
        }
    }

    /// Create a missing settings error
    pub fn missing(names: Vec<String>) -> Self {
        Self::Missing { names }
    }
}

/// A raw environment string could not be coerced into the declared type.
///
/// The binder swallows this error and keeps the raw string. The message never
/// contains the input value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot coerce value into {target}: {reason}")]
pub struct CoerceError {
    /// Name of the target type (e.g. "integer")
    pub target: &'static str,
    /// Underlying parser message
    pub reason: String,
}

impl CoerceError {
    pub fn new(target: &'static str, reason: impl Display) -> Self {
        Self {
            target,
            reason: reason.to_string(),
        }
    }
}

/// A [`Value`](crate::Value) does not hold what a typed field expects.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("expected {expected}, found {found}")]
pub struct TypeMismatch {
    pub expected: &'static str,
    pub found: String,
}

impl TypeMismatch {
    pub fn new(expected: &'static str, found: impl Into<String>) -> Self {
        Self {
            expected,
            found: found.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_lists_names() {
        let err = SettingsError::missing(vec!["database_dsn".into(), "api_key".into()]);
        assert_eq!(
            err.to_string(),
            "Required settings are not set: database_dsn, api_key"
        );
    }

    #[test]
    fn test_parse_error_contains_type_info() {
        let err = SettingsError::parse_error::<u16>("port", "expected integer, found string");
        match err {
            SettingsError::Parse {
                name, type_name, ..
            } => {
                assert_eq!(name, "port");
                assert!(type_name.contains("u16"));
            }
            _ => panic!("Expected Parse error"),
        }
    }

    #[test]
    fn test_coerce_error_hides_input() {
        let err = CoerceError::new("integer", "invalid digit found in string");
        assert_eq!(
            err.to_string(),
            "cannot coerce value into integer: invalid digit found in string"
        );
    }
}

//! Dynamic setting values and their typed counterparts

use crate::coerce::{self, Coercion};
use crate::error::TypeMismatch;
use std::fmt;

/// The current value of a setting.
///
/// `Null` is the empty sentinel: a required setting holding `Null` is
/// reported as missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Short name of the variant, used in mismatch messages
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Int(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f64> {
        match self {
            Value::Float(f) => Some(*f),
            Value::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::Str(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl<T: SettingType> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.into_value()
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

/// A Rust type that can back a setting.
///
/// Ties a type to the coercion used when binding from the environment, and
/// converts between the type and [`Value`]. Used by `#[derive(Settings)]`.
pub trait SettingType: Sized {
    /// Coercion applied to raw environment strings for this type
    fn coercion() -> Coercion;

    fn into_value(self) -> Value;

    fn from_value(value: &Value) -> Result<Self, TypeMismatch>;
}

impl SettingType for bool {
    fn coercion() -> Coercion {
        coerce::boolean
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }

    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_bool()
            .ok_or_else(|| TypeMismatch::new("boolean", value.kind()))
    }
}

impl SettingType for String {
    fn coercion() -> Coercion {
        coerce::string
    }

    fn into_value(self) -> Value {
        Value::Str(self)
    }

    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| TypeMismatch::new("string", value.kind()))
    }
}

macro_rules! integer_value {
    (lossless, $v:expr) => {
        Value::Int(i64::from($v))
    };
    (wide, $v:expr) => {
        match i64::try_from($v) {
            Ok(int) => Value::Int(int),
            Err(_) => Value::Str($v.to_string()),
        }
    };
}

macro_rules! integer_setting {
    ($kind:ident: $($ty:ty),*) => {$(
        impl SettingType for $ty {
            fn coercion() -> Coercion {
                coerce::integer
            }

            fn into_value(self) -> Value {
                integer_value!($kind, self)
            }

            fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
                let int = value
                    .as_int()
                    .ok_or_else(|| TypeMismatch::new("integer", value.kind()))?;
                <$ty>::try_from(int)
                    .map_err(|_| TypeMismatch::new("integer", "integer out of range"))
            }
        }

        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                v.into_value()
            }
        }
    )*};
}

integer_setting!(lossless: i8, i16, i32, i64, u8, u16, u32);
// Values above `i64::MAX` become strings and fail typed extraction.
integer_setting!(wide: u64, usize, isize);

impl SettingType for f64 {
    fn coercion() -> Coercion {
        coerce::float
    }

    fn into_value(self) -> Value {
        Value::Float(self)
    }

    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        value
            .as_float()
            .ok_or_else(|| TypeMismatch::new("float", value.kind()))
    }
}

impl SettingType for f32 {
    fn coercion() -> Coercion {
        coerce::float
    }

    fn into_value(self) -> Value {
        Value::Float(f64::from(self))
    }

    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        f64::from_value(value).map(|f| f as f32)
    }
}

impl<T: SettingType> SettingType for Vec<T> {
    fn coercion() -> Coercion {
        coerce::list
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(SettingType::into_value).collect())
    }

    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        let items = value
            .as_list()
            .ok_or_else(|| TypeMismatch::new("list", value.kind()))?;
        items.iter().map(T::from_value).collect()
    }
}

/// `None` maps to [`Value::Null`], the coercion is the inner type's.
impl<T: SettingType> SettingType for Option<T> {
    fn coercion() -> Coercion {
        T::coercion()
    }

    fn into_value(self) -> Value {
        match self {
            Some(v) => v.into_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Result<Self, TypeMismatch> {
        match value {
            Value::Null => Ok(None),
            v => T::from_value(v).map(Some),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_list() {
        let value = Value::List(vec![Value::Int(1), Value::Str("a".into()), Value::Null]);
        assert_eq!(value.to_string(), "[1, a, null]");
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = u8::from_value(&Value::Int(300)).unwrap_err();
        assert_eq!(err.expected, "integer");
        assert!(!err.to_string().contains("300"));
    }

    #[test]
    fn test_wide_integers() {
        assert_eq!(8usize.into_value(), Value::Int(8));
        assert_eq!(usize::from_value(&Value::Int(8)).unwrap(), 8);
        assert_eq!(isize::from_value(&Value::Int(-3)).unwrap(), -3);
        assert!(usize::from_value(&Value::Int(-1)).is_err());
        assert_eq!(u64::MAX.into_value(), Value::Str(u64::MAX.to_string()));
        assert!(u64::from_value(&u64::MAX.into_value()).is_err());
    }

    #[test]
    fn test_raw_string_does_not_fit_integer() {
        let err = u16::from_value(&Value::Str("abc".into())).unwrap_err();
        assert_eq!(err, TypeMismatch::new("integer", "string"));
    }

    #[test]
    fn test_option_null_is_none() {
        assert_eq!(Option::<String>::from_value(&Value::Null).unwrap(), None);
        assert_eq!(
            Option::<i32>::from_value(&Value::Int(7)).unwrap(),
            Some(7)
        );
    }

    #[test]
    fn test_vec_round_trips_through_value() {
        let value = vec![1i64, 2, 3].into_value();
        assert_eq!(
            value,
            Value::List(vec![Value::Int(1), Value::Int(2), Value::Int(3)])
        );
        assert_eq!(Vec::<i64>::from_value(&value).unwrap(), vec![1, 2, 3]);
    }

    #[test]
    fn test_float_accepts_integer_value() {
        assert_eq!(f64::from_value(&Value::Int(2)).unwrap(), 2.0);
    }
}

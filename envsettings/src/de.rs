//! Typed extraction used by `#[derive(Settings)]`

use crate::definition::SettingsDefinition;
use crate::error::SettingsError;
use crate::value::{SettingType, Value};

/// Convert the current value of `name` into `T`.
///
/// An undeclared setting reads as [`Value::Null`].
#[doc(hidden)]
pub fn extract<T: SettingType>(
    definition: &SettingsDefinition,
    name: &str,
) -> Result<T, SettingsError> {
    let value = definition.get(name).unwrap_or(&Value::Null);
    T::from_value(value).map_err(|e| SettingsError::parse_error::<T>(name, e))
}

/// Default value of `T` as a setting value.
#[doc(hidden)]
pub fn default_value<T: SettingType>(value: T) -> Value {
    value.into_value()
}

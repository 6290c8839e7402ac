//! Readiness checks for required settings

use crate::definition::SettingsDefinition;
use crate::error::SettingsError;

/// Names of required settings that still hold [`Value::Null`](crate::Value::Null).
///
/// Settings whose name starts with `_` and settings listed in
/// `optional_settings` are skipped. The result follows declaration order and
/// is empty when everything is configured.
pub fn find_missing_settings(definition: &SettingsDefinition) -> Vec<String> {
    definition
        .iter()
        .filter(|(name, _)| !name.starts_with('_') && !definition.is_optional(name))
        .filter(|(_, value)| value.is_null())
        .map(|(name, _)| name.to_string())
        .collect()
}

/// Fail with [`SettingsError::Missing`] unless every required setting is set.
pub fn ensure_ready(definition: &SettingsDefinition) -> Result<(), SettingsError> {
    let missing = find_missing_settings(definition);
    if missing.is_empty() {
        Ok(())
    } else {
        Err(SettingsError::missing(missing))
    }
}

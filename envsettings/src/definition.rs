//! Settings schema and current values

use crate::coerce::{self, Coercion};
use crate::value::Value;

/// Declaration of a single setting: its name, default and coercion.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    default: Value,
    coercion: Option<Coercion>,
}

impl FieldSpec {
    /// An untyped setting: environment values are stored as raw strings.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Value::Null,
            coercion: None,
        }
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name).coercion(coerce::boolean)
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self::new(name).coercion(coerce::integer)
    }

    pub fn float(name: impl Into<String>) -> Self {
        Self::new(name).coercion(coerce::float)
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name).coercion(coerce::string)
    }

    pub fn list(name: impl Into<String>) -> Self {
        Self::new(name).coercion(coerce::list)
    }

    pub fn coercion(mut self, coercion: Coercion) -> Self {
        self.coercion = Some(coercion);
        self
    }

    pub fn default(mut self, value: impl Into<Value>) -> Self {
        self.default = value.into();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }
}

#[derive(Debug, Clone)]
struct Setting {
    spec: FieldSpec,
    value: Value,
}

/// An explicit settings schema together with the current value of every field.
///
/// Fields keep their declaration order. Two name lists refine how fields are
/// treated:
/// - `optional_settings`: never reported as missing
/// - `no_environ_set`: never assigned by the environment binder, whether or
///   not a field with that name is declared
///
/// ```rust
/// use envsettings::{FieldSpec, SettingsDefinition, Value};
///
/// let settings = SettingsDefinition::builder()
///     .field(FieldSpec::boolean("debug").default(false))
///     .field(FieldSpec::string("database_dsn"))
///     .field(FieldSpec::string("sentry_dsn"))
///     .optional("sentry_dsn")
///     .build();
///
/// assert_eq!(settings.get("debug"), Some(&Value::Bool(false)));
/// assert_eq!(envsettings::find_missing_settings(&settings), vec!["database_dsn"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct SettingsDefinition {
    settings: Vec<Setting>,
    optional_settings: Vec<String>,
    no_environ_set: Vec<String>,
}

impl SettingsDefinition {
    pub fn builder() -> SettingsDefinitionBuilder {
        SettingsDefinitionBuilder::default()
    }

    /// Current value of a setting, `None` if no such field exists.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.setting(name).map(|s| &s.value)
    }

    /// Assign a value, appending an untyped field when `name` is unknown.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        let value = value.into();
        match self.settings.iter_mut().find(|s| s.spec.name == name) {
            Some(setting) => setting.value = value,
            None => self.settings.push(Setting {
                spec: FieldSpec::new(name),
                value,
            }),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.setting(name).is_some()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.setting(name).map(|s| &s.spec)
    }

    /// Coercion registered for `name`, if the field is declared and typed.
    pub fn coercion_for(&self, name: &str) -> Option<Coercion> {
        self.setting(name).and_then(|s| s.spec.coercion)
    }

    pub fn is_optional(&self, name: &str) -> bool {
        self.optional_settings.iter().any(|n| n == name)
    }

    pub fn allows_env_override(&self, name: &str) -> bool {
        !self.no_environ_set.iter().any(|n| n == name)
    }

    pub fn optional_settings(&self) -> &[String] {
        &self.optional_settings
    }

    pub fn no_environ_set(&self) -> &[String] {
        &self.no_environ_set
    }

    /// `(name, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.settings
            .iter()
            .map(|s| (s.spec.name.as_str(), &s.value))
    }

    pub fn len(&self) -> usize {
        self.settings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.settings.is_empty()
    }

    /// Put every field back to its declared default.
    ///
    /// Fields created by assignment stay, with a null value.
    pub fn reset(&mut self) {
        for setting in &mut self.settings {
            setting.value = setting.spec.default.clone();
        }
    }

    fn setting(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.spec.name == name)
    }
}

/// Builder for [`SettingsDefinition`].
#[derive(Debug, Default)]
pub struct SettingsDefinitionBuilder {
    fields: Vec<FieldSpec>,
    optional_settings: Vec<String>,
    no_environ_set: Vec<String>,
}

impl SettingsDefinitionBuilder {
    /// Declare a field. A later declaration with the same name replaces the
    /// earlier one in place.
    pub fn field(mut self, spec: FieldSpec) -> Self {
        match self.fields.iter_mut().find(|f| f.name == spec.name) {
            Some(existing) => *existing = spec,
            None => self.fields.push(spec),
        }
        self
    }

    /// Exempt `name` from the readiness check.
    pub fn optional(mut self, name: impl Into<String>) -> Self {
        self.optional_settings.push(name.into());
        self
    }

    /// Forbid the environment binder from assigning `name`.
    pub fn no_environ(mut self, name: impl Into<String>) -> Self {
        self.no_environ_set.push(name.into());
        self
    }

    pub fn build(self) -> SettingsDefinition {
        SettingsDefinition {
            settings: self
                .fields
                .into_iter()
                .map(|spec| Setting {
                    value: spec.default.clone(),
                    spec,
                })
                .collect(),
            optional_settings: self.optional_settings,
            no_environ_set: self.no_environ_set,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> SettingsDefinition {
        SettingsDefinition::builder()
            .field(FieldSpec::boolean("debug").default(false))
            .field(FieldSpec::string("database_dsn"))
            .field(FieldSpec::list("allowed_hosts").default(vec![Value::from("localhost")]))
            .no_environ("allowed_hosts")
            .build()
    }

    #[test]
    fn test_build_applies_defaults() {
        let settings = sample();
        assert_eq!(settings.get("debug"), Some(&Value::Bool(false)));
        assert_eq!(settings.get("database_dsn"), Some(&Value::Null));
        assert_eq!(settings.get("unknown"), None);
    }

    #[test]
    fn test_iter_keeps_declaration_order() {
        let settings = sample();
        let names: Vec<&str> = settings.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["debug", "database_dsn", "allowed_hosts"]);
    }

    #[test]
    fn test_set_unknown_field_appends_untyped() {
        let mut settings = sample();
        settings.set("extra", "value");
        assert_eq!(settings.get("extra"), Some(&Value::Str("value".into())));
        assert!(settings.coercion_for("extra").is_none());
        assert_eq!(settings.iter().last().map(|(n, _)| n), Some("extra"));
    }

    #[test]
    fn test_duplicate_field_replaces_in_place() {
        let settings = SettingsDefinition::builder()
            .field(FieldSpec::string("a"))
            .field(FieldSpec::string("b"))
            .field(FieldSpec::integer("a").default(1))
            .build();
        let names: Vec<&str> = settings.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(settings.get("a"), Some(&Value::Int(1)));
    }

    #[test]
    fn test_exclusion_lists() {
        let settings = sample();
        assert!(!settings.allows_env_override("allowed_hosts"));
        assert!(settings.allows_env_override("debug"));
        assert!(!settings.is_optional("debug"));
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut settings = sample();
        settings.set("debug", true);
        settings.set("extra", "x");
        settings.reset();
        assert_eq!(settings.get("debug"), Some(&Value::Bool(false)));
        assert_eq!(settings.get("extra"), Some(&Value::Null));
    }
}

//! A settings definition shared between threads

use crate::bind;
use crate::definition::SettingsDefinition;
use crate::validate;
use crate::value::Value;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

/// [`SettingsDefinition`] behind a read-write lock.
///
/// Binding takes the write lock for the whole pass, so readers never observe
/// a partially bound definition. Suitable as a process-wide instance:
///
/// ```rust
/// use envsettings::{FieldSpec, SettingsDefinition, SharedSettings};
/// use std::sync::LazyLock;
///
/// static SETTINGS: LazyLock<SharedSettings> = LazyLock::new(|| {
///     SharedSettings::new(
///         SettingsDefinition::builder()
///             .field(FieldSpec::boolean("debug").default(false))
///             .build(),
///     )
/// });
///
/// SETTINGS.bind_from_env("DOCTEST_SHARED_");
/// assert!(SETTINGS.find_missing().is_empty());
/// ```
#[derive(Debug, Default)]
pub struct SharedSettings {
    inner: RwLock<SettingsDefinition>,
}

impl SharedSettings {
    pub fn new(definition: SettingsDefinition) -> Self {
        Self {
            inner: RwLock::new(definition),
        }
    }

    /// See [`bind::bind_from_env`].
    pub fn bind_from_env(&self, prefix: &str) {
        let mut definition = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        bind::bind_from_env(&mut definition, prefix);
    }

    /// See [`bind::bind_from_vars`].
    pub fn bind_from_vars<I, K, V>(&self, prefix: &str, vars: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut definition = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        bind::bind_from_vars(&mut definition, prefix, vars);
    }

    /// Clone of the current value of `name`.
    pub fn get(&self, name: &str) -> Option<Value> {
        self.read().get(name).cloned()
    }

    pub fn find_missing(&self) -> Vec<String> {
        validate::find_missing_settings(&self.read())
    }

    pub fn read(&self) -> RwLockReadGuard<'_, SettingsDefinition> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_inner(self) -> SettingsDefinition {
        self.inner
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

//! Binding prefixed environment variables onto a settings definition

use crate::definition::SettingsDefinition;
use crate::value::Value;
use std::borrow::Cow;
use std::env;
use std::ffi::OsStr;
use std::sync::{Mutex, PoisonError};

/// Serializes binder passes across threads.
static BIND_LOCK: Mutex<()> = Mutex::new(());

const SENSITIVE_MARKER: &str = "password";
const VISIBLE_CHARS: usize = 4;
const MASK: &str = "****";

/// Update `definition` from environment variables starting with `prefix`.
///
/// For every `{prefix}{SUFFIX}` variable the suffix is lower-cased to get the
/// setting name. The raw value goes through the coercion registered for that
/// setting; when there is none, or it fails, the raw string is stored. Unknown
/// names are added as untyped settings. Names in the definition's
/// `no_environ_set` are never touched.
///
/// Never fails. An empty prefix does nothing.
///
/// The pass holds a process-wide lock, so concurrent calls do not interleave.
pub fn bind_from_env(definition: &mut SettingsDefinition, prefix: &str) {
    let _guard = BIND_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    let vars = env::vars_os().filter_map(|(key, value)| match key.into_string() {
        Ok(key) => {
            let value = decode_value(&key, &value);
            Some((key, value))
        }
        Err(key) => {
            tracing::trace!("Skipping non UTF-8 environment variable {:?}", key);
            None
        }
    });
    bind_locked(definition, prefix, vars);
}

/// Same as [`bind_from_env`] over an explicit `(key, value)` snapshot.
pub fn bind_from_vars<I, K, V>(definition: &mut SettingsDefinition, prefix: &str, vars: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let _guard = BIND_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    bind_locked(definition, prefix, vars);
}

fn bind_locked<I, K, V>(definition: &mut SettingsDefinition, prefix: &str, vars: I)
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    if prefix.is_empty() {
        tracing::warn!("Refusing to bind settings from environment with an empty prefix");
        return;
    }

    for (key, raw) in vars {
        let key = key.as_ref();
        let Some(suffix) = key.strip_prefix(prefix) else {
            continue;
        };
        if suffix.is_empty() {
            tracing::trace!("Skipping {}. No setting name after prefix.", key);
            continue;
        }

        let name = suffix.to_lowercase();
        if !definition.allows_env_override(&name) {
            tracing::debug!("Skipping {}. Disallowed set from environ.", key);
            continue;
        }

        let value = coerce_value(definition, key, &name, raw.as_ref());
        tracing::trace!(
            "Found environment variable: {}. ({}={})",
            key,
            name,
            display_value(&name, &value)
        );
        definition.set(&name, value);
    }
}

fn decode_value(key: &str, value: &OsStr) -> String {
    match value.to_string_lossy() {
        Cow::Borrowed(value) => value.to_string(),
        Cow::Owned(value) => {
            tracing::trace!("Value of {} is not valid UTF-8, invalid bytes replaced", key);
            value
        }
    }
}

fn coerce_value(definition: &SettingsDefinition, key: &str, name: &str, raw: &str) -> Value {
    let Some(coercion) = definition.coercion_for(name) else {
        return Value::Str(raw.to_string());
    };
    match coercion(raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::trace!("Keeping {} as a string: {}", key, e);
            Value::Str(raw.to_string())
        }
    }
}

/// Render a value for diagnostics, masking settings whose name looks secret.
pub(crate) fn display_value(name: &str, value: &Value) -> String {
    let text = value.to_string();
    if name.to_lowercase().contains(SENSITIVE_MARKER) {
        mask(&text)
    } else {
        text
    }
}

fn mask(text: &str) -> String {
    if text.chars().count() <= VISIBLE_CHARS {
        return MASK.to_string();
    }
    let visible: String = text.chars().take(VISIBLE_CHARS).collect();
    format!("{visible}{MASK}")
}

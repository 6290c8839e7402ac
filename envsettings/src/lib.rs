//! Bind prefixed environment variables onto a settings schema
//!
//! `envsettings` reads every environment variable starting with a prefix,
//! coerces it with the type declared for the matching setting, stores it on a
//! [`SettingsDefinition`], and reports which required settings are still unset.
//!
//! # Features
//!
//! - **Explicit schema**: settings are declared with a name, a default and a
//!   coercion function, no reflection involved
//! - **Best-effort coercion**: a value that does not parse is kept as a raw
//!   string instead of failing the bind
//! - **Readiness check**: [`find_missing_settings`] lists required settings
//!   that are still empty
//! - **Declarative**: `#[derive(Settings)]` builds the schema from a struct
//!   and loads it back into typed fields
//! - **Secret aware**: values of settings named like `*password*` are masked in
//!   trace output
//!
//! # Naming
//!
//! With prefix `MYAPP_`, the variable `MYAPP_DATABASE_DSN` binds to the setting
//! `database_dsn`: the prefix is stripped and the rest lower-cased.
//!
//! # Value Coercion
//!
//! - Booleans: empty, `0`, `false`, `no` and `off` are false, anything else true
//! - Integers and floats: `MYAPP_PORT=5432`
//! - Strings: taken as is
//! - Lists: JSON arrays, `MYAPP_HOSTS=["a","b"]`
//!
//! # Example
//!
//! ```rust
//! use envsettings::{bind_from_vars, find_missing_settings, FieldSpec, SettingsDefinition, Value};
//!
//! let mut settings = SettingsDefinition::builder()
//!     .field(FieldSpec::boolean("debug").default(false))
//!     .field(FieldSpec::integer("port").default(8080))
//!     .field(FieldSpec::string("database_dsn"))
//!     .field(FieldSpec::list("admins").default(Vec::<Value>::new()))
//!     .no_environ("admins")
//!     .build();
//!
//! bind_from_vars(
//!     &mut settings,
//!     "MYAPP_",
//!     [("MYAPP_DEBUG", "1"), ("MYAPP_PORT", "3000"), ("MYAPP_ADMINS", "[\"root\"]")],
//! );
//!
//! assert_eq!(settings.get("debug"), Some(&Value::Bool(true)));
//! assert_eq!(settings.get("port"), Some(&Value::Int(3000)));
//! assert_eq!(settings.get("admins"), Some(&Value::List(vec![])));
//! assert_eq!(find_missing_settings(&settings), vec!["database_dsn"]);
//! ```
//!
//! # Derive
//!
//! ```rust
//! use envsettings::Settings;
//!
//! #[derive(Debug, Settings)]
//! #[settings(prefix = "DOCAPP_")]
//! struct AppSettings {
//!     #[settings(default = false)]
//!     pub debug: bool,
//!
//!     pub database_dsn: String,
//!
//!     // Optional, defaults to None
//!     pub sentry_dsn: Option<String>,
//!
//!     // Never read from the environment
//!     #[settings(no_environ, default = vec!["localhost".to_string()])]
//!     pub allowed_hosts: Vec<String>,
//! }
//!
//! # fn main() -> anyhow::Result<()> {
//! #     std::env::set_var("DOCAPP_DATABASE_DSN", "postgres://localhost/db");
//! let settings = AppSettings::from_env()?;
//! assert!(!settings.debug);
//! assert_eq!(settings.database_dsn, "postgres://localhost/db");
//! assert_eq!(settings.allowed_hosts, vec!["localhost"]);
//! #     Ok(())
//! # }
//! ```

mod bind;
pub mod coerce;
#[doc(hidden)]
pub mod de;
mod definition;
mod error;
mod shared;
mod validate;
mod value;

pub use bind::{bind_from_env, bind_from_vars};
pub use coerce::Coercion;
pub use definition::{FieldSpec, SettingsDefinition, SettingsDefinitionBuilder};
pub use envsettings_derive::Settings;
pub use error::{CoerceError, SettingsError, TypeMismatch};
pub use shared::SharedSettings;
pub use validate::{ensure_ready, find_missing_settings};
pub use value::{SettingType, Value};

// Re-export for macro-generated code
#[doc(hidden)]
pub use anyhow;

//! Example: application settings bound from `MYAPP_*` variables
//!
//! Run with `RUST_LOG=envsettings=trace` to see every bound variable.

use envsettings::{find_missing_settings, Settings};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Settings)]
#[settings(prefix = "MYAPP_")]
struct AppSettings {
    /// Enables debug mode
    #[settings(default = false)]
    pub debug: bool,

    /// DSN for Postgres
    pub database_dsn: String,

    pub database_password: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    std::env::set_var("MYAPP_DEBUG", "1");
    std::env::set_var("MYAPP_DATABASE_DSN", "postgres://localhost/app");
    std::env::set_var("MYAPP_DATABASE_PASSWORD", "supersecret");

    let mut definition = AppSettings::definition();
    envsettings::bind_from_env(&mut definition, AppSettings::ENV_PREFIX);

    let missing = find_missing_settings(&definition);
    if !missing.is_empty() {
        anyhow::bail!("Refusing to start, missing settings: {}", missing.join(", "));
    }

    let settings = AppSettings::from_definition(&definition)?;
    println!("Settings with prefix '{}':", AppSettings::ENV_PREFIX);
    println!("  Debug: {}", settings.debug);
    println!("  Database DSN: {}", settings.database_dsn);
    println!(
        "  Database password set: {}",
        settings.database_password.is_some()
    );

    Ok(())
}

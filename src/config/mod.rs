//! Configuration management for database and application settings.

/// Database configuration and connection management
pub mod database;

/// Initial profile seeding from config.toml
pub mod seed;

use tracing_subscriber::EnvFilter;

/// Loads environment variables from a `.env` file, if one exists.
///
/// Non-fatal: env vars can be set externally.
pub fn load_environment() {
    dotenvy::dotenv().ok();
}

/// Initializes tracing for host applications embedding the engine.
///
/// Respects `RUST_LOG` and falls back to `info`. Call once, as early as
/// possible.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

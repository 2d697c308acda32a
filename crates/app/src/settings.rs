//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` in the working directory and from `TRAKLI__*`
//! environment variables, e.g. `TRAKLI__SERVER__PORT=8080`.
//!
//! ```toml
//! [app]
//! level = "debug"
//!
//! [server]
//! bind = "0.0.0.0"
//! port = 3000
//! database = { sqlite = "trakli.db" }
//! ```
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level applied to every crate of the workspace.
    pub level: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    /// Path of the database file, created when missing.
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    pub app: App,
    pub server: Server,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .set_default("app.level", "info")?
            .set_default("server.port", 3000)?
            .set_default("server.database", "memory")?
            .add_source(File::with_name("settings").required(false))
            .add_source(
                Environment::with_prefix("TRAKLI")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        settings.try_deserialize()
    }
}

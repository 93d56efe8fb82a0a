use std::net::SocketAddr;

use anyhow::Context;
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub database: DatabaseSettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ApplicationSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Clone, Debug)]
pub struct DatabaseSettings {
    /// sqlx connection string, e.g. `sqlite:trivia.db` or `sqlite::memory:`
    pub url: String,
    pub max_connections: u32,
    pub create_if_missing: bool,
}

impl ApplicationSettings {
    pub fn address(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.host, self.port))
    }
}

/// Reads settings from defaults, an optional toml file and `TRIVIA_*` env variables,
/// in increasing order of priority.
pub fn get_configuration() -> anyhow::Result<Settings> {
    dotenv::dotenv().ok();
    let file = std::env::var("TRIVIA_CONFIG").unwrap_or_else(|_| "configuration".to_owned());

    let settings = Config::builder()
        .set_default("application.host", "0.0.0.0")?
        .set_default("application.port", 5000)?
        .set_default("database.url", "sqlite:trivia.db")?
        .set_default("database.max_connections", 5)?
        .set_default("database.create_if_missing", true)?
        .add_source(File::with_name(&file).required(false))
        .add_source(
            Environment::with_prefix("TRIVIA")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()
        .context("Failed to load configuration")?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize configuration")
}

use std::collections::HashMap;

use anyhow::Context;
use serde::Deserialize;

/// Store service settings, read from environment variables such as `USE_IN_MEMORY_DB` or `DB_HOST`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct StoreSettings {
    pub use_in_memory_db: bool,
    pub db_host: String,
    pub db_username: String,
    pub db_password: String,
    pub bind_port: u16,
}

impl StoreSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(None)
    }

    /// `source` replaces the process environment, used by tests
    pub fn from_source(source: Option<HashMap<String, String>>) -> anyhow::Result<Self> {
        config::Config::builder()
            .set_default("use_in_memory_db", false)?
            .set_default("db_host", "127.0.0.1")?
            .set_default("db_username", "postgres")?
            .set_default("db_password", "postgres")?
            .set_default("bind_port", 8080)?
            .add_source(config::Environment::default().source(source))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}

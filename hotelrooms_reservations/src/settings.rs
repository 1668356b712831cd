use std::collections::HashMap;

use anyhow::Context;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ReservationsSettings {
    pub hotelrooms_store_url: String,
    /// Proposals carry the room's reservation count and commits fail when it changed
    pub commit_guard: bool,
    pub bind_port: u16,
}

impl ReservationsSettings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_source(None)
    }

    pub fn from_source(source: Option<HashMap<String, String>>) -> anyhow::Result<Self> {
        config::Config::builder()
            .set_default("hotelrooms_store_url", "http://localhost:8080")?
            .set_default("commit_guard", false)?
            .set_default("bind_port", 8080)?
            .add_source(config::Environment::default().source(source))
            .build()
            .context("Failed to read settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}

#[cfg(test)]
mod settings_tests {
    use super::*;

    #[test]
    fn reads_store_url_and_guard() {
        let defaults = ReservationsSettings::from_source(Some(HashMap::new())).unwrap();
        assert_eq!(defaults.hotelrooms_store_url, "http://localhost:8080");
        assert!(!defaults.commit_guard);

        let env = HashMap::from([
            (
                "HOTELROOMS_STORE_URL".to_string(),
                "http://store:8080".to_string(),
            ),
            ("COMMIT_GUARD".to_string(), "true".to_string()),
        ]);
        let settings = ReservationsSettings::from_source(Some(env)).unwrap();
        assert_eq!(
            settings,
            ReservationsSettings {
                hotelrooms_store_url: "http://store:8080".to_string(),
                commit_guard: true,
                bind_port: 8080,
            }
        );
    }
}

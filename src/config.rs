use anyhow::{Context, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub environment: String,
    pub port: u16,

    // Translation content
    pub locales_dir: PathBuf,
    pub translations_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            // Server
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            port: match std::env::var("PORT") {
                Ok(value) => value.parse().context("PORT is not a valid port number")?,
                Err(_) => 3000,
            },

            // Translation content - a remote URL wins over the local directory
            locales_dir: std::env::var("LOCALES_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("locales")),
            translations_url: std::env::var("TRANSLATIONS_URL").ok(),
        })
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

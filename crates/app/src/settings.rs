//! Handles settings for the application. Configuration is read from
//! `config/sparagne.toml` (or the file given with `--config`), then from
//! `SPARAGNE_*` environment variables, then from command line overrides.
use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/sparagne";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// JSON document holding the ledger.
    pub ledger_path: String,
    /// Prefix printed in front of amounts.
    pub currency_symbol: String,
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ledger_path: engine::codec::DEFAULT_FILE_NAME.to_string(),
            currency_symbol: "$".to_string(),
            log_level: "info".to_string(),
        }
    }
}

/// Values given on the command line. They win over every other source.
#[derive(Debug, Default)]
pub struct Overrides {
    pub config: Option<String>,
    pub ledger_path: Option<String>,
    pub currency_symbol: Option<String>,
    pub log_level: Option<String>,
}

impl Settings {
    pub fn new(overrides: Overrides) -> Result<Self> {
        let config_path = overrides.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
        let mut settings: Settings = Config::builder()
            .add_source(File::with_name(config_path).required(overrides.config.is_some()))
            .add_source(Environment::with_prefix("SPARAGNE"))
            .build()?
            .try_deserialize()?;

        if let Some(ledger_path) = overrides.ledger_path {
            settings.ledger_path = ledger_path;
        }
        if let Some(currency_symbol) = overrides.currency_symbol {
            settings.currency_symbol = currency_symbol;
        }
        if let Some(log_level) = overrides.log_level {
            settings.log_level = log_level;
        }

        Ok(settings)
    }
}

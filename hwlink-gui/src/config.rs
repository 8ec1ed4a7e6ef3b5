use std::{path::Path, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing_subscriber::filter::LevelFilter;

use hwlink::{trezor::BridgeSettings, DerivationPath};

/// Entry of the navigation bar.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavLink {
    pub label: String,
    pub path: String,
}

impl NavLink {
    pub fn new(label: &str, path: &str) -> Self {
        Self {
            label: label.to_string(),
            path: path.to_string(),
        }
    }
}

pub fn default_navigation() -> Vec<NavLink> {
    vec![
        NavLink::new("Home", "/"),
        NavLink::new("Wallet", "/wallet"),
        NavLink::new("About", "/about"),
    ]
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub derivation_path: DerivationPath,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrezorConfig {
    #[serde(flatten)]
    pub bridge: BridgeSettings,
    pub derivation_path: DerivationPath,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log_level: String,
    pub ledger: LedgerConfig,
    pub trezor: TrezorConfig,
    pub navigation: Vec<NavLink>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            ledger: LedgerConfig::default(),
            trezor: TrezorConfig::default(),
            navigation: default_navigation(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Error reading the configuration file: {0}")]
    ReadingFile(String),
    #[error("Error parsing the configuration file: {0}")]
    Parsing(String),
    #[error("Invalid log level '{0}'")]
    InvalidLogLevel(String),
    #[error("Invalid navigation: {0}")]
    InvalidNavigation(String),
}

impl Config {
    /// Reads the configuration file. A missing file results in the default configuration.
    pub fn from_file(path: &Path) -> Result<Config, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(
                    "No configuration file at {}, using defaults",
                    path.to_string_lossy()
                );
                return Ok(Config::default());
            }
            Err(e) => return Err(ConfigError::ReadingFile(e.to_string())),
        };
        let config = toml::from_str::<Config>(&content)
            .map_err(|e| ConfigError::Parsing(e.to_string()))?;
        config.check()?;
        Ok(config)
    }

    pub fn check(&self) -> Result<(), ConfigError> {
        self.log_level()?;
        if self.navigation.is_empty() {
            return Err(ConfigError::InvalidNavigation(
                "at least one link is required".to_string(),
            ));
        }
        if let Some(link) = self.navigation.iter().find(|l| !l.path.starts_with('/')) {
            return Err(ConfigError::InvalidNavigation(format!(
                "path of '{}' must start with '/'",
                link.label
            )));
        }
        Ok(())
    }

    pub fn log_level(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::InvalidLogLevel(self.log_level.clone()))
    }
}

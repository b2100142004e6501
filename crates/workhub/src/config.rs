//! Configuration loader
//!
//! Handles loading configuration from TOML files, environment variables and
//! default values, merged with Figment. Later sources override earlier:
//! defaults, then `workhub.toml` (or an explicit `--config` path), then
//! `WORKHUB_*` environment variables.

use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tracing::Level;

use workhub_domain::error::{Error, Result};
use workhub_domain::value_objects::WorkOptions;

/// Environment variable prefix for configuration overrides
pub const CONFIG_ENV_PREFIX: &str = "WORKHUB";

/// Default configuration file looked up in the working directory
pub const DEFAULT_CONFIG_FILENAME: &str = "workhub.toml";

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Default work options per scheme, merged under CLI `-o` overrides
    #[serde(default)]
    pub options: BTreeMap<String, WorkOptions>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            options: BTreeMap::new(),
        }
    }
}

impl AppConfig {
    /// Default options configured for a scheme (case-insensitive lookup)
    pub fn options_for(&self, scheme: &str) -> WorkOptions {
        self.options
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(scheme))
            .map(|(_, options)| options.clone())
            .unwrap_or_default()
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn or error
    pub level: String,
    /// Emit JSON-formatted log lines
    pub json_format: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
        }
    }
}

/// Configuration loader service
#[derive(Clone, Debug, Default)]
pub struct ConfigLoader {
    /// Configuration file path
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the configuration file path
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration from all sources
    pub fn load(&self) -> Result<AppConfig> {
        let mut figment = Figment::new().merge(Serialized::defaults(AppConfig::default()));

        if let Some(config_path) = &self.config_path {
            if !config_path.exists() {
                return Err(Error::configuration(format!(
                    "configuration file not found: {}",
                    config_path.display()
                )));
            }
            figment = figment.merge(Toml::file(config_path));
        } else if let Some(default_path) = Self::find_default_config_path() {
            figment = figment.merge(Toml::file(default_path));
        }

        // Uses underscore as separator for nested keys (e.g. WORKHUB_LOGGING_LEVEL)
        figment = figment.merge(Env::prefixed(&format!("{CONFIG_ENV_PREFIX}_")).split("_"));

        let config: AppConfig = figment
            .extract()
            .map_err(|source| Error::configuration_with_source("failed to load configuration", source))?;

        validate_config(&config)?;
        Ok(config)
    }

    fn find_default_config_path() -> Option<PathBuf> {
        let candidate = env::current_dir().ok()?.join(DEFAULT_CONFIG_FILENAME);
        candidate.exists().then_some(candidate)
    }
}

fn validate_config(config: &AppConfig) -> Result<()> {
    parse_log_level(&config.logging.level)?;
    Ok(())
}

/// Parse a log level string to a tracing Level
pub fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" | "warning" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => Err(Error::configuration(format!(
            "Invalid log level: {level}. Use trace, debug, info, warn, or error"
        ))),
    }
}

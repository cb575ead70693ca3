use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::view::DEFAULT_DESCRIPTION_LIMIT;

/// Name of the optional config file looked up in the current directory
/// (`recipe-browser.toml`)
pub const CONFIG_FILE_NAME: &str = "recipe-browser";

/// Prefix of environment overrides, e.g. `RECIPE_BROWSER__DATA_SOURCE`
pub const ENV_PREFIX: &str = "RECIPE_BROWSER";

/// Browser configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct BrowserConfig {
    /// Path or http(s) URL of the JSON recipe list
    #[serde(default = "default_data_source")]
    pub data_source: String,
    /// Request timeout in seconds for remote recipe lists
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// Characters of the description shown on a result card
    #[serde(default = "default_description_limit")]
    pub description_limit: usize,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            data_source: default_data_source(),
            timeout: default_timeout(),
            description_limit: default_description_limit(),
        }
    }
}

fn default_data_source() -> String {
    "./data.json".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_description_limit() -> usize {
    DEFAULT_DESCRIPTION_LIMIT
}

impl BrowserConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BROWSER__ prefix
    /// 2. recipe-browser.toml in the current directory
    /// 3. Default values
    pub fn load() -> Result<Self, ConfigError> {
        load_config(None)
    }

    /// Same as [`BrowserConfig::load`] but reads the given file, which must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        load_config(Some(path))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from an optional explicit file and environment variables
///
/// Environment variable format: RECIPE_BROWSER__DATA_SOURCE
pub fn load_config(path: Option<&Path>) -> Result<BrowserConfig, ConfigError> {
    let file = match path {
        Some(path) => File::from(path).required(true),
        None => File::with_name(CONFIG_FILE_NAME).required(false),
    };

    let settings = Config::builder()
        .add_source(file)
        .add_source(
            Environment::with_prefix(ENV_PREFIX)
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

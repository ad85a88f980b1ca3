//! Configuration loading utilities

use crate::Config;
use lingo_common::Result as LingoResult;
use std::env;
use std::path::Path;
use thiserror::Error;
use tracing::debug;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for lingo_common::LingoError {
    fn from(err: ConfigError) -> Self {
        lingo_common::LingoError::config(err.to_string())
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        debug!("Loading configuration from {}", path.as_ref().display());
        let content = std::fs::read_to_string(path.as_ref())?;
        let mut config: Config = serde_yaml::from_str(&content)?;

        Self::apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from the default locations with env overrides
    pub fn load() -> LingoResult<Config> {
        let config = if let Ok(config_path) = env::var("LINGO_CONFIG_PATH") {
            Self::load_config(&config_path)?
        } else if Path::new("config.yaml").exists() {
            Self::load_config("config.yaml")?
        } else if Path::new("config.yml").exists() {
            Self::load_config("config.yml")?
        } else {
            // No config file found, use defaults with env overrides
            let mut config = Config::default();
            Self::apply_env_overrides(&mut config)?;
            config.validate_all().map_err(ConfigError::Validation)?;
            config
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> LingoResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        if let Ok(token) = env::var("DISCORD_TOKEN") {
            config.discord.token = token;
        }

        if let Ok(auth_key) = env::var("DEEPL_AUTH_KEY") {
            config.deepl.auth_key = auth_key;
        }

        if let Ok(api_url) = env::var("DEEPL_API_URL") {
            config.deepl.api_url = api_url;
        }

        if let Ok(timeout) = env::var("DEEPL_TIMEOUT") {
            config.deepl.timeout_seconds =
                timeout.parse().map_err(|e| ConfigError::EnvParse {
                    var: "DEEPL_TIMEOUT".to_string(),
                    source: Box::new(e),
                })?;
        }

        if let Ok(retries) = env::var("DEEPL_MAX_RETRIES") {
            config.deepl.max_retries = retries.parse().map_err(|e| ConfigError::EnvParse {
                var: "DEEPL_MAX_RETRIES".to_string(),
                source: Box::new(e),
            })?;
        }

        if let Ok(path) = env::var("LINGO_DICT_PATH") {
            config.dictionary.path = path;
        }

        if let Ok(level) = env::var("LINGO_LOG_LEVEL") {
            config.logging.level = level;
        }

        if let Ok(owners) = env::var("LINGO_OWNER_IDS") {
            config.discord.owner_ids = owners
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(|s| {
                    s.parse().map_err(|e| ConfigError::EnvParse {
                        var: "LINGO_OWNER_IDS".to_string(),
                        source: Box::new(e),
                    })
                })
                .collect::<Result<Vec<u64>, _>>()?;
        }

        Ok(())
    }
}

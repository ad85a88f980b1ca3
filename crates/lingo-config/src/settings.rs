//! Application configuration structures

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Discord-related configuration
    #[validate]
    pub discord: DiscordConfig,

    /// DeepL translation provider configuration
    #[validate]
    pub deepl: DeepLConfig,

    /// Override dictionary configuration
    #[validate]
    pub dictionary: DictionaryConfig,

    /// Logging configuration
    pub logging: LoggingSettings,
}

/// Discord bot configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token
    #[validate(length(min = 1, message = "Discord token cannot be empty"))]
    pub token: String,

    /// Bot owner user IDs (always allowed to remove dictionary entries)
    pub owner_ids: Vec<u64>,

    /// Role IDs granting the elevated moderation capability
    pub moderator_role_ids: Vec<u64>,

    /// Request timeout in seconds for Discord API calls
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub request_timeout_seconds: u64,
}

/// DeepL API configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DeepLConfig {
    /// DeepL API base URL (free tier by default)
    #[validate(length(min = 1, message = "DeepL API URL cannot be empty"))]
    pub api_url: String,

    /// DeepL authentication key
    #[validate(length(min = 1, message = "DeepL auth key cannot be empty"))]
    pub auth_key: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300, message = "Timeout must be between 1 and 300 seconds"))]
    pub timeout_seconds: u64,

    /// Maximum number of retries for failed requests
    #[validate(range(max = 10, message = "Max retries cannot exceed 10"))]
    pub max_retries: u32,

    /// Rate limit: requests per second
    #[validate(range(min = 1, max = 100, message = "Rate limit must be between 1 and 100"))]
    pub rate_limit_per_sec: u32,
}

/// Override dictionary configuration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DictionaryConfig {
    /// Path to the dictionary snapshot file
    #[validate(length(min = 1, message = "Dictionary path cannot be empty"))]
    pub path: String,

    /// Whether the explicit /translate command consults the dictionary
    /// before calling the provider. Off by default: the command always
    /// calls the provider, only the reaction path is dictionary-first.
    pub command_uses_dictionary: bool,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level filter (trace, debug, info, warn, error)
    pub level: String,

    /// Optional log file path
    pub file: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            deepl: DeepLConfig::default(),
            dictionary: DictionaryConfig::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            owner_ids: Vec::new(),
            moderator_role_ids: Vec::new(),
            request_timeout_seconds: 30,
        }
    }
}

impl Default for DeepLConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api-free.deepl.com".to_string(),
            auth_key: String::new(),
            timeout_seconds: 30,
            max_retries: 3,
            rate_limit_per_sec: 10,
        }
    }
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        Self {
            path: "dictionary.json".to_string(),
            command_uses_dictionary: false,
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Validate the whole configuration tree
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        self.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.deepl.api_url, "https://api-free.deepl.com");
        assert_eq!(config.deepl.max_retries, 3);
        assert_eq!(config.dictionary.path, "dictionary.json");
        assert!(!config.dictionary.command_uses_dictionary);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_validation_rejects_empty_token() {
        let config = Config::default();
        // Defaults have no token or auth key, so validation must fail
        assert!(config.validate_all().is_err());
    }

    #[test]
    fn test_validation_accepts_filled_config() {
        let mut config = Config::default();
        config.discord.token = "token".to_string();
        config.deepl.auth_key = "key".to_string();
        assert!(config.validate_all().is_ok());
    }
}

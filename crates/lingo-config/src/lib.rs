//! Configuration management for the lingo bot

pub mod loader;
pub mod settings;

pub use loader::{ConfigError, ConfigLoader};
pub use settings::{Config, DeepLConfig, DictionaryConfig, DiscordConfig, LoggingSettings};

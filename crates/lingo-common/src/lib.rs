//! Common error types, logging, and utilities for the lingo bot

pub mod error;
pub mod logging;
pub mod utils;

// Re-export commonly used types
pub use error::{LingoError, ProviderErrorKind, Result};
pub use logging::{init_default_logging, init_logging, LoggingConfig};

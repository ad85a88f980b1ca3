//! Error types and utilities for the lingo bot

use thiserror::Error;

/// Result type alias for lingo operations
pub type Result<T> = std::result::Result<T, LingoError>;

/// Classifies provider failures so callers can report them meaningfully
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderErrorKind {
    /// Authentication failed (invalid or missing API key)
    Auth,
    /// Usage quota exhausted or too many requests
    Quota,
    /// The target language is not supported by the provider
    UnsupportedLanguage,
    /// Network-level failure (timeout, connection, 5xx)
    Network,
}

impl ProviderErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderErrorKind::Auth => "auth",
            ProviderErrorKind::Quota => "quota",
            ProviderErrorKind::UnsupportedLanguage => "unsupported language",
            ProviderErrorKind::Network => "network",
        }
    }
}

/// Main error type for lingo operations
#[derive(Error, Debug)]
pub enum LingoError {
    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Translation provider errors (auth, quota, unsupported language, network)
    #[error("Translation provider error ({}): {}", .kind.as_str(), .message)]
    Provider {
        kind: ProviderErrorKind,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Dictionary persistence errors (snapshot unreadable or unwritable)
    #[error("Persistence error: {message}")]
    Persistence {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A dictionary entry was not found
    #[error("No dictionary entry for \"{original}\" ({language})")]
    NotFound { original: String, language: String },

    /// The requester is not allowed to perform the operation
    #[error("Permission denied: {message}")]
    PermissionDenied { message: String },

    /// Validation errors for user input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Discord API related errors
    #[error("Discord API error: {message}")]
    Discord {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Generic error with custom message
    #[error("{message}")]
    Generic {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl LingoError {
    /// Create a new generic error with a custom message
    pub fn new(msg: impl Into<String>) -> Self {
        Self::Generic {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new provider error of the given kind
    pub fn provider(kind: ProviderErrorKind, msg: impl Into<String>) -> Self {
        Self::Provider {
            kind,
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new provider error with source
    pub fn provider_with_source(
        kind: ProviderErrorKind,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Provider {
            kind,
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new persistence error with source
    pub fn persistence_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Persistence {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new not-found error for a dictionary key
    pub fn not_found(original: impl Into<String>, language: impl Into<String>) -> Self {
        Self::NotFound {
            original: original.into(),
            language: language.into(),
        }
    }

    /// Create a new permission-denied error
    pub fn permission_denied(msg: impl Into<String>) -> Self {
        Self::PermissionDenied {
            message: msg.into(),
        }
    }

    /// Create a new validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: None,
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new Discord API error
    pub fn discord(msg: impl Into<String>) -> Self {
        Self::Discord {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new Discord API error with source
    pub fn discord_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Discord {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether this error is an expected user-facing outcome rather than a fault
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::PermissionDenied { .. } | Self::Validation { .. }
        )
    }
}

/// Convert from reqwest::Error to LingoError
impl From<reqwest::Error> for LingoError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::provider_with_source(ProviderErrorKind::Network, "Request timeout", err)
        } else if err.is_connect() {
            Self::provider_with_source(ProviderErrorKind::Network, "Connection failed", err)
        } else if err.is_status() {
            let status = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::provider_with_source(
                ProviderErrorKind::Network,
                format!("HTTP error: {}", status),
                err,
            )
        } else {
            Self::provider_with_source(ProviderErrorKind::Network, "Network request failed", err)
        }
    }
}

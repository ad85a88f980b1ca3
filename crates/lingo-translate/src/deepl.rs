//! DeepL API client with connection pooling and rate limiting
//!
//! Thin client for the DeepL text translation endpoint with typed error
//! mapping (auth, quota, unsupported language, network), request rate
//! limiting, and retry with exponential backoff for transient failures.

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota};
use lingo_common::{LingoError, ProviderErrorKind, Result};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::{num::NonZeroU32, sync::Arc, time::Duration};
use tokio_retry::{strategy::ExponentialBackoff, RetryIf};
use tracing::{debug, instrument, warn};

/// A successful provider translation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// The translated text
    pub text: String,
    /// Source language code detected by the provider (e.g. "FR")
    pub detected_source_language: String,
}

/// Boundary to the external translation provider. The resolution engine
/// depends on this trait so tests can substitute a scripted provider.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Translate `text` into `target_language` (provider language code)
    async fn translate(&self, text: &str, target_language: &str) -> Result<Translation>;
}

/// Configuration for the DeepL API client
#[derive(Debug, Clone)]
pub struct DeepLClientConfig {
    /// Base URL of the DeepL API (e.g. "https://api-free.deepl.com")
    pub base_url: String,
    /// Authentication key
    pub auth_key: String,
    /// Request timeout in seconds (default: 30)
    pub timeout_secs: u64,
    /// Rate limit: requests per second (default: 10)
    pub rate_limit_per_sec: u32,
    /// Maximum number of retry attempts for transient failures (default: 3)
    pub max_retries: usize,
}

impl Default for DeepLClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api-free.deepl.com".to_string(),
            auth_key: String::new(),
            timeout_secs: 30,
            rate_limit_per_sec: 10,
            max_retries: 3,
        }
    }
}

impl DeepLClientConfig {
    /// Create a new configuration with the minimum required parameters
    pub fn new(base_url: impl Into<String>, auth_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_key: auth_key.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Set the rate limit
    pub fn with_rate_limit(mut self, rate_limit_per_sec: u32) -> Self {
        self.rate_limit_per_sec = rate_limit_per_sec;
        self
    }

    /// Set the maximum retry attempts
    pub fn with_max_retries(mut self, max_retries: usize) -> Self {
        self.max_retries = max_retries;
        self
    }
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
struct TranslatedText {
    detected_source_language: String,
    text: String,
}

/// DeepL API client
#[derive(Debug, Clone)]
pub struct DeepLClient {
    client: Client,
    config: DeepLClientConfig,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl DeepLClient {
    /// Create a new DeepL client with the given configuration
    pub fn new(config: DeepLClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| {
                LingoError::provider_with_source(
                    ProviderErrorKind::Network,
                    "Failed to create HTTP client",
                    e,
                )
            })?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit_per_sec)
                .ok_or_else(|| LingoError::config("Rate limit must be greater than 0"))?,
        );
        let rate_limiter = Arc::new(DefaultDirectRateLimiter::direct(quota));

        Ok(Self {
            client,
            config,
            rate_limiter,
        })
    }

    fn translate_url(&self) -> String {
        format!("{}/v2/translate", self.config.base_url.trim_end_matches('/'))
    }

    /// Only transient failures are worth retrying; auth, quota, and bad
    /// request errors will not change on a second attempt.
    fn is_retryable(error: &LingoError) -> bool {
        matches!(
            error,
            LingoError::Provider {
                kind: ProviderErrorKind::Network,
                ..
            }
        )
    }

    async fn send_once(&self, text: &str, target_language: &str) -> Result<Translation> {
        let response = self
            .client
            .post(self.translate_url())
            .header(
                "Authorization",
                format!("DeepL-Auth-Key {}", self.config.auth_key),
            )
            .form(&[("text", text), ("target_lang", target_language)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Self::map_error_status(status, &body));
        }

        let parsed: TranslateResponse = response.json().await.map_err(|e| {
            LingoError::provider_with_source(
                ProviderErrorKind::Network,
                "Failed to parse DeepL response",
                e,
            )
        })?;

        let translation = parsed.translations.into_iter().next().ok_or_else(|| {
            LingoError::provider(
                ProviderErrorKind::Network,
                "DeepL response contained no translations",
            )
        })?;

        Ok(Translation {
            text: translation.text,
            detected_source_language: translation.detected_source_language,
        })
    }

    fn map_error_status(status: StatusCode, body: &str) -> LingoError {
        let detail = if body.is_empty() {
            status.to_string()
        } else {
            format!("{}: {}", status, body)
        };

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LingoError::provider(
                ProviderErrorKind::Auth,
                format!("Authentication failed ({})", detail),
            ),
            StatusCode::TOO_MANY_REQUESTS => LingoError::provider(
                ProviderErrorKind::Quota,
                format!("Too many requests ({})", detail),
            ),
            // 456 is DeepL's "quota exceeded"
            s if s.as_u16() == 456 => LingoError::provider(
                ProviderErrorKind::Quota,
                format!("Translation quota exceeded ({})", detail),
            ),
            StatusCode::BAD_REQUEST => LingoError::provider(
                ProviderErrorKind::UnsupportedLanguage,
                format!("Request rejected ({})", detail),
            ),
            _ => LingoError::provider(
                ProviderErrorKind::Network,
                format!("DeepL returned {}", detail),
            ),
        }
    }
}

#[async_trait]
impl Translator for DeepLClient {
    #[instrument(skip(self, text), fields(target = %target_language))]
    async fn translate(&self, text: &str, target_language: &str) -> Result<Translation> {
        self.rate_limiter.until_ready().await;

        debug!("Requesting translation of {} chars", text.chars().count());

        let retry_strategy = ExponentialBackoff::from_millis(100)
            .max_delay(Duration::from_secs(10))
            .take(self.config.max_retries);

        let result = RetryIf::spawn(
            retry_strategy,
            || self.send_once(text, target_language),
            Self::is_retryable,
        )
        .await;

        if let Err(ref e) = result {
            warn!("DeepL request failed: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_translate_url_trims_trailing_slash() {
        let client =
            DeepLClient::new(DeepLClientConfig::new("https://api-free.deepl.com/", "k")).unwrap();
        assert_eq!(
            client.translate_url(),
            "https://api-free.deepl.com/v2/translate"
        );
    }

    #[test]
    fn test_error_status_mapping() {
        let auth = DeepLClient::map_error_status(StatusCode::FORBIDDEN, "");
        assert!(matches!(
            auth,
            LingoError::Provider {
                kind: ProviderErrorKind::Auth,
                ..
            }
        ));

        let quota = DeepLClient::map_error_status(StatusCode::from_u16(456).unwrap(), "quota");
        assert!(matches!(
            quota,
            LingoError::Provider {
                kind: ProviderErrorKind::Quota,
                ..
            }
        ));

        let unsupported = DeepLClient::map_error_status(StatusCode::BAD_REQUEST, "bad target_lang");
        assert!(matches!(
            unsupported,
            LingoError::Provider {
                kind: ProviderErrorKind::UnsupportedLanguage,
                ..
            }
        ));

        let server = DeepLClient::map_error_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(matches!(
            server,
            LingoError::Provider {
                kind: ProviderErrorKind::Network,
                ..
            }
        ));
    }

    #[test]
    fn test_only_network_errors_are_retryable() {
        assert!(DeepLClient::is_retryable(&LingoError::provider(
            ProviderErrorKind::Network,
            "503"
        )));
        assert!(!DeepLClient::is_retryable(&LingoError::provider(
            ProviderErrorKind::Auth,
            "bad key"
        )));
        assert!(!DeepLClient::is_retryable(&LingoError::provider(
            ProviderErrorKind::Quota,
            "456"
        )));
    }

    #[test]
    fn test_config_builders() {
        let config = DeepLClientConfig::new("https://api.deepl.com", "key")
            .with_timeout(5)
            .with_rate_limit(2)
            .with_max_retries(1);
        assert_eq!(config.timeout_secs, 5);
        assert_eq!(config.rate_limit_per_sec, 2);
        assert_eq!(config.max_retries, 1);
    }

    #[test]
    fn test_zero_rate_limit_is_rejected() {
        let config = DeepLClientConfig::new("https://api.deepl.com", "key").with_rate_limit(0);
        assert!(DeepLClient::new(config).is_err());
    }
}

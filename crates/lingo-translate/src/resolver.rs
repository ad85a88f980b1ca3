//! Translation resolution engine
//!
//! Decides, for a (source text, target language, scope) triple, whether to
//! answer from the community dictionary, call the provider, or suppress the
//! reply because translation added no information.

use std::sync::Arc;

use lingo_common::{LingoError, Result};
use lingo_dict::{DictionaryEntry, DictionaryStore};
use tracing::{debug, instrument, warn};

use crate::deepl::{Translation, Translator};

/// Outcome of resolving one translation request
#[derive(Debug)]
pub enum Resolution {
    /// A stored override entry satisfied the request; the provider was not
    /// contacted
    DictionaryHit(DictionaryEntry),
    /// The provider produced a meaningful translation
    Translated {
        text: String,
        detected_source_language: String,
    },
    /// The translation added no information (empty or identical to the
    /// source); the caller must not reply
    Suppressed,
    /// The provider failed; carries the error detail for reporting
    Failed(LingoError),
}

/// Resolution engine combining the dictionary store and a provider
pub struct Resolver {
    store: Arc<DictionaryStore>,
    provider: Arc<dyn Translator>,
}

impl Resolver {
    pub fn new(store: Arc<DictionaryStore>, provider: Arc<dyn Translator>) -> Self {
        Self { store, provider }
    }

    /// Resolve a translation request: dictionary first, provider fallback,
    /// suppression when the output adds nothing. Never returns an error;
    /// provider failures are captured in `Resolution::Failed`.
    #[instrument(skip(self, text), fields(target = %target_language, scope = %scope))]
    pub async fn resolve(&self, text: &str, target_language: &str, scope: &str) -> Resolution {
        let target = target_language.trim().to_uppercase();

        // Dictionary entries always take precedence over the provider. A
        // sick dictionary file must not break the translation path, so a
        // persistence error here degrades to the provider with a warning.
        match self.store.lookup(text, &target, scope) {
            Ok(Some(entry)) => {
                debug!("Dictionary hit for key {}", entry.key());
                return Resolution::DictionaryHit(entry);
            }
            Ok(None) => {}
            Err(e) => warn!("Dictionary lookup failed, falling back to provider: {}", e),
        }

        match self.provider.translate(text, &target).await {
            Ok(translation) => {
                if is_noop(text, &translation.text) {
                    debug!("Provider output added no information, suppressing");
                    Resolution::Suppressed
                } else {
                    Resolution::Translated {
                        text: translation.text,
                        detected_source_language: translation.detected_source_language,
                    }
                }
            }
            Err(e) => Resolution::Failed(e),
        }
    }

    /// Provider-only path used by the explicit command when the unified
    /// dictionary policy is off. No dictionary lookup, no suppression.
    pub async fn translate_direct(&self, text: &str, target_language: &str) -> Result<Translation> {
        self.provider
            .translate(text, &target_language.trim().to_uppercase())
            .await
    }
}

/// A translation is a no-op when its trimmed text is empty or equals the
/// source case-insensitively.
fn is_noop(source: &str, translated: &str) -> bool {
    translated.trim().is_empty() || translated.to_lowercase() == source.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use lingo_common::ProviderErrorKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Scripted provider recording how often it was called
    struct ScriptedProvider {
        response: Result<Translation>,
        calls: AtomicUsize,
    }

    impl ScriptedProvider {
        fn ok(text: &str, detected: &str) -> Self {
            Self {
                response: Ok(Translation {
                    text: text.to_string(),
                    detected_source_language: detected.to_string(),
                }),
                calls: AtomicUsize::new(0),
            }
        }

        fn err(kind: ProviderErrorKind, message: &str) -> Self {
            Self {
                response: Err(LingoError::provider(kind, message)),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Translator for ScriptedProvider {
        async fn translate(&self, _text: &str, _target_language: &str) -> Result<Translation> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(t) => Ok(t.clone()),
                Err(e) => Err(LingoError::new(e.to_string())),
            }
        }
    }

    fn store_with_entry(dir: &tempfile::TempDir, entry: DictionaryEntry) -> Arc<DictionaryStore> {
        let store = DictionaryStore::new(dir.path().join("dict.json"));
        let mut snapshot = lingo_dict::store::Snapshot::new();
        snapshot.insert(entry.key(), entry);
        store.save(&snapshot).unwrap();
        Arc::new(store)
    }

    fn empty_store(dir: &tempfile::TempDir) -> Arc<DictionaryStore> {
        Arc::new(DictionaryStore::new(dir.path().join("dict.json")))
    }

    #[tokio::test]
    async fn test_dictionary_hit_bypasses_provider() {
        let dir = tempfile::tempdir().unwrap();
        let entry = DictionaryEntry::new("good morning", "좋은 아침", "KO", "1", "guild1");
        let store = store_with_entry(&dir, entry);
        let provider = Arc::new(ScriptedProvider::ok("should not be used", "EN"));

        let resolver = Resolver::new(store, provider.clone());
        let resolution = resolver.resolve("good morning", "KO", "guild1").await;

        match resolution {
            Resolution::DictionaryHit(hit) => assert_eq!(hit.translation, "좋은 아침"),
            other => panic!("expected dictionary hit, got {:?}", other),
        }
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_dictionary_hit_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        let entry = DictionaryEntry::new("Hello", "안녕", "KO", "1", "guild1");
        let store = store_with_entry(&dir, entry);
        let provider = Arc::new(ScriptedProvider::ok("x", "EN"));

        let resolver = Resolver::new(store, provider);
        let resolution = resolver.resolve("hello", "ko", "guild1").await;
        assert!(matches!(resolution, Resolution::DictionaryHit(_)));
    }

    #[tokio::test]
    async fn test_entry_in_other_scope_does_not_hit() {
        let dir = tempfile::tempdir().unwrap();
        let entry = DictionaryEntry::new("hello", "안녕", "KO", "1", "guild1");
        let store = store_with_entry(&dir, entry);
        let provider = Arc::new(ScriptedProvider::ok("안녕하세요", "EN"));

        let resolver = Resolver::new(store, provider.clone());
        let resolution = resolver.resolve("hello", "KO", "guild2").await;

        assert!(matches!(resolution, Resolution::Translated { .. }));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_provider_result_carries_detected_language() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let provider = Arc::new(ScriptedProvider::ok("Good morning", "FR"));

        let resolver = Resolver::new(store, provider);
        let resolution = resolver.resolve("bonjour", "EN-US", "guild1").await;

        match resolution {
            Resolution::Translated {
                text,
                detected_source_language,
            } => {
                assert_eq!(text, "Good morning");
                assert_eq!(detected_source_language, "FR");
            }
            other => panic!("expected translated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_identical_output_is_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let provider = Arc::new(ScriptedProvider::ok("OK", "EN"));

        let resolver = Resolver::new(store, provider);
        let resolution = resolver.resolve("OK", "EN-US", "guild1").await;
        assert!(matches!(resolution, Resolution::Suppressed));
    }

    #[tokio::test]
    async fn test_case_differing_output_is_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let provider = Arc::new(ScriptedProvider::ok("Hello", "EN"));

        let resolver = Resolver::new(store, provider);
        let resolution = resolver.resolve("hello", "EN-US", "guild1").await;
        assert!(matches!(resolution, Resolution::Suppressed));
    }

    #[tokio::test]
    async fn test_empty_output_is_suppressed() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let provider = Arc::new(ScriptedProvider::ok("   ", "EN"));

        let resolver = Resolver::new(store, provider);
        let resolution = resolver.resolve("hello", "KO", "guild1").await;
        assert!(matches!(resolution, Resolution::Suppressed));
    }

    #[tokio::test]
    async fn test_provider_failure_is_captured_not_raised() {
        let dir = tempfile::tempdir().unwrap();
        let store = empty_store(&dir);
        let provider = Arc::new(ScriptedProvider::err(ProviderErrorKind::Quota, "quota"));

        let resolver = Resolver::new(store, provider);
        let resolution = resolver.resolve("hello", "KO", "guild1").await;
        assert!(matches!(resolution, Resolution::Failed(_)));
    }

    #[tokio::test]
    async fn test_corrupt_dictionary_degrades_to_provider() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dict.json");
        std::fs::write(&path, "{broken").unwrap();
        let store = Arc::new(DictionaryStore::new(path));
        let provider = Arc::new(ScriptedProvider::ok("안녕", "EN"));

        let resolver = Resolver::new(store, provider.clone());
        let resolution = resolver.resolve("hello", "KO", "guild1").await;

        assert!(matches!(resolution, Resolution::Translated { .. }));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_translate_direct_skips_dictionary_and_suppression() {
        let dir = tempfile::tempdir().unwrap();
        let entry = DictionaryEntry::new("hello", "안녕", "KO", "1", "guild1");
        let store = store_with_entry(&dir, entry);
        let provider = Arc::new(ScriptedProvider::ok("hello", "EN"));

        let resolver = Resolver::new(store, provider.clone());
        let translation = resolver.translate_direct("hello", "ko").await.unwrap();

        // Identical text is still returned on the direct path
        assert_eq!(translation.text, "hello");
        assert_eq!(provider.call_count(), 1);
    }

    #[test]
    fn test_noop_detection() {
        assert!(is_noop("OK", "OK"));
        assert!(is_noop("Hello", "hello"));
        assert!(is_noop("anything", "  "));
        assert!(!is_noop("bonjour", "Good morning"));
    }
}

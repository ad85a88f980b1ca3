//! Dictionary entry model and key normalization

use serde::{Deserialize, Serialize};

/// Scope sentinel for entries added outside a guild (direct messages)
pub const DM_SCOPE: &str = "DM";

/// A single community override entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    /// Source text, matched case-insensitively
    pub original: String,
    /// Stored translated text
    pub translation: String,
    /// Target language code (DeepL format, e.g. "KO", "EN-US")
    pub language: String,
    /// Discord user ID of the author who created the entry
    pub added_by: String,
    /// Guild ID the entry belongs to, or "DM" for direct messages
    pub server_id: String,
}

impl DictionaryEntry {
    /// Create a new entry, normalizing the language code to uppercase
    pub fn new(
        original: impl Into<String>,
        translation: impl Into<String>,
        language: impl Into<String>,
        added_by: impl Into<String>,
        server_id: impl Into<String>,
    ) -> Self {
        Self {
            original: original.into(),
            translation: translation.into(),
            language: language.into().trim().to_uppercase(),
            added_by: added_by.into(),
            server_id: server_id.into(),
        }
    }

    /// The store key for this entry
    pub fn key(&self) -> String {
        entry_key(&self.original, &self.language)
    }
}

/// Compute the store key for an (original, language) pair.
///
/// Keys are case-insensitive: the original is lowercased and the language
/// code uppercased, so `("Hello", "ko")` and `("hello", "KO")` collide
/// intentionally.
pub fn entry_key(original: &str, language: &str) -> String {
    format!(
        "{}_{}",
        original.trim().to_lowercase(),
        language.trim().to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_key_is_case_insensitive() {
        assert_eq!(entry_key("Hello", "ko"), entry_key("hello", "KO"));
        assert_eq!(entry_key("  Hello ", "KO"), "hello_KO");
    }

    #[test]
    fn test_entry_key_format() {
        assert_eq!(entry_key("Good Morning", "en-us"), "good morning_EN-US");
    }

    #[test]
    fn test_new_normalizes_language() {
        let entry = DictionaryEntry::new("hi", "안녕", " ko ", "42", DM_SCOPE);
        assert_eq!(entry.language, "KO");
        assert_eq!(entry.key(), "hi_KO");
    }

    #[test]
    fn test_serialized_field_names() {
        let entry = DictionaryEntry::new("hi", "안녕", "KO", "42", "guild1");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["original"], "hi");
        assert_eq!(json["translation"], "안녕");
        assert_eq!(json["language"], "KO");
        assert_eq!(json["added_by"], "42");
        assert_eq!(json["server_id"], "guild1");
    }
}

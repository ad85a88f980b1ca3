//! Server-scoped override dictionary store for the lingo bot
//!
//! The dictionary lets a community pin preferred translations for known
//! phrases. Entries are keyed by `<lowercased original>_<UPPERCASED
//! language>` and persisted as a single JSON snapshot that is rewritten
//! in full on every mutation.

pub mod entry;
pub mod store;

pub use entry::{entry_key, DictionaryEntry, DM_SCOPE};
pub use store::DictionaryStore;

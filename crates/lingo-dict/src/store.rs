//! Snapshot-persisted dictionary store
//!
//! The store is deliberately stateless between operations: every read and
//! every mutation loads the snapshot fresh from disk, mutates in memory,
//! and writes the whole snapshot back. Mutations are serialized through an
//! in-process mutex and snapshots are written via temp-file-then-rename so
//! a crash can never leave a partial file behind.

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use lingo_common::{LingoError, Result};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::entry::{entry_key, DictionaryEntry};

/// Snapshot type: key -> entry, ordered for stable serialization
pub type Snapshot = BTreeMap<String, DictionaryEntry>;

/// Dictionary store backed by a single JSON snapshot file
#[derive(Debug)]
pub struct DictionaryStore {
    /// Path of the snapshot file
    path: PathBuf,
    /// Serializes the load-mutate-save cycle of all mutations
    write_lock: Mutex<()>,
}

impl DictionaryStore {
    /// Create a store for the given snapshot path. The file is not touched
    /// until the first operation.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path of the snapshot file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the full snapshot. An absent file is an empty store; a file
    /// that exists but cannot be read or parsed is a persistence error.
    pub fn load(&self) -> Result<Snapshot> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(|e| {
                LingoError::persistence_with_source(
                    format!("Dictionary snapshot at {} is corrupt", self.path.display()),
                    e,
                )
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Snapshot::new()),
            Err(e) => Err(LingoError::persistence_with_source(
                format!("Failed to read dictionary snapshot at {}", self.path.display()),
                e,
            )),
        }
    }

    /// Write the full snapshot atomically: serialize to a temp file in the
    /// same directory, then rename over the target.
    pub fn save(&self, entries: &Snapshot) -> Result<()> {
        let dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        let mut tmp = NamedTempFile::new_in(dir).map_err(|e| {
            LingoError::persistence_with_source("Failed to create temporary snapshot file", e)
        })?;

        let json = serde_json::to_string_pretty(entries).map_err(|e| {
            LingoError::persistence_with_source("Failed to serialize dictionary snapshot", e)
        })?;
        tmp.write_all(json.as_bytes()).map_err(|e| {
            LingoError::persistence_with_source("Failed to write dictionary snapshot", e)
        })?;

        tmp.persist(&self.path).map_err(|e| {
            LingoError::persistence_with_source(
                format!("Failed to replace snapshot at {}", self.path.display()),
                e,
            )
        })?;

        debug!("Persisted dictionary snapshot with {} entries", entries.len());
        Ok(())
    }

    /// Insert or overwrite an entry and persist. A prior entry at the same
    /// key is silently replaced (last write wins) and returned so the
    /// caller can mention the overwrite.
    pub async fn add(&self, entry: DictionaryEntry) -> Result<Option<DictionaryEntry>> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load()?;
        let key = entry.key();
        let previous = entries.insert(key.clone(), entry);
        self.save(&entries)?;

        if previous.is_some() {
            info!("Replaced dictionary entry {}", key);
        } else {
            info!("Added dictionary entry {}", key);
        }
        Ok(previous)
    }

    /// Remove an entry for the given scope. Fails with `NotFound` if no
    /// entry exists at the key in that scope, and with `PermissionDenied`
    /// if the requester is neither the author nor elevated; the store is
    /// left unchanged in both cases. Returns the removed entry.
    pub async fn remove(
        &self,
        original: &str,
        language: &str,
        scope: &str,
        requester: &str,
        elevated: bool,
    ) -> Result<DictionaryEntry> {
        let _guard = self.write_lock.lock().await;

        let mut entries = self.load()?;
        let key = entry_key(original, language);

        let removed = match entries.remove(&key) {
            Some(entry) if entry.server_id == scope => entry,
            _ => {
                return Err(LingoError::not_found(
                    original.trim(),
                    language.trim().to_uppercase(),
                ))
            }
        };

        if removed.added_by != requester && !elevated {
            // Nothing was saved, so the persisted store is unchanged
            return Err(LingoError::permission_denied(format!(
                "Only the author or a moderator can remove \"{}\"",
                removed.original
            )));
        }

        self.save(&entries)?;

        info!("Removed dictionary entry {} by {}", key, requester);
        Ok(removed)
    }

    /// Exact-key lookup within a scope, used by the resolution engine
    pub fn lookup(
        &self,
        original: &str,
        language: &str,
        scope: &str,
    ) -> Result<Option<DictionaryEntry>> {
        let entries = self.load()?;
        let key = entry_key(original, language);
        Ok(entries
            .get(&key)
            .filter(|entry| entry.server_id == scope)
            .cloned())
    }

    /// Case-insensitive substring search on `original`, scoped exactly,
    /// optionally filtered to one language. Callers cap displayed results.
    pub fn search(
        &self,
        query: &str,
        scope: &str,
        language: Option<&str>,
    ) -> Result<Vec<DictionaryEntry>> {
        let entries = self.load()?;
        let needle = query.trim().to_lowercase();
        let language = language.map(|l| l.trim().to_uppercase());

        Ok(entries
            .into_values()
            .filter(|entry| entry.server_id == scope)
            .filter(|entry| entry.original.to_lowercase().contains(&needle))
            .filter(|entry| {
                language
                    .as_deref()
                    .map_or(true, |lang| entry.language == lang)
            })
            .collect())
    }

    /// All entries whose scope matches exactly
    pub fn list_by_scope(&self, scope: &str) -> Result<Vec<DictionaryEntry>> {
        let entries = self.load()?;
        Ok(entries
            .into_values()
            .filter(|entry| entry.server_id == scope)
            .collect())
    }
}

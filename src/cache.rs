//! Persistent response cache.
//!
//! The cache is a single JSON object mapping cache keys to full raw response
//! text. It is loaded once when the cache is opened, mutated in memory on every
//! miss, and the whole table is rewritten to disk after each `put`. Entries
//! never expire.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error_handling::CacheError;

/// Builds the cache key for a request.
///
/// The key is the JSON serialization of the `(host, path, accept)` triple, so
/// two distinct triples can never produce the same key.
pub fn cache_key(host: &str, path: &str, accept: &str) -> String {
    serde_json::json!([host, path, accept]).to_string()
}

/// Key → raw response store, optionally backed by a file.
#[derive(Debug, Default)]
pub struct ResponseCache {
    path: Option<PathBuf>,
    entries: BTreeMap<String, String>,
}

impl ResponseCache {
    /// Opens the cache file at `path`, loading every entry into memory.
    ///
    /// A missing file yields an empty cache. A file that cannot be read or is
    /// not a JSON object of strings is logged and ignored; it is overwritten on
    /// the next `put`.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(
                    "Ignoring unreadable cache file {}: {e}",
                    path.display()
                );
                BTreeMap::new()
            }
        };
        debug!("Loaded {} cached responses from {}", entries.len(), path.display());
        Self {
            path: Some(path),
            entries,
        }
    }

    /// A cache that lives only for the current process.
    pub fn in_memory() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Stores a response and rewrites the backing file.
    ///
    /// # Errors
    ///
    /// Returns a `CacheError` if the table cannot be serialized or written.
    /// The entry stays in memory either way.
    pub fn put(&mut self, key: String, raw_response: String) -> Result<(), CacheError> {
        self.entries.insert(key, raw_response);
        self.flush()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn flush(&self) -> Result<(), CacheError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&self.entries)?;
        std::fs::write(path, content)?;
        debug!("Wrote {} cached responses to {}", self.entries.len(), path.display());
        Ok(())
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, CacheError> {
    if !path.exists() {
        return Ok(BTreeMap::new());
    }
    let content = std::fs::read_to_string(path)?;
    if content.trim().is_empty() {
        return Ok(BTreeMap::new());
    }
    Ok(serde_json::from_str(&content)?)
}

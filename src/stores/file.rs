//! File-backed storage backend.

use crate::error::{Result, SessionError};
use crate::providers::StorageBackend;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};

/// Key/value storage persisted as a single JSON file.
///
/// The analog of browser `localStorage`: entries survive restarts.
/// The whole map is rewritten on every mutation, which is fine at the
/// two-keys scale sessions need. A corrupt or unreadable file reads as
/// empty; the first write replaces it.
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
    entries: Arc<Mutex<HashMap<String, String>>>,
}

impl FileBackend {
    /// Open (or create) the backend at `path`.
    #[must_use]
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!(path = %path.display(), error = %err, "session file corrupt, starting empty");
                HashMap::new()
            }),
            Err(_) => HashMap::new(),
        };
        Self {
            path,
            entries: Arc::new(Mutex::new(entries)),
        }
    }

    fn flush(&self, entries: &HashMap<String, String>) -> Result<()> {
        let raw = serde_json::to_string(entries).map_err(|err| SessionError::StorageFailure {
            reason: err.to_string(),
        })?;
        std::fs::write(&self.path, raw).map_err(|err| SessionError::StorageFailure {
            reason: err.to_string(),
        })
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        if entries.remove(key).is_some() {
            if let Err(err) = self.flush(&entries) {
                tracing::warn!(error = %err, "failed to flush session file after removal");
            }
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}

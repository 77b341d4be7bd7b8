use camino::{Utf8Path, Utf8PathBuf};
use indexmap::IndexMap;
use std::fs;
use std::sync::{PoisonError, RwLock};
use thiserror::Error;

/// Errors that can occur while reading or writing a key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("I/O error on store file {path}: {source}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize store: {0}")]
    Serialize(#[source] serde_yaml_ng::Error),

    #[error("Failed to parse store file {path}: {source}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

/// A flat string-to-string store that survives process restarts.
///
/// Implementations must be usable from both the UI thread and the state
/// subscription thread, hence the `Send + Sync` bound.
#[cfg_attr(test, mockall::automock)]
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// YAML-file backed store.
///
/// The whole mapping is held in memory and the file is rewritten on every
/// `set`/`remove`. Keys keep their insertion order in the file.
#[derive(Debug)]
pub struct FileStore {
    path: Utf8PathBuf,
    entries: RwLock<IndexMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`.
    ///
    /// A missing file is an empty store. An unreadable or malformed file is
    /// logged and also treated as empty; it is overwritten on the next write.
    pub fn open<P: AsRef<Utf8Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();

        let entries = match Self::read_entries(&path) {
            Ok(Some(entries)) => {
                tracing::info!("Loaded {} key(s) from store {}", entries.len(), path);
                entries
            }
            Ok(None) => {
                tracing::debug!("Store file {} not found, starting empty", path);
                IndexMap::new()
            }
            Err(e) => {
                tracing::warn!("Ignoring unreadable store: {}", e);
                IndexMap::new()
            }
        };

        Self {
            path,
            entries: RwLock::new(entries),
        }
    }

    fn read_entries(path: &Utf8Path) -> Result<Option<IndexMap<String, String>>, StoreError> {
        if !path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        // An empty file deserializes to unit, not a mapping
        if contents.trim().is_empty() {
            return Ok(Some(IndexMap::new()));
        }

        serde_yaml_ng::from_str(&contents)
            .map(Some)
            .map_err(|source| StoreError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    fn flush(&self, entries: &IndexMap<String, String>) -> Result<(), StoreError> {
        let yaml = serde_yaml_ng::to_string(entries).map_err(StoreError::Serialize)?;

        if let Some(parent) = self
            .path
            .parent()
            .filter(|p| !p.as_str().is_empty() && !p.exists())
        {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, yaml).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })?;

        tracing::trace!("Flushed {} key(s) to {}", entries.len(), self.path);
        Ok(())
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Apply `change` to a copy of the entries and keep it only once the
    /// file has been written, so memory never holds data the disk lacks.
    fn commit<F>(&self, change: F) -> Result<(), StoreError>
    where
        F: FnOnce(&mut IndexMap<String, String>) -> bool,
    {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
        let mut staged = entries.clone();

        if change(&mut staged) {
            self.flush(&staged)?;
            *entries = staged;
        }
        Ok(())
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.commit(|entries| {
            entries.insert(key.to_string(), value.to_string());
            true
        })
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.commit(|entries| entries.shift_remove(key).is_some())
    }
}

/// In-process store, lost on exit. Used by tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<IndexMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `value` under `key`.
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store
            .entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let entries = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .shift_remove(key);
        Ok(())
    }
}

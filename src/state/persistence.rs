use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{StorageError, StorageResult};

/// Storage key of the persisted dressings collection
pub const DRESSINGS_KEY: &str = "siluet:dressings";
/// Storage key of the saved projects list, newest first
pub const PROJECTS_KEY: &str = "siluet:projects";
pub const LOOKBOOKS_KEY: &str = "siluet:lookbooks";

/// Durable string key/value storage.
///
/// Every collection is written whole, so the last write wins.
pub trait KeyValueStore {
    fn get_string(&self, key: &str) -> StorageResult<Option<String>>;

    fn set_string(&mut self, key: &str, value: String) -> StorageResult<()>;

    fn remove(&mut self, key: &str) -> StorageResult<()>;

    /// Push buffered writes to the backing medium
    fn flush(&mut self) -> StorageResult<()> {
        Ok(())
    }
}

/// Read and decode a JSON value. A missing key yields `None`.
pub fn get_json<T: DeserializeOwned>(
    store: &dyn KeyValueStore,
    key: &str,
) -> StorageResult<Option<T>> {
    match store.get_string(key)? {
        Some(json) => Ok(Some(serde_json::from_str(&json)?)),
        None => Ok(None),
    }
}

/// Encode a value as JSON and write it under `key`
pub fn set_json<T: Serialize + ?Sized>(
    store: &mut dyn KeyValueStore,
    key: &str,
    value: &T,
) -> StorageResult<()> {
    let json = serde_json::to_string(value)?;
    store.set_string(key, json)
}

/// In-memory store, optionally with a byte quota on the total stored size
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that refuses writes once the stored values exceed `limit` bytes
    pub fn with_quota(limit: usize) -> Self {
        Self {
            entries: HashMap::new(),
            quota: Some(limit),
        }
    }

    pub fn set_quota(&mut self, limit: Option<usize>) {
        self.quota = limit;
    }

    fn used_without(&self, key: &str) -> usize {
        self.entries
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(_, v)| v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set_string(&mut self, key: &str, value: String) -> StorageResult<()> {
        if let Some(limit) = self.quota {
            if self.used_without(key) + value.len() > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_owned(),
                    limit,
                });
            }
        }
        self.entries.insert(key.to_owned(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Stores each key as a JSON file inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    state_dir: PathBuf,
}

impl FileStore {
    /// The directory is created on the first write
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        Self {
            state_dir: state_dir.into(),
        }
    }

    pub fn state_dir(&self) -> &Path {
        &self.state_dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        // ':' is not portable in file names
        let file_name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.state_dir.join(format!("{file_name}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get_string(&self, key: &str) -> StorageResult<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(json) => Ok(Some(json)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set_string(&mut self, key: &str, value: String) -> StorageResult<()> {
        fs::create_dir_all(&self.state_dir)?;

        // Write then rename so a crash never leaves half a collection behind
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_quota() {
        let mut store = MemoryStore::with_quota(10);
        store.set_string("a", "12345".to_owned()).unwrap();
        // Overwriting the same key only counts the new value
        store.set_string("a", "1234567890".to_owned()).unwrap();

        let err = store.set_string("b", "x".to_owned()).unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 10, .. }));
        assert_eq!(store.get_string("b").unwrap(), None);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("nested"));

        assert_eq!(store.get_string(PROJECTS_KEY).unwrap(), None);
        set_json(&mut store, PROJECTS_KEY, &vec!["a", "b"]).unwrap();

        let loaded: Option<Vec<String>> = get_json(&store, PROJECTS_KEY).unwrap();
        assert_eq!(loaded, Some(vec!["a".to_owned(), "b".to_owned()]));

        store.remove(PROJECTS_KEY).unwrap();
        assert_eq!(store.get_string(PROJECTS_KEY).unwrap(), None);
        // Removing twice is fine
        store.remove(PROJECTS_KEY).unwrap();
    }

    #[test]
    fn test_file_names_are_sanitized() {
        let store = FileStore::new("/tmp/siluet");
        let path = store.path_for(DRESSINGS_KEY);
        assert_eq!(path.file_name().unwrap(), "siluet_dressings.json");
    }
}

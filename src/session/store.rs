//! Key-value persistence for the high score
//!
//! `KeyValueStore` is the string get/set capability the session persists its
//! best score through. `FileStore` keeps the values in a versioned JSON file
//! under the user data directory; `MemoryStore` keeps them in memory.

use crate::{QuizError, Result, APP_NAME, STORE_FILE};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

/// String key-value storage
pub trait KeyValueStore {
    /// Value stored under `key`, `None` when absent
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one value
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.values.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file backed store
#[derive(Debug)]
pub struct FileStore {
    store_path: PathBuf,
}

/// Store file structure for JSON persistence
#[derive(Debug, Serialize, Deserialize)]
struct StoreFile {
    version: u32,
    values: BTreeMap<String, String>,
}

impl Default for StoreFile {
    fn default() -> Self {
        Self {
            version: 1,
            values: BTreeMap::new(),
        }
    }
}

impl FileStore {
    /// Create a store at the standard location
    pub fn new() -> Result<Self> {
        let store_path = Self::store_file_path()?;
        Ok(Self { store_path })
    }

    /// Create a store backed by an explicit file
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            store_path: path.into(),
        }
    }

    /// Get the standard store file path
    /// Uses $DATA_HOME/quizzer/store.json or falls back to $HOME/.local/share/quizzer/store.json
    pub fn store_file_path() -> Result<PathBuf> {
        let data_dir = dirs::data_dir().ok_or_else(|| {
            QuizError::PersistenceError("Unable to determine data directory".to_string())
        })?;

        Ok(data_dir.join(APP_NAME).join(STORE_FILE))
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.store_path
    }

    fn load(&self) -> Result<StoreFile> {
        match self.read()? {
            Some(content) => self.parse(&content),
            None => Ok(StoreFile::default()),
        }
    }

    fn read(&self) -> Result<Option<String>> {
        if !self.store_path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&self.store_path)
            .map(Some)
            .map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to read store file {}: {}",
                    self.store_path.display(),
                    e
                ))
            })
    }

    fn parse(&self, content: &str) -> Result<StoreFile> {
        serde_json::from_str(content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to parse store file {}: {}",
                self.store_path.display(),
                e
            ))
        })
    }

    fn save(&self, file: &StoreFile) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = self.store_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                QuizError::PersistenceError(format!(
                    "Failed to create store directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let content = serde_json::to_string_pretty(file)?;

        fs::write(&self.store_path, content).map_err(|e| {
            QuizError::PersistenceError(format!(
                "Failed to write store file {}: {}",
                self.store_path.display(),
                e
            ))
        })
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.load()?.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // An unparseable file is replaced wholesale
        let mut file = match self.read()? {
            Some(content) => self.parse(&content).unwrap_or_else(|e| {
                warn!(error = %e, "Replacing unparseable store file");
                StoreFile::default()
            }),
            None => StoreFile::default(),
        };
        file.values.insert(key.to_string(), value.to_string());
        self.save(&file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("k").unwrap(), None);
        store.set("k", "10").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("10"));
        store.set("k", "20").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("20"));
    }

    #[test]
    fn test_file_store_path() {
        let path = FileStore::store_file_path();
        assert!(path.is_ok());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("quizzer"));
        assert!(path.to_string_lossy().ends_with("store.json"));
    }

    #[test]
    fn test_file_store_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::at(temp_dir.path().join("store.json"));
        assert_eq!(store.get("quizHighScore").unwrap(), None);
    }

    #[test]
    fn test_file_store_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("store.json");

        let mut store = FileStore::at(&path);
        store.set("quizHighScore", "40").unwrap();
        store.set("other", "x").unwrap();

        // A fresh handle sees the persisted values
        let reopened = FileStore::at(&path);
        assert_eq!(reopened.get("quizHighScore").unwrap().as_deref(), Some("40"));
        assert_eq!(reopened.get("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_file_store_format() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");

        let mut store = FileStore::at(&path);
        store.set("quizHighScore", "50").unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let file: StoreFile = serde_json::from_str(&content).unwrap();
        assert_eq!(file.version, 1);
        assert_eq!(file.values.get("quizHighScore").map(String::as_str), Some("50"));
    }

    #[test]
    fn test_file_store_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "not json").unwrap();

        let store = FileStore::at(&path);
        let err = store.get("quizHighScore").unwrap_err();
        assert!(matches!(err, QuizError::PersistenceError(_)));
    }

    #[test]
    fn test_file_store_set_replaces_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("store.json");
        fs::write(&path, "{ not json").unwrap();

        let mut store = FileStore::at(&path);
        store.set("quizHighScore", "10").unwrap();
        assert_eq!(store.get("quizHighScore").unwrap().as_deref(), Some("10"));

        let content = fs::read_to_string(&path).unwrap();
        let file: StoreFile = serde_json::from_str(&content).unwrap();
        assert_eq!(file.version, 1);
    }

    #[test]
    fn test_file_store_set_fails_when_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        // A directory in place of the file cannot be read or replaced
        let path = temp_dir.path().join("store.json");
        fs::create_dir(&path).unwrap();

        let mut store = FileStore::at(&path);
        assert!(matches!(
            store.set("quizHighScore", "10"),
            Err(QuizError::PersistenceError(_))
        ));
    }
}

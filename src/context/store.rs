//! Persisted identifier fallback
//!
//! A small JSON state file holding the last restaurant the operator picked,
//! under the `restaurantId` key. Unrelated keys in the file are preserved.

use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

use super::RestaurantId;

/// Key under which the identifier is persisted
pub const STORE_KEY: &str = "restaurantId";

/// Where the fallback identifier lives
pub trait IdentifierStore: Send + Sync {
    fn load(&self) -> StoreResult<Option<RestaurantId>>;
    fn save(&self, id: &RestaurantId) -> StoreResult<()>;
    fn clear(&self) -> StoreResult<()>;
}

/// Errors from the identifier store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// JSON-file backed store
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> StoreResult<Map<String, Value>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) if content.trim().is_empty() => Ok(Map::new()),
            Ok(content) => match serde_json::from_str::<Value>(&content)? {
                Value::Object(map) => Ok(map),
                _ => Err(StoreError::Serialization(format!(
                    "{:?} does not contain a JSON object",
                    self.path
                ))),
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Map::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn write_map(&self, map: Map<String, Value>) -> StoreResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&Value::Object(map))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}

impl IdentifierStore for FileStore {
    fn load(&self) -> StoreResult<Option<RestaurantId>> {
        let map = self.read_map()?;
        Ok(match map.get(STORE_KEY) {
            Some(Value::String(s)) => RestaurantId::new(s),
            Some(Value::Number(n)) => RestaurantId::new(n.to_string()),
            _ => None,
        })
    }

    fn save(&self, id: &RestaurantId) -> StoreResult<()> {
        let mut map = self.read_map()?;
        map.insert(STORE_KEY.to_string(), Value::String(id.to_string()));
        self.write_map(map)?;
        tracing::debug!(path = ?self.path, restaurant_id = %id, "persisted restaurant id");
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        let mut map = self.read_map()?;
        if map.remove(STORE_KEY).is_some() {
            self.write_map(map)?;
        }
        Ok(())
    }
}

/// In-memory store, for embedding and tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: Mutex<Option<RestaurantId>>,
}

impl MemoryStore {
    pub fn new(initial: Option<RestaurantId>) -> Self {
        Self {
            value: Mutex::new(initial),
        }
    }
}

impl IdentifierStore for MemoryStore {
    fn load(&self) -> StoreResult<Option<RestaurantId>> {
        Ok(self.value.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }

    fn save(&self, id: &RestaurantId) -> StoreResult<()> {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = Some(id.clone());
        Ok(())
    }

    fn clear(&self) -> StoreResult<()> {
        *self.value.lock().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn id(s: &str) -> RestaurantId {
        RestaurantId::new(s).unwrap()
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("state.json"));
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_save_load_clear() {
        let dir = tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested").join("state.json"));

        store.save(&id("r-9")).unwrap();
        assert_eq!(store.load().unwrap(), Some(id("r-9")));

        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }

    #[test]
    fn test_preserves_other_keys() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"theme": "dark", "restaurantId": 42}"#).unwrap();

        let store = FileStore::new(&path);
        assert_eq!(store.path(), path.as_path());
        assert_eq!(store.load().unwrap(), Some(id("42")));

        store.save(&id("r-1")).unwrap();
        let raw: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[STORE_KEY], "r-1");
    }

    #[test]
    fn test_blank_value_is_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"restaurantId": "  "}"#).unwrap();

        assert_eq!(FileStore::new(&path).load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();

        let err = FileStore::new(&path).load().unwrap_err();
        assert!(matches!(err, StoreError::Serialization(_)));
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryStore::default();
        assert_eq!(store.load().unwrap(), None);
        store.save(&id("m")).unwrap();
        assert_eq!(store.load().unwrap(), Some(id("m")));
        store.clear().unwrap();
        assert_eq!(store.load().unwrap(), None);
    }
}

//! Local persistent key-value storage
//!
//! A file-backed stand-in for browser local storage: one JSON object per
//! store, keyed by string.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// Key under which the last opened dashboard document is kept
pub const DASHBOARD_STORAGE_KEY: &str = "neodash-dashboard";

const STORAGE_FILE: &str = "local-storage.json";

pub trait KeyValueStore: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
}

/// Key-value store persisted as `<dir>/local-storage.json`
pub struct FileStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self {
            dir,
            lock: Mutex::new(()),
        }
    }

    /// `$HOME/.neodash`
    pub fn default_dir() -> Option<PathBuf> {
        let home = env::var("HOME").ok()?;
        Some(PathBuf::from(home).join(".neodash"))
    }

    fn storage_path(&self) -> PathBuf {
        self.dir.join(STORAGE_FILE)
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>> {
        let path = self.storage_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))
    }
}

impl KeyValueStore for FileStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let _guard = self.lock.lock().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        Ok(self.read_all()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let _guard = self.lock.lock().map_err(|e| anyhow::anyhow!(e.to_string()))?;
        let mut items = self.read_all()?;
        items.insert(key.to_string(), value.to_string());

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)
                .with_context(|| format!("Failed to create {}", self.dir.display()))?;
        }

        let json = serde_json::to_string_pretty(&items)?;
        fs::write(self.storage_path(), json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_has_no_items() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        assert_eq!(store.get_item(DASHBOARD_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_set_then_get() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("nested"));
        store.set_item(DASHBOARD_STORAGE_KEY, r#"{"title":"Ops"}"#).unwrap();
        store.set_item("other", "x").unwrap();

        assert_eq!(
            store.get_item(DASHBOARD_STORAGE_KEY).unwrap().as_deref(),
            Some(r#"{"title":"Ops"}"#)
        );
        assert_eq!(store.get_item("other").unwrap().as_deref(), Some("x"));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORAGE_FILE), "not json").unwrap();
        let store = FileStore::new(dir.path().to_path_buf());
        assert!(store.get_item(DASHBOARD_STORAGE_KEY).is_err());
    }
}

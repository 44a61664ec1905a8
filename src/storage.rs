//! Persistence of the recent list.
//!
//! A [`Storage`] is a string key-value slot. [`RecentStore`] owns one and is
//! the only place that reads or writes the serialized [`RecentList`].

use crate::error::StorageResult;
use crate::history::RecentList;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Key under which the recent list is stored.
pub const RECENT_KEY: &str = "recentQRs";

/// A key-value slot holding string values.
pub trait Storage {
    /// Returns the stored value, or `None` if the key was never written.
    fn read(&self, key: &str) -> StorageResult<Option<String>>;

    /// Replaces the stored value.
    fn write(&mut self, key: &str, value: &str) -> StorageResult<()>;
}

/// In-process storage. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Stores each key as `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// Loads and persists the [`RecentList`] through a [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct RecentStore<S> {
    storage: S,
}

impl<S: Storage> RecentStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Reads the persisted list.
    ///
    /// A missing, unreadable or corrupt value yields an empty list.
    pub fn load(&self) -> RecentList {
        let raw = match self.storage.read(RECENT_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::debug!("no persisted recent list, starting empty");
                return RecentList::new();
            }
            Err(e) => {
                tracing::warn!("failed to read recent list, starting empty: {e}");
                return RecentList::new();
            }
        };

        match serde_json::from_str::<RecentList>(&raw) {
            Ok(list) => {
                tracing::debug!("loaded {} recent entries", list.len());
                list
            }
            Err(e) => {
                tracing::warn!("discarding unparseable recent list: {e}");
                RecentList::new()
            }
        }
    }

    /// Overwrites the persisted list with `list`.
    pub fn persist(&mut self, list: &RecentList) -> StorageResult<()> {
        let json = serde_json::to_string(list)?;
        self.storage.write(RECENT_KEY, &json)?;
        tracing::debug!("persisted {} recent entries", list.len());
        Ok(())
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::RecentEntry;
    use crate::types::{Kind, Payload};
    use tempfile::TempDir;

    #[test]
    fn test_load_without_persisted_value() {
        let store = RecentStore::new(MemoryStorage::new());
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_load_corrupt_value() {
        let mut storage = MemoryStorage::new();
        storage.write(RECENT_KEY, "{not json").expect("write");
        let store = RecentStore::new(storage);
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_persist_then_load() {
        let mut store = RecentStore::new(MemoryStorage::new());
        let list = RecentList::new()
            .insert(RecentEntry::now(Kind::Url, Payload::from("https://a.example")))
            .insert(RecentEntry::now(Kind::Text, Payload::from("hello")));
        store.persist(&list).expect("persist");

        let loaded = store.load();
        assert_eq!(loaded.len(), 2);
        assert_eq!(
            loaded.get(0).map(|e| e.payload().as_str()),
            Some("hello")
        );
    }

    #[test]
    fn test_persist_replaces_previous_value() {
        let mut store = RecentStore::new(MemoryStorage::new());
        let list = RecentList::new().insert(RecentEntry::now(Kind::Text, Payload::from("a")));
        store.persist(&list).expect("persist");
        store.persist(&RecentList::new()).expect("persist empty");

        assert_eq!(
            store.storage().read(RECENT_KEY).expect("read"),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_file_storage_round_trip() {
        let tmp = TempDir::new().expect("create temp dir");
        let dir = tmp.path().join("nested").join("data");
        let mut storage = FileStorage::new(&dir);

        assert_eq!(storage.read(RECENT_KEY).expect("read missing"), None);
        storage.write(RECENT_KEY, "[]").expect("write");
        assert!(dir.join("recentQRs.json").exists());
        assert_eq!(
            storage.read(RECENT_KEY).expect("read"),
            Some("[]".to_string())
        );
    }

    #[test]
    fn test_file_storage_unreadable_slot() {
        let tmp = TempDir::new().expect("create temp dir");
        // A directory where the file should be makes the read fail.
        fs::create_dir_all(tmp.path().join("recentQRs.json")).expect("create dir");
        let store = RecentStore::new(FileStorage::new(tmp.path()));
        assert!(store.load().is_empty());
    }
}

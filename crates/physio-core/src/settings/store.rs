//! Preference store implementations.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use super::{PreferenceStore, SettingsResult};
use crate::db::{Database, DbError};

/// Preferences kept in the local SQLite database.
pub struct SqlitePreferenceStore {
    db: Database,
}

impl SqlitePreferenceStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub fn open<P: AsRef<Path>>(path: P) -> SettingsResult<Self> {
        Ok(Self::new(Database::open(path)?))
    }

    pub fn open_in_memory() -> SettingsResult<Self> {
        Ok(Self::new(Database::open_in_memory()?))
    }
}

impl PreferenceStore for SqlitePreferenceStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.db.get_preference(key)?)
    }

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        Ok(self.db.set_preference(key, value)?)
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        match self.db.delete_preference(key) {
            Ok(()) | Err(DbError::NotFound(_)) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// In-memory store. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferenceStore {
    values: Arc<Mutex<HashMap<String, String>>>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a stored value.
    pub fn value(&self, key: &str) -> Option<String> {
        self.lock().get(key).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn get(&self, key: &str) -> SettingsResult<Option<String>> {
        Ok(self.value(key))
    }

    fn set(&mut self, key: &str, value: &str) -> SettingsResult<()> {
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SettingsResult<()> {
        self.lock().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_store() {
        let mut store = SqlitePreferenceStore::open_in_memory().unwrap();
        assert_eq!(store.get("theme").unwrap(), None);

        store.set("theme", "blue").unwrap();
        assert_eq!(store.get("theme").unwrap(), Some("blue".into()));

        store.remove("theme").unwrap();
        store.remove("theme").unwrap();
        assert_eq!(store.get("theme").unwrap(), None);
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let mut store = MemoryPreferenceStore::new();
        let observer = store.clone();

        store.set("theme", "pink").unwrap();
        assert_eq!(observer.value("theme"), Some("pink".into()));

        store.remove("theme").unwrap();
        assert_eq!(observer.value("theme"), None);
    }
}

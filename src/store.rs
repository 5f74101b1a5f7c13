//! Local key-value persistence for users, passwords, the session pointer,
//! and translation history.
//!
//! Four independent JSON-serialized keys, last-write-wins, no schema
//! versioning. The backend is abstracted behind the `Storage` trait so the
//! pipeline's tests can substitute an in-memory fake for the on-disk store.

use anyhow::{anyhow, Context, Result};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tracing::warn;

pub const USERS_KEY: &str = "linguaverse_users";
pub const CURRENT_USER_KEY: &str = "linguaverse_current_user";
pub const PASSWORDS_KEY: &str = "linguaverse_passwords";
pub const TRANSLATIONS_KEY: &str = "linguaverse_translations";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationRecord {
    pub id: String,
    pub user_id: String,
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
    pub created_at: String,
}

/// A translation about to be persisted; id and timestamp are assigned by the
/// store.
#[derive(Debug, Clone)]
pub struct NewTranslation {
    pub user_id: String,
    pub source_text: String,
    pub translated_text: String,
    pub source_language: String,
    pub target_language: String,
}

/// Raw key-value backend: JSON strings per key.
pub trait Storage: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>>;
    fn write(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// On-disk backend: one JSON file per key under a storage directory.
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("Failed to create storage directory {}", dir.display()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", path.display())),
        }
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        std::fs::write(&path, value)
            .with_context(|| format!("Failed to write {}", path.display()))
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", path.display())),
        }
    }
}

/// In-memory backend for tests.
#[derive(Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| anyhow!("storage lock poisoned"))?;
        entries.remove(key);
        Ok(())
    }
}

/// Typed access to the four collections.
#[derive(Clone)]
pub struct LocalStore {
    storage: Arc<dyn Storage>,
}

impl LocalStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        Ok(Self::new(Arc::new(FileStorage::new(dir)?)))
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStorage::default()))
    }

    /// Read a collection, degrading to the default on missing keys, storage
    /// errors, or corrupt JSON. Reads are best-effort by design.
    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.storage.read(key) {
            Ok(Some(raw)) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                warn!("Corrupt JSON under key {}: {}", key, e);
                T::default()
            }),
            Ok(None) => T::default(),
            Err(e) => {
                warn!("Failed to read key {}: {:#}", key, e);
                T::default()
            }
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value).context("Failed to serialize collection")?;
        self.storage.write(key, &raw)
    }

    // ==================== Users ====================

    pub fn users(&self) -> Vec<User> {
        self.read_json(USERS_KEY)
    }

    pub fn save_users(&self, users: &[User]) -> Result<()> {
        self.write_json(USERS_KEY, &users)
    }

    // ==================== Session pointer ====================

    pub fn current_user(&self) -> Option<User> {
        self.read_json(CURRENT_USER_KEY)
    }

    pub fn set_current_user(&self, user: Option<&User>) -> Result<()> {
        match user {
            Some(user) => self.write_json(CURRENT_USER_KEY, user),
            None => self.storage.remove(CURRENT_USER_KEY),
        }
    }

    // ==================== Passwords ====================

    pub fn passwords(&self) -> HashMap<String, String> {
        self.read_json(PASSWORDS_KEY)
    }

    pub fn save_passwords(&self, passwords: &HashMap<String, String>) -> Result<()> {
        self.write_json(PASSWORDS_KEY, passwords)
    }

    // ==================== Translations ====================

    fn all_translations(&self) -> Vec<TranslationRecord> {
        self.read_json(TRANSLATIONS_KEY)
    }

    /// Translations owned by `user_id`, in insertion order.
    pub fn translations_for(&self, user_id: &str) -> Vec<TranslationRecord> {
        self.all_translations()
            .into_iter()
            .filter(|record| record.user_id == user_id)
            .collect()
    }

    /// Append a translation record, assigning its id and timestamp.
    pub fn save_translation(&self, new: NewTranslation) -> Result<TranslationRecord> {
        let record = TranslationRecord {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: new.user_id,
            source_text: new.source_text,
            translated_text: new.translated_text,
            source_language: new.source_language,
            target_language: new.target_language,
            created_at: Utc::now().to_rfc3339(),
        };

        let mut all = self.all_translations();
        all.push(record.clone());
        self.write_json(TRANSLATIONS_KEY, &all)?;

        Ok(record)
    }

    /// Delete a translation by id, scoped to its owner. Deleting an id that
    /// is absent (or owned by someone else) is a no-op, not an error.
    pub fn delete_translation(&self, translation_id: &str, user_id: &str) -> Result<()> {
        let remaining: Vec<TranslationRecord> = self
            .all_translations()
            .into_iter()
            .filter(|record| !(record.id == translation_id && record.user_id == user_id))
            .collect();

        self.write_json(TRANSLATIONS_KEY, &remaining)
    }

    // ==================== Bulk ====================

    /// Remove all four collections.
    pub fn clear_all(&self) -> Result<()> {
        self.storage.remove(USERS_KEY)?;
        self.storage.remove(CURRENT_USER_KEY)?;
        self.storage.remove(TRANSLATIONS_KEY)?;
        self.storage.remove(PASSWORDS_KEY)?;
        Ok(())
    }
}

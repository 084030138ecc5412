//! JSON file-based storage backend.
//!
//! This module provides a simple, human-readable storage implementation using
//! JSON serialization. It uses atomic file writes (write-to-temp + rename) to
//! prevent corruption on crashes.
//!
//! The file is read on first access, not on construction. A missing file is
//! an empty store; a corrupt file is reported to the caller on every read and
//! replaced by the next successful write.

use crate::domain::error::{Result, ZatlasError};
use crate::domain::SessionRecord;
use crate::storage::backend::Storage;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const STORAGE_VERSION: u32 = 1;

/// JSON storage container format.
///
/// This is the top-level structure serialized to disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StorageData {
    /// Version of the storage format for future migrations.
    version: u32,

    /// The mock login, absent when logged out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session: Option<SessionRecord>,

    /// Tells the list view to start with favorites-only applied.
    #[serde(default)]
    show_favorites_only: bool,
}

impl Default for StorageData {
    fn default() -> Self {
        Self {
            version: STORAGE_VERSION,
            session: None,
            show_favorites_only: false,
        }
    }
}

/// JSON file storage backend.
///
/// The whole document is cached in memory after the first read and
/// rewritten on every modification.
///
/// # File Format
///
/// ```json
/// {
///   "version": 1,
///   "session": {
///     "email": "a@b.com",
///     "logged_in_at": 1718000000
///   },
///   "show_favorites_only": false
/// }
/// ```
pub struct JsonStorage {
    /// Path to the JSON file on disk.
    file_path: PathBuf,

    /// In-memory data cache, `None` until the file has been read. Only ever
    /// holds what is also on disk.
    data: Option<StorageData>,
}

impl JsonStorage {
    /// Creates a JSON storage backend for `file_path`.
    ///
    /// Parent directories are created immediately; the file itself is only
    /// read on first access.
    ///
    /// # Errors
    ///
    /// Returns an error if parent directory creation fails.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use zatlas::storage::JsonStorage;
    /// use std::path::PathBuf;
    ///
    /// let storage = JsonStorage::new(PathBuf::from("/tmp/zatlas.json"))?;
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn new(file_path: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?file_path, "initializing JSON storage");

        if let Some(parent) = file_path.parent() {
            tracing::debug!(parent = ?parent, "creating parent directory");
            std::fs::create_dir_all(parent)?;
        }

        Ok(Self {
            file_path,
            data: None,
        })
    }

    /// Loads storage data from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or contains invalid JSON.
    fn load_from_file(path: &Path) -> Result<StorageData> {
        let contents = std::fs::read_to_string(path)?;
        let data: StorageData = serde_json::from_str(&contents)
            .map_err(|e| ZatlasError::Storage(format!("failed to parse JSON: {e}")))?;

        tracing::debug!(
            version = data.version,
            has_session = data.session.is_some(),
            show_favorites_only = data.show_favorites_only,
            "loaded storage data"
        );

        Ok(data)
    }

    /// Returns the cached document, reading the file on first use.
    fn read(&mut self) -> Result<&StorageData> {
        if self.data.is_none() {
            let data = if self.file_path.exists() {
                Self::load_from_file(&self.file_path)?
            } else {
                tracing::debug!("no storage file yet, starting empty");
                StorageData::default()
            };
            self.data = Some(data);
        }
        self.data
            .as_ref()
            .ok_or_else(|| ZatlasError::Storage("storage data not loaded".to_string()))
    }

    /// Applies `change` to a copy of the document, saves the copy and only
    /// then adopts it as the cache. A failed save leaves the cache as it was.
    ///
    /// An unreadable file is replaced rather than blocking the write.
    fn write(&mut self, change: impl FnOnce(&mut StorageData)) -> Result<()> {
        let mut next = match self.read() {
            Ok(data) => data.clone(),
            Err(e) => {
                tracing::warn!(error = %e, "storage file unreadable, overwriting");
                StorageData::default()
            }
        };
        change(&mut next);
        self.save_to_file(&next)?;
        self.data = Some(next);
        Ok(())
    }

    /// Saves `data` to disk using atomic write.
    ///
    /// Writes to a temporary file first, then atomically renames it to the target path.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed.
    fn save_to_file(&self, data: &StorageData) -> Result<()> {
        tracing::debug!(path = ?self.file_path, "saving storage data");

        let json = serde_json::to_string_pretty(data)
            .map_err(|e| ZatlasError::Storage(format!("failed to serialize JSON: {e}")))?;

        let tmp_path = self.file_path.with_extension("tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, json)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &self.file_path)?;

        tracing::debug!("storage saved successfully");
        Ok(())
    }
}

impl Storage for JsonStorage {
    fn load_session(&mut self) -> Result<Option<SessionRecord>> {
        let _span = tracing::debug_span!("json_load_session").entered();

        let session = self.read()?.session.clone();

        tracing::debug!(found = session.is_some(), "session lookup complete");
        Ok(session)
    }

    fn save_session(&mut self, session: &SessionRecord) -> Result<()> {
        let _span = tracing::debug_span!("json_save_session",
            email = %session.email
        ).entered();

        let record = session.clone();
        self.write(move |data| data.session = Some(record))
    }

    fn clear_session(&mut self) -> Result<()> {
        let _span = tracing::debug_span!("json_clear_session").entered();

        if self.read().is_ok_and(|data| data.session.is_none()) {
            tracing::debug!("no session stored");
            return Ok(());
        }
        self.write(|data| data.session = None)
    }

    fn favorites_only_flag(&mut self) -> Result<bool> {
        Ok(self.read()?.show_favorites_only)
    }

    fn set_favorites_only_flag(&mut self, value: bool) -> Result<()> {
        let _span = tracing::debug_span!("json_set_favorites_only_flag",
            value = value
        ).entered();

        if self.read().is_ok_and(|data| data.show_favorites_only == value) {
            return Ok(());
        }
        self.write(|data| data.show_favorites_only = value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn storage_in(dir: &TempDir) -> JsonStorage {
        JsonStorage::new(dir.path().join("nested").join("zatlas.json")).unwrap()
    }

    fn record(email: &str) -> SessionRecord {
        SessionRecord {
            email: email.to_string(),
            logged_in_at: 1_718_000_000,
        }
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);

        assert!(storage.load_session().unwrap().is_none());
        assert!(!storage.favorites_only_flag().unwrap());
        assert!(!dir.path().join("nested").join("zatlas.json").exists());
    }

    #[test]
    fn test_session_survives_reopen() {
        let dir = TempDir::new().unwrap();
        storage_in(&dir).save_session(&record("a@b.com")).unwrap();

        let mut reopened = storage_in(&dir);
        assert_eq!(reopened.load_session().unwrap(), Some(record("a@b.com")));

        reopened.clear_session().unwrap();
        assert!(storage_in(&dir).load_session().unwrap().is_none());
    }

    #[test]
    fn test_file_format() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        storage.save_session(&record("a@b.com")).unwrap();
        storage.set_favorites_only_flag(true).unwrap();

        let contents =
            std::fs::read_to_string(dir.path().join("nested").join("zatlas.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["version"], 1);
        assert_eq!(value["session"]["email"], "a@b.com");
        assert_eq!(value["show_favorites_only"], true);
    }

    #[test]
    fn test_take_flag_consumes_once() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        storage.set_favorites_only_flag(true).unwrap();

        assert!(storage.take_favorites_only_flag().unwrap());
        assert!(!storage.take_favorites_only_flag().unwrap());
        assert!(!storage_in(&dir).favorites_only_flag().unwrap());
    }

    #[test]
    fn test_corrupt_file_errors_then_recovers_on_write() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("zatlas.json");
        std::fs::write(&path, "{ not json").unwrap();

        let mut storage = JsonStorage::new(path.clone()).unwrap();
        assert!(matches!(storage.load_session(), Err(ZatlasError::Storage(_))));

        storage.save_session(&record("a@b.com")).unwrap();
        let mut reopened = JsonStorage::new(path).unwrap();
        assert_eq!(reopened.load_session().unwrap(), Some(record("a@b.com")));
    }

    #[test]
    fn test_failed_save_keeps_previous_value() {
        let dir = TempDir::new().unwrap();
        let mut storage = storage_in(&dir);
        storage.save_session(&record("a@b.com")).unwrap();
        std::fs::remove_dir_all(dir.path().join("nested")).unwrap();

        assert!(storage.set_favorites_only_flag(true).is_err());
        assert!(!storage.take_favorites_only_flag().unwrap());

        assert!(storage.clear_session().is_err());
        assert_eq!(storage.load_session().unwrap(), Some(record("a@b.com")));
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = TempDir::new().unwrap();
        let mut storage = JsonStorage::new(dir.path().join("zatlas.json")).unwrap();
        storage.save_session(&record("a@b.com")).unwrap();

        assert!(dir.path().join("zatlas.json").exists());
        assert!(!dir.path().join("zatlas.tmp").exists());
    }
}

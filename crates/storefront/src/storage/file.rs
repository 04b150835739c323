//! File-backed key-value store.
//!
//! The file holds one JSON object mapping keys to string values, the same
//! shape browser local storage exposes. Writes go to a sibling temp file that
//! is then renamed over the original, so a crash mid-write leaves either the
//! old or the new contents on disk.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{KeyValueStore, StorageError};

/// Key-value store persisted to a single JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Use `path` as the backing file. The file is created on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw file contents, `None` when the file does not exist yet.
    fn read_raw(&self) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Unavailable(format!(
                "failed to read {}: {e}",
                self.path.display()
            ))),
        }
    }

    fn parse_entries(content: &str) -> Result<BTreeMap<String, String>, serde_json::Error> {
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        serde_json::from_str(content)
    }

    fn read_entries(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let Some(content) = self.read_raw()? else {
            return Ok(BTreeMap::new());
        };
        Self::parse_entries(&content).map_err(|e| {
            StorageError::Unavailable(format!(
                "{} is not a key-value file: {e}",
                self.path.display()
            ))
        })
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let encoded = serde_json::to_string_pretty(entries)
            .map_err(|e| StorageError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StorageError::Unavailable(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, encoded).map_err(|e| {
            StorageError::Unavailable(format!("failed to write {}: {e}", tmp_path.display()))
        })?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| {
            StorageError::Unavailable(format!(
                "failed to replace {}: {e}",
                self.path.display()
            ))
        })
    }

    /// Entries for a write. A file that reads but is not a key-value map is
    /// replaced rather than blocking every future save; a file that cannot be
    /// read at all is left untouched.
    fn entries_for_write(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let Some(content) = self.read_raw()? else {
            return Ok(BTreeMap::new());
        };
        Ok(Self::parse_entries(&content).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Discarding malformed storage file"
            );
            BTreeMap::new()
        }))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_entries()?.remove(key))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut entries = self.entries_for_write()?;
        entries.insert(key.to_owned(), value.to_owned());
        self.write_entries(&entries)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let mut entries = self.entries_for_write()?;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries)
    }
}

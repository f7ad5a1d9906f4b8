//! File-backed storage backend
//!
//! Keeps the whole key-value namespace as a single JSON object on disk.
//! The file is loaded once at open; every mutation rewrites it with an
//! atomic write (write to temp file, sync, rename) so the store is never
//! left in a partially-written state.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{Storage, StorageError, StorageResult};

/// Storage backed by a single JSON file
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStorage {
    /// Open the store file, creating an empty namespace if it doesn't exist
    pub fn open(path: impl Into<PathBuf>) -> StorageResult<Self> {
        let path = path.into();
        let entries = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| StorageError::ReadError {
                path: path.clone(),
                source: e,
            })?;
            serde_json::from_str(&content).map_err(|e| StorageError::InvalidFormat {
                path: path.clone(),
                details: e.to_string(),
            })?
        } else {
            BTreeMap::new()
        };

        Ok(Self { path, entries })
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrite the backing file from the in-memory namespace
    fn persist(&self) -> StorageResult<()> {
        let content = serde_json::to_string_pretty(&self.entries).map_err(|e| {
            StorageError::InvalidFormat {
                path: self.path.clone(),
                details: e.to_string(),
            }
        })?;
        atomic_write(&self.path, content.as_bytes())?;
        tracing::debug!(path = %self.path.display(), keys = self.entries.len(), "persisted store");
        Ok(())
    }
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        self.persist()
    }

    fn delete(&mut self, key: &str) -> StorageResult<()> {
        if self.entries.remove(key).is_some() {
            self.persist()?;
        }
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

/// Write data to a file atomically
///
/// 1. Write to a temporary file in the same directory
/// 2. Sync the file to disk
/// 3. Rename the temp file to the target path
fn atomic_write(path: &Path, data: &[u8]) -> StorageResult<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");

    let mut file = File::create(&temp_path)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.write_all(data)
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    file.sync_all()
        .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;

    fs::rename(&temp_path, path).map_err(|e| StorageError::from_io(e, path.to_path_buf()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::open(temp_dir.path().join("blog.json")).unwrap();
        assert!(storage.keys().unwrap().is_empty());
    }

    #[test]
    fn test_data_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blog.json");

        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.put("post_1", r#"{"id":"1"}"#).unwrap();
            storage.put("media_library", "[]").unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert_eq!(
            storage.get("post_1").unwrap().as_deref(),
            Some(r#"{"id":"1"}"#)
        );
        assert_eq!(storage.keys().unwrap().len(), 2);
    }

    #[test]
    fn test_delete_persists() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blog.json");

        {
            let mut storage = FileStorage::open(&path).unwrap();
            storage.put("a", "1").unwrap();
            storage.delete("a").unwrap();
        }

        let storage = FileStorage::open(&path).unwrap();
        assert!(storage.get("a").unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("blog.json");
        fs::write(&path, "not json at all").unwrap();

        let err = FileStorage::open(&path).unwrap_err();
        assert!(matches!(err, StorageError::InvalidFormat { .. }));
    }

    #[test]
    fn test_atomic_write_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let nested = temp_dir.path().join("a").join("b").join("blog.json");

        let mut storage = FileStorage::open(&nested).unwrap();
        storage.put("k", "v").unwrap();

        assert!(nested.exists());
        // No leftover temp file after the rename
        assert!(!nested.with_extension("tmp").exists());
    }
}

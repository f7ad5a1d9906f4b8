//! In-memory storage backend

use std::collections::BTreeMap;

use super::{Storage, StorageResult};

/// Storage backed by an in-process map
///
/// The direct analogue of browser local storage for a single process.
/// Used by tests and by callers that want a throwaway store.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: BTreeMap<String, String>,
}

impl MemoryStorage {
    /// Create an empty storage area
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of keys currently stored
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the storage area is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> StorageResult<()> {
        self.entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_put_get_delete() {
        let mut storage = MemoryStorage::new();
        assert!(storage.get("a").unwrap().is_none());

        storage.put("a", "1").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("1"));

        storage.put("a", "2").unwrap();
        assert_eq!(storage.get("a").unwrap().as_deref(), Some("2"));

        storage.delete("a").unwrap();
        assert!(storage.get("a").unwrap().is_none());

        // Deleting an absent key is fine
        storage.delete("a").unwrap();
    }

    #[test]
    fn test_keys_are_sorted() {
        let mut storage = MemoryStorage::new();
        storage.put("b", "2").unwrap();
        storage.put("a", "1").unwrap();
        storage.put("c", "3").unwrap();

        assert_eq!(storage.keys().unwrap(), vec!["a", "b", "c"]);
    }
}

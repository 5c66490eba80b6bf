//! # Key/Value Persistence Boundary
//!
//! The configuration service persists documents through this trait rather
//! than a concrete client, so a Consul-shaped KV store, an etcd adapter,
//! or the in-memory test double are interchangeable. Values are opaque
//! bytes; serialization belongs to the caller.

use std::collections::BTreeMap;

use parking_lot::RwLock;
use thiserror::Error;

/// Errors surfaced by a key/value backend.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected or could not complete the operation.
    #[error("store backend error: {0}")]
    Backend(String),

    /// The backend was unreachable.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// A minimal key/value store, Consul-KV shaped.
///
/// Keys are slash-delimited paths. `list_keys` returns every key under a
/// prefix in lexicographic order.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Delete a key. Returns whether the key existed.
    fn delete(&self, key: &str) -> Result<bool, StoreError>;

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError>;
}

// ---------------------------------------------------------------------------
// InMemoryStore
// ---------------------------------------------------------------------------

/// Process-local [`KeyValueStore`] used by tests and demo runs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for InMemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), value);
        Ok(())
    }

    fn delete(&self, key: &str) -> Result<bool, StoreError> {
        Ok(self.entries.write().remove(key).is_some())
    }

    fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        // BTreeMap iteration is already sorted; range on the prefix would
        // also work but a filter keeps the empty-prefix case obvious.
        Ok(self
            .entries
            .read()
            .keys()
            .filter(|k| k.starts_with(prefix))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn put_get_roundtrip() {
        let store = InMemoryStore::new();
        store.put("pipelines/main/search", b"doc".to_vec()).unwrap();
        assert_eq!(
            store.get("pipelines/main/search").unwrap(),
            Some(b"doc".to_vec())
        );
    }

    #[test]
    fn get_missing_is_none() {
        let store = InMemoryStore::new();
        assert_eq!(store.get("pipelines/main/ghost").unwrap(), None);
    }

    #[test]
    fn put_overwrites() {
        let store = InMemoryStore::new();
        store.put("k", b"v1".to_vec()).unwrap();
        store.put("k", b"v2".to_vec()).unwrap();
        assert_eq!(store.get("k").unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn delete_reports_existence() {
        let store = InMemoryStore::new();
        store.put("k", b"v".to_vec()).unwrap();
        assert!(store.delete("k").unwrap());
        assert!(!store.delete("k").unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn list_keys_is_sorted_and_prefix_scoped() {
        let store = InMemoryStore::new();
        store.put("pipelines/main/b", Vec::new()).unwrap();
        store.put("pipelines/main/a", Vec::new()).unwrap();
        store.put("pipelines/other/c", Vec::new()).unwrap();
        store.put("clusters/main", Vec::new()).unwrap();

        assert_eq!(
            store.list_keys("pipelines/main/").unwrap(),
            vec!["pipelines/main/a", "pipelines/main/b"]
        );
        assert_eq!(store.list_keys("nope/").unwrap(), Vec::<String>::new());
    }
}

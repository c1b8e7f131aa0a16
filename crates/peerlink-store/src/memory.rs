use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{KvStore, StoreProvider};

/// In-memory, `BTreeMap`-based key/value store.
///
/// Used as the ephemeral tier and in tests. All entries are held behind a
/// `RwLock` for safe concurrent access and are lost when the store is
/// dropped.
pub struct InMemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl InMemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of entries currently stored.
    pub fn len(&self) -> usize {
        self.entries.read().expect("lock poisoned").len()
    }

    /// Returns `true` if the store is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.read().expect("lock poisoned").is_empty()
    }

    /// Remove all entries from the store.
    pub fn clear(&self) {
        self.entries.write().expect("lock poisoned").clear();
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl KvStore for InMemoryStore {
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let mut map = self.entries.write().expect("lock poisoned");
        map.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        let map = self.entries.read().expect("lock poisoned");
        map.get(key).cloned().ok_or(StoreError::NotFound)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        let mut map = self.entries.write().expect("lock poisoned");
        Ok(map.remove(key).is_some())
    }

    fn iterate(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        let map = self.entries.read().expect("lock poisoned");
        Ok(map
            .range(prefix.to_string()..)
            .take_while(|(k, _)| k.starts_with(prefix))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }
}

impl std::fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("entry_count", &self.len())
            .finish()
    }
}

/// Provider handing out [`InMemoryStore`]s.
///
/// The same name always maps to the same store until it is closed.
#[derive(Default)]
pub struct InMemoryProvider {
    stores: RwLock<HashMap<String, Arc<InMemoryStore>>>,
}

impl InMemoryProvider {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StoreProvider for InMemoryProvider {
    fn open_store(&self, name: &str) -> StoreResult<Arc<dyn KvStore>> {
        if name.is_empty() {
            return Err(StoreError::InvalidStoreName(name.to_string()));
        }
        let mut stores = self.stores.write().expect("lock poisoned");
        let store = stores.entry(name.to_string()).or_insert_with(|| {
            debug!(store = name, "opening in-memory store");
            Arc::new(InMemoryStore::new())
        });
        let handle: Arc<dyn KvStore> = store.clone();
        Ok(handle)
    }

    fn close_store(&self, name: &str) -> StoreResult<()> {
        self.stores.write().expect("lock poisoned").remove(name);
        Ok(())
    }
}

//! Test doubles for store providers.

use std::sync::Arc;

use peerlink_store::{
    InMemoryProvider, InMemoryStore, KvStore, StoreError, StoreProvider, StoreResult,
};

use crate::lookup::Provider;

pub const SAMPLE_ERR_MSG: &str = "sample-error-message";

/// Provider that fails every open with a fixed message.
pub struct FailingProvider(pub &'static str);

impl StoreProvider for FailingProvider {
    fn open_store(&self, _name: &str) -> StoreResult<Arc<dyn KvStore>> {
        Err(StoreError::Backend(self.0.to_string()))
    }

    fn close_store(&self, _name: &str) -> StoreResult<()> {
        Ok(())
    }
}

/// Provider that hands out one pre-built store for every name.
pub struct FixedProvider(pub Arc<dyn KvStore>);

impl StoreProvider for FixedProvider {
    fn open_store(&self, _name: &str) -> StoreResult<Arc<dyn KvStore>> {
        Ok(self.0.clone())
    }

    fn close_store(&self, _name: &str) -> StoreResult<()> {
        Ok(())
    }
}

/// In-memory store whose reads and iterations fail with [`SAMPLE_ERR_MSG`].
#[derive(Default)]
pub struct ErrReadStore {
    inner: InMemoryStore,
}

impl KvStore for ErrReadStore {
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.inner.put(key, value)
    }

    fn get(&self, _key: &str) -> StoreResult<Vec<u8>> {
        Err(StoreError::Backend(SAMPLE_ERR_MSG.to_string()))
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        self.inner.delete(key)
    }

    fn iterate(&self, _prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        Err(StoreError::Backend(SAMPLE_ERR_MSG.to_string()))
    }
}

/// Durable and transient providers for a connection lookup.
pub struct MockProvider {
    pub store: Box<dyn StoreProvider>,
    pub transient_store: Box<dyn StoreProvider>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self {
            store: Box::new(InMemoryProvider::new()),
            transient_store: Box::new(InMemoryProvider::new()),
        }
    }
}

impl MockProvider {
    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self {
            store: Box::new(FixedProvider(store)),
            ..Default::default()
        }
    }

    pub fn with_stores(store: Arc<dyn KvStore>, transient_store: Arc<dyn KvStore>) -> Self {
        Self {
            store: Box::new(FixedProvider(store)),
            transient_store: Box::new(FixedProvider(transient_store)),
        }
    }
}

impl Provider for MockProvider {
    fn storage_provider(&self) -> &dyn StoreProvider {
        self.store.as_ref()
    }

    fn transient_storage_provider(&self) -> &dyn StoreProvider {
        self.transient_store.as_ref()
    }
}

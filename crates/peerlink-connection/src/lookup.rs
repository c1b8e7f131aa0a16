//! Read side of the connection store.

use std::sync::Arc;

use peerlink_store::{KvStore, StoreProvider, TieredStore};
use tracing::{debug, warn};

use crate::config::ConnectionStoreConfig;
use crate::error::{ConnectionError, Result};
use crate::keys::{connection_key, connection_search_prefix, connection_state_key};
use crate::record::{decode_connection_record, ConnectionRecord};

/// Source of the durable and the transient store providers.
pub trait Provider {
    /// Provider of the durable tier.
    fn storage_provider(&self) -> &dyn StoreProvider;

    /// Provider of the ephemeral tier.
    fn transient_storage_provider(&self) -> &dyn StoreProvider;
}

/// A durable and an ephemeral provider bundled as a [`Provider`].
pub struct ProviderPair<D, E> {
    pub durable: D,
    pub ephemeral: E,
}

impl<D: StoreProvider, E: StoreProvider> Provider for ProviderPair<D, E> {
    fn storage_provider(&self) -> &dyn StoreProvider {
        &self.durable
    }

    fn transient_storage_provider(&self) -> &dyn StoreProvider {
        &self.ephemeral
    }
}

/// Lookups over connection records kept in a [`TieredStore`].
#[derive(Clone, Debug)]
pub struct ConnectionLookup {
    store: TieredStore,
}

impl ConnectionLookup {
    /// Open the default namespace in both providers.
    pub fn new(provider: &dyn Provider) -> Result<Self> {
        Self::with_config(provider, &ConnectionStoreConfig::default())
    }

    /// Open `config.namespace` in both providers.
    ///
    /// An open failure in either provider is returned unchanged.
    pub fn with_config(provider: &dyn Provider, config: &ConnectionStoreConfig) -> Result<Self> {
        let store = TieredStore::open(
            provider.storage_provider(),
            provider.transient_storage_provider(),
            &config.namespace,
        )?;
        Ok(Self { store })
    }

    pub fn from_tiered(store: TieredStore) -> Self {
        Self { store }
    }

    /// The durable store.
    pub fn store(&self) -> &Arc<dyn KvStore> {
        self.store.durable()
    }

    /// The ephemeral store.
    pub fn transient_store(&self) -> &Arc<dyn KvStore> {
        self.store.ephemeral()
    }

    pub fn tiered(&self) -> &TieredStore {
        &self.store
    }

    /// Fetch a record by connection id, durable tier first.
    ///
    /// Misses and backend failures are returned as [`ConnectionError::Store`]
    /// with the backend error untouched.
    pub fn get_connection_record(&self, connection_id: &str) -> Result<ConnectionRecord> {
        let key = connection_key(connection_id);
        let bytes = self.store.get_identifier_indexed(&key)?;
        decode_connection_record(&key, &bytes)
    }

    /// Fetch the snapshot of a connection at `state` from the ephemeral tier.
    pub fn get_connection_record_at_state(
        &self,
        connection_id: &str,
        state: &str,
    ) -> Result<ConnectionRecord> {
        if state.is_empty() {
            return Err(ConnectionError::EmptyState);
        }
        let key = connection_state_key(connection_id, state);
        let bytes = self.store.get_state_indexed(&key)?;
        decode_connection_record(&key, &bytes)
    }

    /// Resolve a namespaced thread id to its connection record.
    ///
    /// A mapping whose connection record is missing is reported as not found.
    pub fn get_connection_record_by_ns_thread_id(
        &self,
        ns_thread_id: &str,
    ) -> Result<ConnectionRecord> {
        let mapped = self.store.get_thread_mapping(ns_thread_id)?;
        let connection_id = String::from_utf8(mapped).map_err(|e| ConnectionError::Decode {
            key: ns_thread_id.to_string(),
            reason: e.to_string(),
        })?;
        self.get_connection_record(&connection_id).inspect_err(|e| {
            if e.is_not_found() {
                debug!(ns_thread_id, %connection_id, "thread mapped to missing record");
            }
        })
    }

    /// Every connection record across both tiers.
    ///
    /// Records present in both tiers are returned once, with the ephemeral
    /// copy winning. A single undecodable value fails the whole query. The
    /// order of the result is unspecified.
    pub fn query_connection_records(&self) -> Result<Vec<ConnectionRecord>> {
        let entries = self.store.iterate_merged(&connection_search_prefix())?;
        entries
            .iter()
            .map(|(key, bytes)| {
                decode_connection_record(key, bytes).inspect_err(|e| {
                    warn!(error = %e, "aborting connection query");
                })
            })
            .collect()
    }
}

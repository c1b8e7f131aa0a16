//! Local store of peer DID documents.
//!
//! Peer DIDs are never published to a registry; an agent resolves them from
//! the documents its peers handed over. [`PeerDidStore`] keeps those
//! documents keyed by their identifier and refuses to store any document
//! whose identifier does not validate.

use std::sync::Arc;

use peerlink_store::{KvStore, StoreProvider};
use peerlink_types::Doc;
use tracing::debug;

use crate::did::PeerDid;
use crate::error::{DidError, DidResult};
use crate::method::validate_identifier;

/// Name of the store holding peer DID documents.
pub const STORE_NAME: &str = "peer";

/// Peer DID documents keyed by identifier.
pub struct PeerDidStore {
    store: Arc<dyn KvStore>,
}

impl PeerDidStore {
    /// Open the [`STORE_NAME`] store from `provider`.
    pub fn new(provider: &dyn StoreProvider) -> DidResult<Self> {
        Ok(Self::with_store(provider.open_store(STORE_NAME)?))
    }

    pub fn with_store(store: Arc<dyn KvStore>) -> Self {
        Self { store }
    }

    /// Validate and store `doc` under its identifier.
    pub fn put(&self, doc: &Doc) -> DidResult<()> {
        validate_identifier(doc)?;
        let bytes = doc
            .to_json()
            .map_err(|e| DidError::Serialization(e.to_string()))?;
        self.store.put(&doc.id, &bytes)?;
        debug!(did = %doc.id, "stored peer DID document");
        Ok(())
    }

    /// Resolve a stored document.
    pub fn get(&self, did: &str) -> DidResult<Doc> {
        let did: PeerDid = did.parse()?;
        let bytes = self.store.get(&did.to_string())?;
        Doc::from_json(&bytes).map_err(|e| DidError::Decode(e.to_string()))
    }
}

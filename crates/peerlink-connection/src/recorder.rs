//! Write side of the connection store.
//!
//! The recorder decides which tier a record lands in: finished connections
//! are durable, in-flight handshakes stay ephemeral. State snapshots and
//! thread mappings always go to the ephemeral tier.

use peerlink_store::{StoreError, Tier};
use tracing::debug;

use crate::error::{ConnectionError, Result};
use crate::keys::{
    connection_key, connection_state_key, create_namespace_key, THEIR_NS_PREFIX,
};
use crate::lookup::{ConnectionLookup, Provider};
use crate::record::{prepare_connection_record, ConnectionRecord};

/// Persists connection records and thread mappings.
///
/// The read side is reachable through [`ConnectionRecorder::lookup`].
#[derive(Clone, Debug)]
pub struct ConnectionRecorder {
    lookup: ConnectionLookup,
}

impl ConnectionRecorder {
    pub fn new(provider: &dyn Provider) -> Result<Self> {
        Ok(Self::from_lookup(ConnectionLookup::new(provider)?))
    }

    pub fn from_lookup(lookup: ConnectionLookup) -> Self {
        Self { lookup }
    }

    pub fn lookup(&self) -> &ConnectionLookup {
        &self.lookup
    }

    /// Save `record` in the tier matching its state.
    ///
    /// A completed record is written to the durable tier and its in-flight
    /// copy is dropped from the ephemeral tier. When the record has a state, a
    /// snapshot is also written under its state-indexed key.
    pub fn save_connection_record(&self, record: &ConnectionRecord) -> Result<()> {
        let bytes = prepare_connection_record(Some(record))?;
        let store = self.lookup.tiered();
        let key = connection_key(&record.connection_id);

        if record.is_completed() {
            store.put(Tier::Durable, &key, &bytes)?;
            store.delete(Tier::Ephemeral, &key)?;
        } else {
            store.put(Tier::Ephemeral, &key, &bytes)?;
        }

        if !record.state.is_empty() {
            store.put_state_indexed(
                &connection_state_key(&record.connection_id, &record.state),
                &bytes,
            )?;
        }
        debug!(
            connection_id = %record.connection_id,
            state = %record.state,
            completed = record.is_completed(),
            "saved connection record"
        );
        Ok(())
    }

    /// Save `record` and map its thread id, in the peer's namespace, to the
    /// connection id.
    pub fn save_connection_record_with_mapping(&self, record: &ConnectionRecord) -> Result<()> {
        self.save_connection_record(record)?;
        self.save_ns_thread_id(&record.thread_id, THEIR_NS_PREFIX, &record.connection_id)
    }

    /// Map `thread_id` in `namespace` to `connection_id`.
    pub fn save_ns_thread_id(
        &self,
        thread_id: &str,
        namespace: &str,
        connection_id: &str,
    ) -> Result<()> {
        let key = create_namespace_key(namespace, thread_id)?;
        self.lookup
            .tiered()
            .put_thread_mapping(&key, connection_id.as_bytes())?;
        Ok(())
    }

    /// Delete the identifier-indexed record from both tiers.
    ///
    /// # Errors
    /// Not found if neither tier held the record.
    pub fn remove_connection(&self, connection_id: &str) -> Result<()> {
        let store = self.lookup.tiered();
        let key = connection_key(connection_id);
        let durable = store.delete(Tier::Durable, &key)?;
        let ephemeral = store.delete(Tier::Ephemeral, &key)?;
        if !durable && !ephemeral {
            return Err(ConnectionError::Store(StoreError::NotFound));
        }
        Ok(())
    }
}

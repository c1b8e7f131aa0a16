//! Durable + ephemeral stores composed behind one API.
//!
//! Routing is fixed per record class:
//!
//! | class              | reads                     | writes            |
//! |--------------------|---------------------------|-------------------|
//! | identifier-indexed | durable, then ephemeral   | caller picks tier |
//! | state-indexed      | ephemeral only            | ephemeral only    |
//! | thread mapping     | ephemeral only            | ephemeral only    |

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::traits::{KvStore, StoreProvider};

/// One of the two physical stores.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tier {
    /// Long-lived, finalized records.
    Durable,
    /// In-flight protocol state; not required to survive restarts.
    Ephemeral,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Durable => f.write_str("durable"),
            Tier::Ephemeral => f.write_str("ephemeral"),
        }
    }
}

#[derive(Clone, Copy, Debug)]
enum RecordClass {
    IdentifierIndexed,
    StateIndexed,
    ThreadMapping,
}

impl RecordClass {
    fn read_order(self) -> &'static [Tier] {
        match self {
            RecordClass::IdentifierIndexed => &[Tier::Durable, Tier::Ephemeral],
            RecordClass::StateIndexed | RecordClass::ThreadMapping => &[Tier::Ephemeral],
        }
    }
}

/// A durable and an ephemeral [`KvStore`] opened under the same name.
#[derive(Clone)]
pub struct TieredStore {
    durable: Arc<dyn KvStore>,
    ephemeral: Arc<dyn KvStore>,
}

impl TieredStore {
    /// Open `name` in both providers.
    ///
    /// Any open error is returned unchanged.
    pub fn open(
        durable: &dyn StoreProvider,
        ephemeral: &dyn StoreProvider,
        name: &str,
    ) -> StoreResult<Self> {
        let ephemeral = ephemeral.open_store(name)?;
        let durable = durable.open_store(name)?;
        debug!(store = name, "opened tiered store");
        Ok(Self::from_stores(durable, ephemeral))
    }

    /// Compose two already-open stores.
    pub fn from_stores(durable: Arc<dyn KvStore>, ephemeral: Arc<dyn KvStore>) -> Self {
        Self { durable, ephemeral }
    }

    /// The durable store.
    pub fn durable(&self) -> &Arc<dyn KvStore> {
        &self.durable
    }

    /// The ephemeral store.
    pub fn ephemeral(&self) -> &Arc<dyn KvStore> {
        &self.ephemeral
    }

    /// The store backing `tier`.
    pub fn tier(&self, tier: Tier) -> &Arc<dyn KvStore> {
        match tier {
            Tier::Durable => &self.durable,
            Tier::Ephemeral => &self.ephemeral,
        }
    }

    fn read(&self, class: RecordClass, key: &str) -> StoreResult<Vec<u8>> {
        for &tier in class.read_order() {
            match self.tier(tier).get(key) {
                Err(StoreError::NotFound) => {
                    debug!(key, %tier, ?class, "miss");
                }
                other => return other,
            }
        }
        Err(StoreError::NotFound)
    }

    /// Write an identifier-indexed record to the chosen tier.
    pub fn put(&self, tier: Tier, key: &str, value: &[u8]) -> StoreResult<()> {
        self.tier(tier).put(key, value)
    }

    /// Delete a key from the chosen tier. Returns `true` if it existed.
    pub fn delete(&self, tier: Tier, key: &str) -> StoreResult<bool> {
        self.tier(tier).delete(key)
    }

    /// Read an identifier-indexed record, durable tier first.
    ///
    /// A backend failure on the durable tier is returned as is; only
    /// `NotFound` falls through to the ephemeral tier.
    pub fn get_identifier_indexed(&self, key: &str) -> StoreResult<Vec<u8>> {
        self.read(RecordClass::IdentifierIndexed, key)
    }

    /// Write a state-indexed snapshot (ephemeral tier).
    pub fn put_state_indexed(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.ephemeral.put(key, value)
    }

    /// Read a state-indexed snapshot. The durable tier is never consulted.
    pub fn get_state_indexed(&self, key: &str) -> StoreResult<Vec<u8>> {
        self.read(RecordClass::StateIndexed, key)
    }

    /// Write a thread-to-identifier mapping (ephemeral tier).
    pub fn put_thread_mapping(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        self.ephemeral.put(key, value)
    }

    /// Read a thread-to-identifier mapping. The durable tier is never consulted.
    pub fn get_thread_mapping(&self, key: &str) -> StoreResult<Vec<u8>> {
        self.read(RecordClass::ThreadMapping, key)
    }

    /// Entries under `prefix` from both tiers, merged by key.
    ///
    /// When both tiers hold a key the ephemeral value wins.
    pub fn iterate_merged(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        let mut merged: BTreeMap<String, Vec<u8>> =
            self.durable.iterate(prefix)?.into_iter().collect();
        merged.extend(self.ephemeral.iterate(prefix)?);
        Ok(merged.into_iter().collect())
    }
}

impl fmt::Debug for TieredStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TieredStore").finish_non_exhaustive()
    }
}

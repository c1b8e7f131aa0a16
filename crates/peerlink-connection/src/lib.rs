//! Connection records for peerlink.
//!
//! A connection record tracks the lifecycle of a relationship with a peer.
//! Records live in a [`TieredStore`](peerlink_store::TieredStore): finished
//! connections in the durable tier, in-flight handshake state in the
//! ephemeral tier.
//!
//! # Lookups
//!
//! - by connection id: durable tier first, then ephemeral
//! - by connection id and protocol state: ephemeral tier only
//! - by namespaced thread id: ephemeral mapping, then by connection id
//! - all records: both tiers merged, ephemeral copy wins
//!
//! # Modules
//!
//! - [`record`] — [`ConnectionRecord`] and its serialization
//! - [`keys`] — store key layout
//! - [`lookup`] — [`ConnectionLookup`], the read side
//! - [`recorder`] — [`ConnectionRecorder`], the write side
//! - [`config`] — [`ConnectionStoreConfig`]
//! - [`error`] — [`ConnectionError`]

pub mod config;
pub mod error;
pub mod keys;
pub mod lookup;
pub mod record;
pub mod recorder;

#[cfg(test)]
mod mock;

pub use config::ConnectionStoreConfig;
pub use error::{ConnectionError, Result};
pub use keys::{
    connection_key, connection_state_key, create_namespace_key, MY_NS_PREFIX, THEIR_NS_PREFIX,
};
pub use lookup::{ConnectionLookup, Provider, ProviderPair};
pub use record::{prepare_connection_record, ConnectionRecord, STATE_COMPLETED};
pub use recorder::ConnectionRecorder;

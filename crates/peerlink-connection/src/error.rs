//! Error types for connection record operations.

use peerlink_crypto::HasherError;
use peerlink_store::StoreError;
use thiserror::Error;

/// Errors that can occur while reading or writing connection records.
#[derive(Debug, Error)]
pub enum ConnectionError {
    /// Storage failure or miss, passed through unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A state lookup was requested with an empty state.
    #[error("stateID can't be empty")]
    EmptyState,

    /// Stored bytes are not a connection record.
    #[error("failed to decode connection record at {key:?}: {reason}")]
    Decode { key: String, reason: String },

    /// Serialization was attempted without a record.
    #[error("prepare connection record: connection record is nil")]
    NilRecord,

    /// The record could not be serialized.
    #[error("prepare connection record: {0}")]
    Serialization(String),

    /// Thread namespaces are `my` or `their`.
    #[error("namespace not supported: {0:?}")]
    InvalidNamespace(String),

    #[error(transparent)]
    Hash(#[from] HasherError),
}

impl ConnectionError {
    /// Returns `true` when the record (or its mapping) does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConnectionError::Store(e) if e.is_not_found())
    }
}

/// Convenience type alias for connection operations.
pub type Result<T> = std::result::Result<T, ConnectionError>;

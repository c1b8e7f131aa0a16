//! Error types for the peer DID method.

use peerlink_crypto::HasherError;
use peerlink_store::StoreError;
use thiserror::Error;

/// Errors that can occur while deriving, validating, or storing peer DIDs.
#[derive(Debug, Error)]
pub enum DidError {
    /// The genesis document lacks public keys or authentication methods.
    #[error("the genesis version must include public keys and authentication")]
    MissingKeyMaterial,

    /// The identifier does not follow `did:peer:11-<hex digest>`.
    #[error("did doesn't follow the did:peer:11 grammar: {did:?}: {reason}")]
    Grammar { did: String, reason: String },

    /// The grammar is valid but the embedded digest is not the document's.
    #[error(
        "hash of the doc doesn't match the computed hash: embedded {embedded}, computed {computed}"
    )]
    HashMismatch { embedded: String, computed: String },

    #[error(transparent)]
    Hash(#[from] HasherError),

    /// The document could not be canonicalized.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Stored bytes are not a valid document.
    #[error("decode error: {0}")]
    Decode(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DidError {
    pub(crate) fn grammar(did: &str, reason: impl Into<String>) -> Self {
        DidError::Grammar {
            did: did.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` when a lookup found nothing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DidError::Store(e) if e.is_not_found())
    }
}

/// Convenience type alias for DID operations.
pub type DidResult<T> = std::result::Result<T, DidError>;

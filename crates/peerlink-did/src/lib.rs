//! The `did:peer` method for peerlink.
//!
//! A peer DID is self-certifying: its suffix is the multihash of the genesis
//! document it names, so anyone holding the document can check the
//! identifier without consulting a registry.
//!
//! # Modules
//!
//! - [`did`] — [`PeerDid`] grammar and formatting
//! - [`method`] — [`derive_identifier`] / [`validate_identifier`]
//! - [`store`] — [`PeerDidStore`] for locally resolving peer documents
//! - [`error`] — [`DidError`]

pub mod did;
pub mod error;
pub mod method;
pub mod store;

pub use did::{PeerDid, METHOD, METHOD_VERSION, PREFIX};
pub use error::{DidError, DidResult};
pub use method::{
    assign_identifier, canonical_bytes, derive_identifier, document_digest, validate_identifier,
};
pub use store::PeerDidStore;

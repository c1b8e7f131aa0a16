//! Content hashing for peerlink.
//!
//! Turns canonical document bytes into a self-describing [`Multihash`]
//! (algorithm code, digest length, digest) that can be text-encoded and
//! embedded in identifiers. Hashing wraps BLAKE3; there is no custom cryptography.

pub mod error;
pub mod hasher;
pub mod multihash;

pub use error::{HasherError, HasherResult};
pub use hasher::ContentHasher;
pub use multihash::{Multihash, BLAKE3_CODE, DIGEST_LEN};

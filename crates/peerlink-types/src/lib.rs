//! Foundation types for peerlink.
//!
//! This crate provides the identity-document model consumed by the peer DID
//! method and the connection store. Every other peerlink crate depends on
//! `peerlink-types`.
//!
//! # Key Types
//!
//! - [`Doc`] — Identity document; a *genesis* document is one whose `id` is
//!   still empty
//! - [`PublicKey`] — Public key entry with raw key material
//! - [`VerificationMethod`] — Authentication entry wrapping a public key
//! - [`Service`] — Service endpoint advertised by the document

pub mod document;
pub mod error;

pub use document::{Doc, PublicKey, Service, VerificationMethod, DID_CONTEXT};
pub use error::TypeError;

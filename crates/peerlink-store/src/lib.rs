//! Key/value storage for peerlink.
//!
//! This crate defines the byte-oriented [`KvStore`] contract that every
//! backend implements, the [`StoreProvider`] that opens named stores, and the
//! [`TieredStore`] that composes a durable and an ephemeral store behind one
//! API with fixed per-record-class routing.
//!
//! # Storage Backends
//!
//! - [`InMemoryStore`] / [`InMemoryProvider`] -- ephemeral tier and tests
//! - [`FileStore`] / [`FileStoreProvider`] -- durable tier, one file per key
//!
//! # Design Rules
//!
//! 1. A missing key is always [`StoreError::NotFound`], never an empty value.
//! 2. Reads and writes are atomic per key; there are no cross-key transactions.
//! 3. The store never interprets values.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod config;
pub mod error;
pub mod file;
pub mod memory;
pub mod tiered;
pub mod traits;

pub use config::FileStoreConfig;
pub use error::{StoreError, StoreResult};
pub use file::{FileStore, FileStoreProvider};
pub use memory::{InMemoryProvider, InMemoryStore};
pub use tiered::{Tier, TieredStore};
pub use traits::{KvStore, StoreProvider};

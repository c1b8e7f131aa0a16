use std::sync::Arc;

use crate::error::StoreResult;

/// Byte-oriented key/value store.
///
/// All implementations must satisfy these invariants:
/// - Reads and writes are atomic per key.
/// - `get` reports a missing key as [`StoreError::NotFound`], never as an
///   empty value.
/// - The store never interprets values.
/// - All I/O errors are propagated, never silently ignored.
///
/// [`StoreError::NotFound`]: crate::StoreError::NotFound
pub trait KvStore: Send + Sync {
    /// Store `value` under `key`, overwriting any previous value.
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StoreResult<Vec<u8>>;

    /// Delete `key`. Returns `true` if a value existed.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// All entries whose key starts with `prefix`, sorted by key.
    ///
    /// Pass `""` to list every entry.
    fn iterate(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>>;
}

/// Opens named stores.
///
/// Opening the same name twice yields handles onto the same data.
pub trait StoreProvider: Send + Sync {
    /// Open (creating if needed) the store called `name`.
    fn open_store(&self, name: &str) -> StoreResult<Arc<dyn KvStore>>;

    /// Release the provider's handle on `name`. Existing handles stay valid.
    fn close_store(&self, name: &str) -> StoreResult<()>;
}

/// Errors from key/value store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No value is stored under the requested key.
    #[error("data not found")]
    NotFound,

    /// Keys must be non-empty.
    #[error("key is mandatory")]
    EmptyKey,

    /// The store name cannot be used to open a store.
    #[error("invalid store name: {0:?}")]
    InvalidStoreName(String),

    /// I/O error from a file-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Opaque failure reported by a storage backend.
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Returns `true` for the not-found outcome.
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound)
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

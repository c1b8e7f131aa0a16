use thiserror::Error;

/// Errors from hashing operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HasherError {
    /// Hashing was requested over zero bytes.
    #[error("cannot hash empty bytes")]
    EmptyInput,

    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    /// The decoded bytes are not a multihash this crate produces.
    #[error("malformed multihash: {0}")]
    Malformed(String),
}

/// Result alias for hashing operations.
pub type HasherResult<T> = Result<T, HasherError>;

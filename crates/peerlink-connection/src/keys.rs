//! Store key layout.
//!
//! Each record class has its own prefix so keys never collide across
//! classes:
//!
//! - `conn_<connectionID>`: identifier-indexed record
//! - `connstate_<connectionID>_<state>`: state-indexed snapshot
//! - `<ns>_<hash(threadID)>`: thread mapping, `ns` is `my` or `their`

use peerlink_crypto::ContentHasher;

use crate::error::{ConnectionError, Result};

/// Prefix of identifier-indexed keys.
pub const CONN_ID_KEY_PREFIX: &str = "conn";

/// Prefix of state-indexed keys.
pub const CONN_STATE_KEY_PREFIX: &str = "connstate";

/// Namespace for threads this agent started.
pub const MY_NS_PREFIX: &str = "my";

/// Namespace for threads the peer started.
pub const THEIR_NS_PREFIX: &str = "their";

/// Key of the identifier-indexed record for `connection_id`.
pub fn connection_key(connection_id: &str) -> String {
    format!("{CONN_ID_KEY_PREFIX}_{connection_id}")
}

/// Search prefix covering every identifier-indexed key.
pub fn connection_search_prefix() -> String {
    connection_key("")
}

/// Key of the state snapshot of `connection_id` at `state`.
pub fn connection_state_key(connection_id: &str, state: &str) -> String {
    format!("{CONN_STATE_KEY_PREFIX}_{connection_id}_{state}")
}

/// Namespaced thread key for `thread_id`.
///
/// # Errors
/// [`ConnectionError::InvalidNamespace`] for a namespace other than
/// [`MY_NS_PREFIX`] or [`THEIR_NS_PREFIX`]; a hash error for an empty
/// thread id.
pub fn create_namespace_key(namespace: &str, thread_id: &str) -> Result<String> {
    if namespace != MY_NS_PREFIX && namespace != THEIR_NS_PREFIX {
        return Err(ConnectionError::InvalidNamespace(namespace.to_string()));
    }
    let digest = ContentHasher::THREAD.hash(thread_id.as_bytes())?;
    Ok(format!("{namespace}_{digest}"))
}

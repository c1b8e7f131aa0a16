use serde::{Deserialize, Serialize};

/// Default name of the store both tiers open.
pub const DEFAULT_NAMESPACE: &str = "didexchange";

/// Configuration for the connection store.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionStoreConfig {
    /// Store name opened in the durable and the ephemeral provider.
    pub namespace: String,
}

impl Default for ConnectionStoreConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

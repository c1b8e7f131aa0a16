use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration for the file-backed durable store provider.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileStoreConfig {
    /// Directory holding one sub-directory per named store.
    pub root: PathBuf,
    /// When `true`, every write is `fsync`ed before it is renamed into place.
    pub sync_writes: bool,
}

impl Default for FileStoreConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from(".peerlink").join("store"),
            sync_writes: true,
        }
    }
}

impl FileStoreConfig {
    /// Config rooted at `root` with default settings.
    pub fn at(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Default::default()
        }
    }
}

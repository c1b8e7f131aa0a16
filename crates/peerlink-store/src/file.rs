//! File-backed durable store.
//!
//! Each named store is a directory under [`FileStoreConfig::root`]. Every key
//! is one file named by the BLAKE3 hex digest of the key, so file names have
//! a fixed length and arbitrary key strings never escape the directory. A
//! file holds the key itself followed by the value:
//!
//! ```text
//! [key_len: u32 LE][key bytes][value bytes]
//! ```
//!
//! Writes go to a fresh temporary file in the same directory and are renamed
//! into place, so each put is atomic and concurrent puts to one key never
//! share a temporary path.

use std::collections::HashMap;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::config::FileStoreConfig;
use crate::error::{StoreError, StoreResult};
use crate::traits::{KvStore, StoreProvider};

/// Length of an entry file name (hex BLAKE3 digest).
const ENTRY_NAME_LEN: usize = 64;

/// Size of the key length header.
const KEY_LEN_SIZE: usize = 4;

/// A single durable store rooted at one directory.
#[derive(Debug)]
pub struct FileStore {
    dir: PathBuf,
    sync_writes: bool,
}

impl FileStore {
    /// Open (creating if needed) a store at `dir`.
    pub fn open(dir: impl Into<PathBuf>, sync_writes: bool) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir, sync_writes })
    }

    /// Directory backing this store.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(blake3::hash(key.as_bytes()).to_hex().as_str())
    }

    /// Read the entry at `path`, or `None` if the file is gone.
    fn read_entry(&self, path: &Path) -> StoreResult<Option<(String, Vec<u8>)>> {
        let bytes = match fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        decode_entry(bytes)
            .map(Some)
            .ok_or_else(|| StoreError::Backend(format!("corrupt entry file {}", path.display())))
    }
}

fn encode_entry(key: &str, value: &[u8]) -> StoreResult<Vec<u8>> {
    let key_len = u32::try_from(key.len())
        .map_err(|_| StoreError::Backend(format!("key of {} bytes is too long", key.len())))?;
    let mut buf = Vec::with_capacity(KEY_LEN_SIZE + key.len() + value.len());
    buf.extend_from_slice(&key_len.to_le_bytes());
    buf.extend_from_slice(key.as_bytes());
    buf.extend_from_slice(value);
    Ok(buf)
}

fn decode_entry(mut bytes: Vec<u8>) -> Option<(String, Vec<u8>)> {
    let header: [u8; KEY_LEN_SIZE] = bytes.get(..KEY_LEN_SIZE)?.try_into().ok()?;
    let key_end = KEY_LEN_SIZE.checked_add(u32::from_le_bytes(header) as usize)?;
    let key = String::from_utf8(bytes.get(KEY_LEN_SIZE..key_end)?.to_vec()).ok()?;
    let value = bytes.split_off(key_end);
    Some((key, value))
}

fn is_entry_name(name: &str) -> bool {
    name.len() == ENTRY_NAME_LEN && name.bytes().all(|b| b.is_ascii_hexdigit())
}

impl KvStore for FileStore {
    fn put(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }
        let entry = encode_entry(key, value)?;
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&entry)?;
        if self.sync_writes {
            tmp.as_file().sync_all()?;
        }
        tmp.persist(self.path_for(key)).map_err(|e| e.error)?;
        Ok(())
    }

    fn get(&self, key: &str) -> StoreResult<Vec<u8>> {
        match self.read_entry(&self.path_for(key))? {
            Some((stored, value)) if stored == key => Ok(value),
            Some((stored, _)) => Err(StoreError::Backend(format!(
                "entry for {key:?} holds key {stored:?}"
            ))),
            None => Err(StoreError::NotFound),
        }
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn iterate(&self, prefix: &str) -> StoreResult<Vec<(String, Vec<u8>)>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let file_name = entry.file_name();
            let is_entry = file_name.to_str().is_some_and(is_entry_name);
            if !is_entry {
                // in-flight temporaries and foreign files
                continue;
            }
            match self.read_entry(&entry.path()) {
                Ok(Some((key, value))) if key.starts_with(prefix) => entries.push((key, value)),
                Ok(_) => continue,
                Err(StoreError::Backend(reason)) => {
                    warn!(file = ?entry.path(), %reason, "skipping unreadable entry");
                    continue;
                }
                Err(e) => return Err(e),
            }
        }
        entries.sort_by(|(a, _), (b, _)| a.cmp(b));
        Ok(entries)
    }
}

/// Provider opening [`FileStore`]s under a common root directory.
pub struct FileStoreProvider {
    config: FileStoreConfig,
    stores: RwLock<HashMap<String, Arc<FileStore>>>,
}

impl FileStoreProvider {
    pub fn new(config: FileStoreConfig) -> Self {
        Self {
            config,
            stores: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &FileStoreConfig {
        &self.config
    }
}

fn validate_store_name(name: &str) -> StoreResult<()> {
    let valid = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.chars().any(char::is_control);
    if valid {
        Ok(())
    } else {
        Err(StoreError::InvalidStoreName(name.to_string()))
    }
}

impl StoreProvider for FileStoreProvider {
    fn open_store(&self, name: &str) -> StoreResult<Arc<dyn KvStore>> {
        validate_store_name(name)?;
        let mut stores = self.stores.write().expect("lock poisoned");
        if let Some(store) = stores.get(name) {
            let handle: Arc<dyn KvStore> = store.clone();
            return Ok(handle);
        }
        let dir = self.config.root.join(name);
        debug!(store = name, dir = ?dir, "opening file store");
        let store = Arc::new(FileStore::open(dir, self.config.sync_writes)?);
        stores.insert(name.to_string(), store.clone());
        let handle: Arc<dyn KvStore> = store;
        Ok(handle)
    }

    fn close_store(&self, name: &str) -> StoreResult<()> {
        self.stores.write().expect("lock poisoned").remove(name);
        Ok(())
    }
}

//! Persistence port for session state.
//!
//! Sessions hand a whole serialized blob to a [`BlobStore`] after every
//! mutation and read it back once at startup. Whether a store writes
//! synchronously, debounces, or keeps things in memory is its own business.

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use tracing::debug;

/// Version stamped into every persisted envelope.
pub const BLOB_VERSION: u32 = 0;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub trait BlobStore: Send + Sync {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError>;
    fn write(&self, key: &str, blob: &str) -> Result<(), PersistError>;
}

/// On-disk layout of a persisted blob: `{"state": ..., "version": 0}`.
#[derive(Debug, Serialize, Deserialize)]
struct Envelope<T> {
    state: T,
    #[serde(default)]
    version: u32,
}

pub fn save<T: Serialize>(store: &dyn BlobStore, key: &str, state: &T) -> Result<(), PersistError> {
    let blob = serde_json::to_string(&Envelope {
        state,
        version: BLOB_VERSION,
    })?;
    store.write(key, &blob)
}

/// Loads and unwraps a blob; `Ok(None)` when nothing was stored under `key`.
pub fn load<T: DeserializeOwned>(
    store: &dyn BlobStore,
    key: &str,
) -> Result<Option<T>, PersistError> {
    match store.read(key)? {
        None => Ok(None),
        Some(blob) => {
            let envelope: Envelope<T> = serde_json::from_str(&blob)?;
            Ok(Some(envelope.state))
        }
    }
}

/// One `<key>.json` file per blob inside `dir`, replaced atomically on write.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    dir: PathBuf,
}

impl FileBlobStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), PersistError> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);

        // Write to a sibling temp file, fsync, then rename over the target.
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(blob.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!("Persisted {} bytes to {}", blob.len(), path.display());
        Ok(())
    }
}

/// Process-local store, used by tests and by embedders that persist elsewhere.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> Result<Option<String>, PersistError> {
        Ok(self.raw(key))
    }

    fn write(&self, key: &str, blob: &str) -> Result<(), PersistError> {
        self.blobs
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key.to_string(), blob.to_string());
        Ok(())
    }
}

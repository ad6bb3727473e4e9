//! Durable string-keyed store backed by one JSON file
//!
//! - Whole-map reads and writes; every save rewrites the file
//! - Writes go through a temporary sibling file and a rename
//! - A missing file is an empty store; an unreadable or malformed file is
//!   logged and treated as empty so a corrupted cache never blocks a cycle
//! - Load-modify-save sequences hold an exclusive lock on a `.lock` sibling,
//!   which serializes writers across processes sharing the file

use feedwatch_core::{Error, Result};
use feedwatch_utils::write_atomic;
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::time::Duration;

const LOCK_RETRY: Duration = Duration::from_millis(20);

/// Key-value mapping held by a store. Sorted so saved files diff cleanly.
pub type Mapping<V> = BTreeMap<String, V>;

/// A JSON file holding a `key -> V` mapping
#[derive(Debug)]
pub struct JsonStore<V> {
    path: PathBuf,
    _value: PhantomData<fn() -> V>,
}

impl<V> Clone for JsonStore<V> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            _value: PhantomData,
        }
    }
}

/// Exclusive hold on a store's lock file, released on drop
#[derive(Debug)]
pub struct StoreLock {
    file: File,
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        // The lock file itself stays; removing it would let a waiter lock an
        // unlinked inode
        let _ = FileExt::unlock(&self.file);
    }
}

impl<V> JsonStore<V>
where
    V: Serialize + DeserializeOwned,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            _value: PhantomData,
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Location of the lock file guarding read-modify-write sequences
    pub fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    /// Block until this process holds the store lock
    pub fn lock(&self) -> Result<StoreLock> {
        let file = self.open_lock_file()?;
        file.lock_exclusive()
            .map_err(|e| Error::file_system(self.lock_path(), "lock store", e))?;
        Ok(StoreLock { file })
    }

    /// Take the store lock if nobody else holds it
    pub fn try_lock(&self) -> Result<Option<StoreLock>> {
        let file = self.open_lock_file()?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(StoreLock { file })),
            Err(e) if e.kind() == fs2::lock_contended_error().kind() => Ok(None),
            Err(e) => Err(Error::file_system(self.lock_path(), "lock store", e)),
        }
    }

    /// Wait for the store lock without blocking the runtime thread
    pub async fn lock_async(&self) -> Result<StoreLock> {
        loop {
            if let Some(lock) = self.try_lock()? {
                return Ok(lock);
            }
            tokio::time::sleep(LOCK_RETRY).await;
        }
    }

    fn open_lock_file(&self) -> Result<File> {
        let lock_path = self.lock_path();
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| Error::file_system(parent, "create store directory", e))?;
        }
        OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| Error::file_system(&lock_path, "open lock file", e))
    }

    /// Read the persisted mapping. Never fails.
    pub fn load(&self) -> Mapping<V> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Mapping::new(),
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store is unreadable, starting empty"
                );
                return Mapping::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(mapping) => mapping,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "store is corrupted, resetting"
                );
                Mapping::new()
            }
        }
    }

    /// Replace the persisted mapping with `mapping`
    pub fn save(&self, mapping: &Mapping<V>) -> Result<()> {
        let content = serde_json::to_vec_pretty(mapping)
            .map_err(|e| Error::json(format!("failed to encode {}", self.path.display()), e))?;
        write_atomic(&self.path, &content)
    }
}

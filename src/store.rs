use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::debug;

/// A key-value store for JSON text blobs
///
/// This trait abstracts the storage backend away from the repository layer,
/// so the same repository code runs against a directory of files in
/// production and an in-memory map in tests. Values are opaque strings; the
/// repository owns serialization.
pub trait DocumentStore: Send + Sync {
    /// Reads the blob stored under `key`, or None if the key is absent
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Writes `contents` under `key`, replacing any previous value
    fn write(&self, key: &str, contents: &str) -> Result<()>;

    /// Removes the blob stored under `key`
    ///
    /// Returns `true` if the key existed, `false` otherwise.
    fn remove(&self, key: &str) -> Result<bool>;

    /// Lists every key currently present in the store
    fn keys(&self) -> Result<Vec<String>>;

    /// A short label for the backend, used in system information output
    fn kind(&self) -> &'static str;
}

/// File-backed document store
///
/// Each key maps to `<data_dir>/<key>.json`. Keys are generated internally
/// (primary document key and backup keys), never from free-form user input.
pub struct FileStore {
    data_dir: PathBuf,
}

impl FileStore {
    /// Opens a file store rooted at `data_dir`, creating the directory if needed
    pub fn open(data_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("failed to create data directory {:?}", data_dir))?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{}.json", key))
    }
}

impl DocumentStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => {
                debug!("Read {} bytes from {:?}", contents.len(), path);
                Ok(Some(contents))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("failed to read {:?}", path)),
        }
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let path = self.path_for(key);
        fs::write(&path, contents).with_context(|| format!("failed to write {:?}", path))?;
        debug!("Wrote {} bytes to {:?}", contents.len(), path);
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e).with_context(|| format!("failed to remove {:?}", path)),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for entry in fs::read_dir(&self.data_dir)
            .with_context(|| format!("failed to list data directory {:?}", self.data_dir))?
        {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if let Some(key) = name.strip_suffix(".json") {
                keys.push(key.to_string());
            }
        }
        Ok(keys)
    }

    fn kind(&self) -> &'static str {
        "file"
    }
}

/// In-memory document store, used by tests
#[derive(Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DocumentStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries.get(key).cloned())
    }

    fn write(&self, key: &str, contents: &str) -> Result<()> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        entries.insert(key.to_string(), contents.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<bool> {
        let mut entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries.remove(key).is_some())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = self.entries.lock().expect("store lock poisoned");
        Ok(entries.keys().cloned().collect())
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

//! File-backed storage backend.

use super::KeyValueStore;
use crate::error::{Result, RosterError};
use fs2::FileExt;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Name of the data file inside the storage directory.
const DATA_FILE: &str = "storage.json";

/// Name of the lock file inside the storage directory.
const LOCK_FILE: &str = "LOCK";

/// Key-value storage persisted as a single JSON object on disk.
///
/// The whole map is rewritten on every `write`, through a temporary file
/// that is renamed over the data file once synced. The directory is locked
/// for exclusive access while the store is open.
pub struct FileStore {
    /// Storage directory.
    path: PathBuf,

    /// Lock file for exclusive access.
    _lock_file: File,

    /// In-memory copy of the persisted map.
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store in `path`, creating the directory if needed.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        fs::create_dir_all(&path)?;

        let lock_file = Self::acquire_lock(&path)?;
        let entries = Self::load(&path.join(DATA_FILE))?;
        debug!(path = %path.display(), keys = entries.len(), "opened file storage");

        Ok(Self {
            path,
            _lock_file: lock_file,
            entries: RwLock::new(entries),
        })
    }

    /// Storage directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(data_path: &Path) -> Result<BTreeMap<String, String>> {
        if !data_path.exists() {
            return Ok(BTreeMap::new());
        }

        let raw = fs::read_to_string(data_path)?;
        serde_json::from_str(&raw).map_err(|e| {
            RosterError::InvalidFormat(format!("{}: {}", data_path.display(), e))
        })
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        let data_path = self.path.join(DATA_FILE);
        let tmp_path = self.path.join(format!("{}.tmp", DATA_FILE));

        let encoded = serde_json::to_vec(entries)?;
        let mut file = File::create(&tmp_path)?;
        file.write_all(&encoded)?;
        file.sync_all()?;
        fs::rename(&tmp_path, &data_path)?;

        Ok(())
    }

    fn acquire_lock(path: &Path) -> Result<File> {
        let lock_path = path.join(LOCK_FILE);
        let lock_file = File::create(lock_path)?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| RosterError::Locked)?;

        Ok(lock_file)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write();
        let mut updated = entries.clone();
        updated.insert(key.to_string(), value.to_string());
        self.persist(&updated)?;
        *entries = updated;
        Ok(())
    }
}

//! File Store Module
//!
//! One file per key. Writes go to a staged file first and are promoted into
//! place with a single rename, so readers only ever see complete values.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{debug, info, warn};

use crate::durable::StoreLayout;
use crate::error::{Result, StoreError};
use crate::kv::{validate_key, validate_value, Key, KeyValueStore, Value};

// == File Store ==
/// Durable key-value store rooted at a directory.
#[derive(Debug)]
pub struct FileStore {
    layout: StoreLayout,
    /// Sequence for unique staged file names
    next_stage: AtomicU64,
}

impl FileStore {
    // == Open ==
    /// Opens (creating if needed) the store at `root`.
    ///
    /// Anything left in the staging directory by an interrupted write is
    /// discarded; it was never committed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let layout = StoreLayout::new(root);

        fs::create_dir_all(layout.root())
            .map_err(|e| StoreError::io("create root", layout.root(), e))?;
        let cleared = reset_staging(layout.staging())?;

        info!(
            root = %layout.root().display(),
            cleared_staged = cleared,
            "Durable store opened"
        );

        Ok(Self {
            layout,
            next_stage: AtomicU64::new(0),
        })
    }

    pub fn layout(&self) -> &StoreLayout {
        &self.layout
    }
}

impl KeyValueStore for FileStore {
    // == Get ==
    fn get(&self, key: &Key) -> Result<Value> {
        validate_key(key)?;

        let path = self.layout.record_path(key);
        match fs::read(&path) {
            Ok(bytes) => Ok(Value::new(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StoreError::NotFound(key.clone())),
            Err(e) => Err(StoreError::io("read", path, e)),
        }
    }

    // == Set ==
    /// Stages the full value, then renames it over the committed record.
    ///
    /// On any failure the staged file is discarded and the previously
    /// committed record, if any, is left as it was.
    fn set(&self, key: Key, value: Value) -> Result<()> {
        validate_key(&key)?;
        validate_value(&value)?;

        let seq = self.next_stage.fetch_add(1, Ordering::Relaxed);
        let staged = self.layout.staged_path(&key, seq);
        let record = self.layout.record_path(&key);

        if let Err(err) = write_staged(&staged, value.as_bytes()) {
            discard_staged(&staged);
            return Err(err);
        }

        if let Err(e) = fs::rename(&staged, &record) {
            discard_staged(&staged);
            return Err(StoreError::io("promote", record, e));
        }

        sync_dir(self.layout.root());
        debug!(key = %key, size_bytes = value.size(), path = %record.display(), "Committed record");
        Ok(())
    }
}

/// Writes and flushes a staged file. The handle is closed on return.
fn write_staged(path: &Path, bytes: &[u8]) -> Result<()> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| StoreError::io("create staged", path, e))?;

    file.write_all(bytes)
        .map_err(|e| StoreError::io("write staged", path, e))?;
    file.sync_all()
        .map_err(|e| StoreError::io("flush staged", path, e))?;
    Ok(())
}

fn discard_staged(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != ErrorKind::NotFound {
            warn!(path = %path.display(), error = %e, "Failed to discard staged file");
        }
    }
}

/// Empties the staging directory, returning how many entries were dropped.
fn reset_staging(staging: &Path) -> Result<usize> {
    let leftover = match fs::read_dir(staging) {
        Ok(entries) => entries.count(),
        Err(e) if e.kind() == ErrorKind::NotFound => 0,
        Err(e) => return Err(StoreError::io("scan staging", staging, e)),
    };

    match fs::remove_dir_all(staging) {
        Ok(()) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => return Err(StoreError::io("clear staging", staging, e)),
    }
    fs::create_dir_all(staging).map_err(|e| StoreError::io("create staging", staging, e))?;

    if leftover > 0 {
        info!(staging = %staging.display(), leftover, "Discarded uncommitted staged files");
    }
    Ok(leftover)
}

/// Persists the directory entry of a completed rename.
///
/// The rename is already visible when this runs, so failure is only logged.
fn sync_dir(dir: &Path) {
    #[cfg(unix)]
    if let Err(e) = fs::File::open(dir).and_then(|d| d.sync_all()) {
        warn!(dir = %dir.display(), error = %e, "Failed to sync store directory");
    }
    #[cfg(not(unix))]
    let _ = dir;
}

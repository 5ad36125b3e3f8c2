//! Device-local key/value store for the completed-day list.

use crate::core::{ProgressSet, Result, TrackerError};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Key under which the completed-day list is stored.
pub const PROGRESS_KEY: &str = "ephi-progress";

pub trait LocalStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

// ============================================================================
// File-backed store
// ============================================================================

/// One `<key>.json` file per key under a root directory.
#[derive(Debug, Clone)]
pub struct FileLocalStore {
    root: PathBuf,
}

impl FileLocalStore {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(TrackerError::storage(format!("invalid local key '{}'", key)));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl LocalStore for FileLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(TrackerError::storage(format!(
                "Failed to read '{}': {}",
                path.display(),
                err
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root).map_err(|e| {
            TrackerError::storage(format!(
                "Failed to create directory '{}': {}",
                self.root.display(),
                e
            ))
        })?;

        let tmp = path.with_extension("tmp");
        let file = File::create(&tmp).map_err(|e| {
            TrackerError::storage(format!("Failed to create '{}': {}", tmp.display(), e))
        })?;
        let mut writer = BufWriter::new(file);
        writer
            .write_all(value.as_bytes())
            .and_then(|_| writer.flush())
            .map_err(|e| TrackerError::storage(format!("Failed to write '{}': {}", tmp.display(), e)))?;
        drop(writer);

        fs::rename(&tmp, &path).map_err(|e| {
            TrackerError::storage(format!(
                "Failed to rename '{}' -> '{}': {}",
                tmp.display(),
                path.display(),
                e
            ))
        })
    }
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Default)]
pub struct MemoryLocalStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryLocalStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LocalStore for MemoryLocalStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.entries.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ============================================================================
// Progress helpers
// ============================================================================

/// Reads the stored completed-day list. A missing entry is an empty set; so is
/// an entry that no longer parses, after a warning.
pub fn read_local_progress(store: &dyn LocalStore) -> Result<ProgressSet> {
    let Some(raw) = store.get(PROGRESS_KEY)? else {
        return Ok(ProgressSet::new());
    };

    match serde_json::from_str::<Vec<u32>>(&raw) {
        Ok(days) => Ok(days.into_iter().collect()),
        Err(err) => {
            warn!(error = %err, "local progress is malformed; treating it as empty");
            Ok(ProgressSet::new())
        }
    }
}

pub fn write_local_progress(store: &dyn LocalStore, progress: &ProgressSet) -> Result<()> {
    let encoded = serde_json::to_string(&progress.to_vec())?;
    store.set(PROGRESS_KEY, &encoded)
}

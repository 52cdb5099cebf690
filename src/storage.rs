use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, error};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{List, Task};

/// File name of the persisted data set (versioned, one blob for everything)
pub const DATA_FILE_NAME: &str = "simplelist_data_v1.json";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("Failed to create data directory: {0}")]
    Directory(String),
}

/// The serialized shape of the entire data set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersistedData {
    pub lists: Vec<List>,
    pub tasks: Vec<Task>,
}

/// Durable persistence of the `{lists, tasks}` structure as a single JSON file.
///
/// Read and write failures never reach the caller: `load` reports them as
/// "nothing saved" and `save` logs and drops them, leaving the previous file
/// contents in place until the next successful write.
pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the previously saved data set.
    ///
    /// Returns None when the file does not exist, cannot be read, or does not
    /// parse; corruption is logged and otherwise treated the same as a missing
    /// file.
    pub fn load(&self) -> Option<PersistedData> {
        if !self.path.exists() {
            return None;
        }
        match self.try_load() {
            Ok(data) => {
                debug!(
                    "loaded {} lists and {} tasks from {}",
                    data.lists.len(),
                    data.tasks.len(),
                    self.path.display()
                );
                Some(data)
            }
            Err(e) => {
                error!("failed to load data from {}: {}", self.path.display(), e);
                None
            }
        }
    }

    /// Persist both collections as one file write.
    ///
    /// Failures are logged and swallowed; the in-memory state remains the
    /// source of truth and the next successful save catches the file up.
    pub fn save(&self, lists: &[List], tasks: &[Task]) {
        if let Err(e) = self.try_save(lists, tasks) {
            error!("failed to save data to {}: {}", self.path.display(), e);
        }
    }

    fn try_load(&self) -> Result<PersistedData, StorageError> {
        let contents = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }

    fn try_save(&self, lists: &[List], tasks: &[Task]) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| StorageError::Directory(e.to_string()))?;
            }
        }

        let data = PersistedData {
            lists: lists.to_vec(),
            tasks: tasks.to_vec(),
        };
        let json = serde_json::to_string(&data)?;
        fs::write(&self.path, json)?;
        Ok(())
    }
}

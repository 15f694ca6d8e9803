use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, trace};

use super::{TaskStorage, validate_key};
use crate::error::{StorageError, StorageResult};
use crate::types::Task;

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a temp file in the same directory which is then persisted
/// over the target, so a crash mid-write leaves the previous list intact.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    /// Opens storage rooted at `dir`, creating the directory if needed
    pub fn new(dir: impl Into<PathBuf>) -> StorageResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "json task storage ready");
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl TaskStorage for JsonFileStorage {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<Task>>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            trace!(path = %path.display(), "no stored task list");
            return Ok(None);
        }

        let contents = fs::read_to_string(&path)?;
        match serde_json::from_str(&contents) {
            Ok(tasks) => Ok(Some(tasks)),
            Err(e) => Err(StorageError::Corrupted {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    fn save(&self, key: &str, tasks: &[Task]) -> StorageResult<()> {
        let path = self.path_for(key)?;

        let mut temp_file = NamedTempFile::new_in(&self.dir)?;
        let json_str = serde_json::to_string_pretty(tasks)?;
        temp_file.write_all(json_str.as_bytes())?;
        temp_file.flush()?;
        temp_file.persist(&path)?;

        trace!(path = %path.display(), count = tasks.len(), "task list written");
        Ok(())
    }
}

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use super::{TaskStorage, validate_key};
use crate::error::{StorageError, StorageResult};
use crate::types::Task;

/// In-process storage, used by tests and headless sessions.
///
/// `set_failing(true)` makes every save fail with
/// [`StorageError::Unavailable`], standing in for a full disk or exhausted
/// quota.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, Vec<Task>>>,
    failing: AtomicBool,
    saves: AtomicUsize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage pre-seeded with `tasks` under `key`
    pub fn with_tasks(key: &str, tasks: Vec<Task>) -> Self {
        let storage = Self::default();
        if let Ok(mut entries) = storage.entries.lock() {
            entries.insert(key.to_string(), tasks);
        }
        storage
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of successful saves so far
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Copy of what is currently stored under `key`
    pub fn snapshot(&self, key: &str) -> Option<Vec<Task>> {
        self.entries.lock().ok()?.get(key).cloned()
    }
}

impl TaskStorage for MemoryStorage {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<Task>>> {
        validate_key(key)?;
        let entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))?;
        Ok(entries.get(key).cloned())
    }

    fn save(&self, key: &str, tasks: &[Task]) -> StorageResult<()> {
        validate_key(key)?;
        if self.failing.load(Ordering::SeqCst) {
            return Err(StorageError::Unavailable("storage quota exceeded".to_string()));
        }
        let mut entries = self
            .entries
            .lock()
            .map_err(|_| StorageError::Unavailable("memory storage lock poisoned".to_string()))?;
        entries.insert(key.to_string(), tasks.to_vec());
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

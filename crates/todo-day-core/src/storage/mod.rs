/*
[INPUT]:  Storage key and task collection snapshots
[OUTPUT]: TaskStorage contract plus JSON file and in-memory backends
[POS]:    Persistence collaborator consumed by TaskStore
[UPDATE]: When adding storage backends or changing the key contract
*/

mod json;
mod memory;

pub use json::JsonFileStorage;
pub use memory::MemoryStorage;

use crate::error::{StorageError, StorageResult};
use crate::types::Task;

/// Fixed key under which this app keeps its task list
pub const STORAGE_KEY: &str = "tasks";

/// Key-value persistence for whole task collections.
///
/// Implementations must round-trip the exact sequence of tasks, including an
/// empty collection. A key that was never saved loads as `None`.
pub trait TaskStorage {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<Task>>>;

    fn save(&self, key: &str, tasks: &[Task]) -> StorageResult<()>;
}

impl<T: TaskStorage + ?Sized> TaskStorage for Box<T> {
    fn load(&self, key: &str) -> StorageResult<Option<Vec<Task>>> {
        (**self).load(key)
    }

    fn save(&self, key: &str, tasks: &[Task]) -> StorageResult<()> {
        (**self).save(key, tasks)
    }
}

/// Keys double as file stems, so only `[A-Za-z0-9_-]+` is accepted.
pub fn validate_key(key: &str) -> StorageResult<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
    if valid {
        Ok(())
    } else {
        Err(StorageError::InvalidKey(key.to_string()))
    }
}

/*
[INPUT]:  Resolved AppConfig
[OUTPUT]: TaskStore backed by the JSON file in the data dir
[POS]:    Store wiring shared by the CLI, interactive menu and TUI
[UPDATE]: When adding storage backends
*/

use anyhow::{Context, Result};

use todo_day_core::{AppConfig, JsonFileStorage, TaskStorage, TaskStore};

/// Store with the backend chosen at runtime, so the front ends can also run
/// against in-memory storage.
pub(crate) type DynStore = TaskStore<Box<dyn TaskStorage>>;

pub(crate) fn open_store(config: &AppConfig) -> Result<DynStore> {
    let data_dir = config.resolve_data_dir().context("resolve data dir")?;
    let storage = JsonFileStorage::new(&data_dir)
        .with_context(|| format!("open data dir {}", data_dir.display()))?;
    let storage: Box<dyn TaskStorage> = Box::new(storage);
    TaskStore::open(storage, config.storage_key.clone(), config.validation)
        .context("load task list")
}

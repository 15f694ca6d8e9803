/*
[INPUT]:  Test fixtures and scratch directories
[OUTPUT]: Shared helpers for todo-day-core integration tests
[POS]:    Test infrastructure - shared across all test modules
[UPDATE]: When adding new test patterns or fixtures
*/

//! Common test utilities for todo-day-core tests

#![allow(dead_code)]

use tempfile::TempDir;
use todo_day_core::{JsonFileStorage, MemoryStorage, STORAGE_KEY, TaskStore, ValidationPolicy};

/// Empty lenient store over in-memory storage
pub fn memory_store() -> TaskStore<MemoryStorage> {
    TaskStore::open(MemoryStorage::new(), STORAGE_KEY, ValidationPolicy::Lenient)
        .expect("open in-memory store")
}

/// Store persisted as JSON in a fresh temp dir. Keep the dir alive for the
/// duration of the test.
pub fn json_store(policy: ValidationPolicy) -> (TempDir, TaskStore<JsonFileStorage>) {
    let dir = TempDir::new().expect("create temp dir");
    let store = reopen(&dir, policy);
    (dir, store)
}

pub fn reopen(dir: &TempDir, policy: ValidationPolicy) -> TaskStore<JsonFileStorage> {
    let storage = JsonFileStorage::new(dir.path()).expect("open json storage");
    TaskStore::open(storage, STORAGE_KEY, policy).expect("open json store")
}

/// Texts in display order
pub fn texts<S: todo_day_core::TaskStorage>(store: &TaskStore<S>) -> Vec<String> {
    store.tasks().iter().map(|task| task.text.clone()).collect()
}

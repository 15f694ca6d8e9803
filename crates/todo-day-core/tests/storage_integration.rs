//! Persistence behaviour of the task store against real backends

mod common;

use std::fs;

use tempfile::TempDir;
use todo_day_core::{
    EditSession, JsonFileStorage, MemoryStorage, STORAGE_KEY, StorageError, StoreError, Task,
    TaskId, TaskStorage, TaskStore, ValidationPolicy,
};

use common::{json_store, reopen, texts};

#[test]
fn mutations_survive_reopen() {
    let (dir, mut store) = json_store(ValidationPolicy::Lenient);
    let milk = store.add("buy milk").unwrap();
    let bread = store.add("buy bread").unwrap();
    store.toggle_completed(milk);
    store.update_text(bread, "buy rye bread");
    drop(store);

    let store = reopen(&dir, ValidationPolicy::Lenient);
    assert_eq!(texts(&store), vec!["buy milk", "buy rye bread"]);
    assert!(store.get(milk).unwrap().completed);
    assert!(!store.get(bread).unwrap().completed);
}

#[test]
fn reopened_store_does_not_reuse_ids() {
    let (dir, mut store) = json_store(ValidationPolicy::Lenient);
    let first = store.add("first").unwrap();
    drop(store);

    let mut store = reopen(&dir, ValidationPolicy::Lenient);
    let second = store.add("second").unwrap();
    assert!(second > first);
}

#[test]
fn deleting_everything_persists_an_empty_list() {
    let (dir, mut store) = json_store(ValidationPolicy::Lenient);
    let id = store.add("temp").unwrap();
    store.delete(id);
    drop(store);

    let storage = JsonFileStorage::new(dir.path()).unwrap();
    assert_eq!(storage.load(STORAGE_KEY).unwrap(), Some(Vec::new()));
}

#[test]
fn save_of_load_round_trips() {
    let dir = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(dir.path()).unwrap();
    let mut done = Task::new(TaskId::new(5), "done");
    done.completed = true;
    let tasks = vec![
        Task::new(TaskId::new(9), "zeta"),
        done,
        Task::new(TaskId::new(1), ""),
    ];
    storage.save(STORAGE_KEY, &tasks).unwrap();

    let loaded = storage.load(STORAGE_KEY).unwrap().unwrap();
    storage.save(STORAGE_KEY, &loaded).unwrap();
    assert_eq!(storage.load(STORAGE_KEY).unwrap().unwrap(), tasks);
}

#[test]
fn reads_list_with_timestamp_ids() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("tasks.json"),
        r#"[{"id":1718000000000,"text":"water plants","completed":false},
            {"id":1718000000500,"text":"call mom","completed":true}]"#,
    )
    .unwrap();

    let mut store = reopen(&dir, ValidationPolicy::Lenient);
    assert_eq!(texts(&store), vec!["water plants", "call mom"]);
    let id = store.add("new").unwrap();
    assert_eq!(id, TaskId::new(1_718_000_000_501));
}

#[test]
fn corrupted_file_fails_to_open_and_is_preserved() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tasks.json");
    fs::write(&path, "{not json").unwrap();

    let storage = JsonFileStorage::new(dir.path()).unwrap();
    let result = TaskStore::open(storage, STORAGE_KEY, ValidationPolicy::Lenient);
    match result {
        Err(StoreError::Load { key, source }) => {
            assert_eq!(key, "tasks");
            assert!(matches!(source, StorageError::Corrupted { .. }));
        }
        other => panic!("expected load error, got {other:?}"),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
}

#[test]
fn failed_save_keeps_state_and_warns_until_next_success() {
    let mut store = TaskStore::open(MemoryStorage::new(), STORAGE_KEY, ValidationPolicy::Lenient)
        .unwrap();
    let kept = store.add("saved").unwrap();

    store.storage().set_failing(true);
    let unsaved = store.add("not saved yet").unwrap();
    assert_eq!(store.len(), 2);
    assert!(matches!(store.save_warning(), Some(StoreError::Save { .. })));
    assert_eq!(store.storage().snapshot(STORAGE_KEY).unwrap().len(), 1);

    store.storage().set_failing(false);
    store.toggle_completed(kept);
    assert!(store.save_warning().is_none());
    let persisted = store.storage().snapshot(STORAGE_KEY).unwrap();
    assert_eq!(persisted.len(), 2);
    assert_eq!(persisted[1].id, unsaved);
}

#[test]
fn flush_retries_after_failure() {
    let mut store = TaskStore::open(MemoryStorage::new(), STORAGE_KEY, ValidationPolicy::Lenient)
        .unwrap();
    store.storage().set_failing(true);
    store.add("pending");
    assert!(store.flush().is_err());

    store.storage().set_failing(false);
    store.flush().unwrap();
    assert!(store.take_save_warning().is_none());
    assert_eq!(store.storage().snapshot(STORAGE_KEY).unwrap().len(), 1);
}

#[test]
fn edit_session_is_never_persisted() {
    let (dir, mut store) = json_store(ValidationPolicy::Lenient);
    let id = store.add("stable").unwrap();

    let mut session = EditSession::new();
    session.begin_edit(store.get(id).unwrap());
    session.update_draft_text("draft only");
    drop(store);

    let store = reopen(&dir, ValidationPolicy::Lenient);
    assert_eq!(store.get(id).unwrap().text, "stable");
}

#[test]
fn separate_keys_are_independent() {
    let dir = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(dir.path()).unwrap();
    let mut work = TaskStore::open(storage.clone(), "work", ValidationPolicy::Lenient).unwrap();
    work.add("ship release");

    let home = TaskStore::open(storage, "home", ValidationPolicy::Lenient).unwrap();
    assert!(home.is_empty());
    assert!(dir.path().join("work.json").exists());
}

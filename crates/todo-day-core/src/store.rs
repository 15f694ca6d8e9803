/*
[INPUT]:  Task intents (add, delete, update text, toggle) and a TaskStorage backend
[OUTPUT]: Ordered task collection, persisted after every change
[POS]:    Core domain - sole owner and writer of the task list
[UPDATE]: When task mutations or persistence semantics change
*/

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::StoreError;
use crate::storage::{MemoryStorage, STORAGE_KEY, TaskStorage};
use crate::types::{Task, TaskId};

/// How `update_text` treats its input.
///
/// `add` always trims and rejects blank text. `Lenient` stores edits verbatim
/// (even empty ones); `Strict` applies the same trim/reject rule as `add`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationPolicy {
    #[default]
    Lenient,
    Strict,
}

/// Owns the task collection and writes the full snapshot to storage after
/// every change.
///
/// Mutations never fail from the caller's point of view: a miss is a no-op,
/// and a failed save keeps the in-memory list and records a pending warning
/// (see [`TaskStore::take_save_warning`]). The next successful save clears it.
#[derive(Debug)]
pub struct TaskStore<S: TaskStorage = MemoryStorage> {
    storage: S,
    key: String,
    tasks: Vec<Task>,
    /// `None` once the counter has passed `u64::MAX`
    next_id: Option<u64>,
    policy: ValidationPolicy,
    save_warning: Option<StoreError>,
}

impl TaskStore<MemoryStorage> {
    /// Empty store backed by fresh in-memory storage
    pub fn in_memory() -> Self {
        Self {
            storage: MemoryStorage::new(),
            key: STORAGE_KEY.to_string(),
            tasks: Vec::new(),
            next_id: Some(1),
            policy: ValidationPolicy::default(),
            save_warning: None,
        }
    }
}

impl<S: TaskStorage> TaskStore<S> {
    /// Load the list stored under `key`. A key that was never saved yields an
    /// empty store. Repeated ids in the stored list are replaced with fresh
    /// ones, keeping the first task that carries each id.
    pub fn open(
        storage: S,
        key: impl Into<String>,
        policy: ValidationPolicy,
    ) -> Result<Self, StoreError> {
        let key = key.into();
        let tasks = storage
            .load(&key)
            .map_err(|source| StoreError::Load {
                key: key.clone(),
                source,
            })?
            .unwrap_or_default();

        let next_id = next_id_after(&tasks);
        info!(key = %key, count = tasks.len(), ?policy, "task list loaded");

        let mut store = Self {
            storage,
            key,
            tasks,
            next_id,
            policy,
            save_warning: None,
        };
        store.reassign_duplicate_ids();
        Ok(store)
    }

    /// Append a task with trimmed `raw_text`. Blank input is ignored.
    pub fn add(&mut self, raw_text: &str) -> Option<TaskId> {
        let text = raw_text.trim();
        if text.is_empty() {
            debug!("add ignored: blank text");
            return None;
        }

        let Some(id) = self.allocate_id() else {
            warn!(key = %self.key, "add ignored: no unused task id left");
            return None;
        };
        self.tasks.push(Task::new(id, text));
        info!(task_id = %id, "task added");
        self.persist();
        Some(id)
    }

    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.position(id) else {
            debug!(task_id = %id, "delete ignored: no such task");
            return false;
        };
        self.tasks.remove(index);
        info!(task_id = %id, "task deleted");
        self.persist();
        true
    }

    /// Replace the text of task `id`, leaving `completed` alone.
    pub fn update_text(&mut self, id: TaskId, new_text: &str) -> bool {
        let text = match self.policy {
            ValidationPolicy::Lenient => new_text,
            ValidationPolicy::Strict => {
                let trimmed = new_text.trim();
                if trimmed.is_empty() {
                    debug!(task_id = %id, "update ignored: blank text");
                    return false;
                }
                trimmed
            }
        };

        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!(task_id = %id, "update ignored: no such task");
            return false;
        };
        task.text = text.to_string();
        info!(task_id = %id, "task text updated");
        self.persist();
        true
    }

    pub fn toggle_completed(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!(task_id = %id, "toggle ignored: no such task");
            return false;
        };
        task.completed = !task.completed;
        info!(task_id = %id, completed = task.completed, "task toggled");
        self.persist();
        true
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn contains(&self, id: TaskId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn policy(&self) -> ValidationPolicy {
        self.policy
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Most recent save failure, if the list has not been saved since
    pub fn save_warning(&self) -> Option<&StoreError> {
        self.save_warning.as_ref()
    }

    pub fn take_save_warning(&mut self) -> Option<StoreError> {
        self.save_warning.take()
    }

    /// Write the current list again, e.g. after a reported save failure
    pub fn flush(&mut self) -> Result<(), StoreError> {
        self.storage
            .save(&self.key, &self.tasks)
            .map_err(|source| StoreError::Save {
                key: self.key.clone(),
                source,
            })?;
        self.save_warning = None;
        Ok(())
    }

    /// Next counter value, or the smallest unused id once the counter is
    /// exhausted. Never returns an id present in the list.
    fn allocate_id(&mut self) -> Option<TaskId> {
        if let Some(next) = self.next_id {
            self.next_id = next.checked_add(1);
            return Some(TaskId::new(next));
        }
        let id = smallest_free_id(&self.tasks)?;
        debug!(task_id = %id, "id counter exhausted; reusing a free id");
        Some(id)
    }

    fn reassign_duplicate_ids(&mut self) {
        let mut seen = HashSet::new();
        let duplicates: Vec<usize> = self
            .tasks
            .iter()
            .enumerate()
            .filter(|(_, task)| !seen.insert(task.id))
            .map(|(index, _)| index)
            .collect();

        for index in duplicates {
            let previous = self.tasks[index].id;
            match self.allocate_id() {
                Some(id) => {
                    self.tasks[index].id = id;
                    warn!(key = %self.key, old = %previous, new = %id, "reassigned duplicate task id");
                }
                None => warn!(key = %self.key, task_id = %previous, "no unused id for duplicate task"),
            }
        }
    }

    fn position(&self, id: TaskId) -> Option<usize> {
        self.tasks.iter().position(|task| task.id == id)
    }

    fn persist(&mut self) {
        match self.storage.save(&self.key, &self.tasks) {
            Ok(()) => {
                if self.save_warning.take().is_some() {
                    info!(key = %self.key, "task list saved after earlier failure");
                }
            }
            Err(source) => {
                warn!(
                    key = %self.key,
                    error = %source,
                    retryable = source.is_retryable(),
                    "failed to save task list; keeping in-memory state"
                );
                self.save_warning = Some(StoreError::Save {
                    key: self.key.clone(),
                    source,
                });
            }
        }
    }
}

fn next_id_after(tasks: &[Task]) -> Option<u64> {
    match tasks.iter().map(|task| task.id.get()).max() {
        Some(max) => max.checked_add(1),
        None => Some(1),
    }
}

fn smallest_free_id(tasks: &[Task]) -> Option<TaskId> {
    let mut used: Vec<u64> = tasks.iter().map(|task| task.id.get()).collect();
    used.sort_unstable();
    used.dedup();

    let mut candidate: u64 = 1;
    for id in used {
        if id < candidate {
            continue;
        }
        if id > candidate {
            break;
        }
        candidate = candidate.checked_add(1)?;
    }
    Some(TaskId::new(candidate))
}

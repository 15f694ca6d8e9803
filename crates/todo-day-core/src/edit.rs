/*
[INPUT]:  Edit intents (begin, draft change, commit, cancel) and the TaskStore
[OUTPUT]: Transient create/edit mode with a working copy of the edited task
[POS]:    Task domain logic - edit-mode state machine, never persisted
[UPDATE]: When edit-mode transitions change
*/

use tracing::debug;

use crate::storage::TaskStorage;
use crate::store::TaskStore;
use crate::types::{Task, TaskId};

/// Whether the UI is creating a new task (`Idle`) or editing an existing one.
///
/// `Editing` holds a snapshot of the task taken at `begin_edit`; later changes
/// to the collection do not show up in the draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditSession {
    #[default]
    Idle,
    Editing(Task),
}

impl EditSession {
    pub fn new() -> Self {
        Self::Idle
    }

    /// Start editing `task`, replacing any edit already in progress
    pub fn begin_edit(&mut self, task: &Task) {
        if let Self::Editing(previous) = self {
            debug!(previous = %previous.id, next = %task.id, "discarding unfinished edit");
        }
        *self = Self::Editing(task.clone());
    }

    /// Replace the draft text. Returns `false` (and does nothing) when idle.
    pub fn update_draft_text(&mut self, text: impl Into<String>) -> bool {
        match self {
            Self::Editing(draft) => {
                draft.text = text.into();
                true
            }
            Self::Idle => false,
        }
    }

    /// Write the draft text back to the store and return to `Idle`.
    ///
    /// Returns the id of the updated task, or `None` when idle or when the
    /// store ignored the update (task deleted meanwhile, or blank text under
    /// the strict policy). The session is `Idle` afterwards in every case.
    pub fn commit<S: TaskStorage>(&mut self, store: &mut TaskStore<S>) -> Option<TaskId> {
        let Self::Editing(draft) = std::mem::take(self) else {
            return None;
        };

        if store.update_text(draft.id, &draft.text) {
            Some(draft.id)
        } else {
            debug!(task_id = %draft.id, "edit committed but store left the task unchanged");
            None
        }
    }

    /// Drop the draft without touching the store
    pub fn cancel(&mut self) -> bool {
        match std::mem::take(self) {
            Self::Editing(draft) => {
                debug!(task_id = %draft.id, "edit cancelled");
                true
            }
            Self::Idle => false,
        }
    }

    pub fn is_editing(&self) -> bool {
        matches!(self, Self::Editing(_))
    }

    pub fn draft(&self) -> Option<&Task> {
        match self {
            Self::Editing(draft) => Some(draft),
            Self::Idle => None,
        }
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        self.draft().map(|draft| draft.id)
    }

    /// Editing a task that is no longer in `store`
    pub fn is_stale<S: TaskStorage>(&self, store: &TaskStore<S>) -> bool {
        self.editing_id().is_some_and(|id| !store.contains(id))
    }
}
